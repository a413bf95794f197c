//! Diagnostic path describing a rejected cycle

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ChallengeId;

/// Ordered challenge ids of a cycle, first and last element equal.
///
/// Renders as `"A => B => ... => A"`. A self-gate renders as `"X => X"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CyclePath(Vec<ChallengeId>);

impl CyclePath {
    /// Build a cycle from an open walk, closing it back onto its first id.
    ///
    /// `[a, b, c]` becomes `a => b => c => a`.
    pub fn closing(walk: Vec<ChallengeId>) -> Self {
        let mut ids = walk;
        if let Some(first) = ids.first().copied() {
            ids.push(first);
        }
        Self(ids)
    }

    pub fn ids(&self) -> &[ChallengeId] {
        &self.0
    }

    /// Challenge the cycle starts (and ends) at.
    pub fn start(&self) -> Option<ChallengeId> {
        self.0.first().copied()
    }

    /// Number of gates forming the cycle.
    pub fn len(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for CyclePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" => ")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}
