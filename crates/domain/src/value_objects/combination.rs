//! How multiple incoming gates of one challenge combine

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Combination policy for a challenge's incoming gates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateCombination {
    /// Every incoming gate must be satisfied (conjunctive unlock)
    #[default]
    All,
    /// A single satisfied gate is enough
    Any,
}

impl GateCombination {
    /// Combine per-gate outcomes. An empty set of gates always unlocks.
    pub fn unlocks(&self, mut satisfied: impl ExactSizeIterator<Item = bool>) -> bool {
        if satisfied.len() == 0 {
            return true;
        }
        match self {
            Self::All => satisfied.all(|ok| ok),
            Self::Any => satisfied.any(|ok| ok),
        }
    }
}

impl fmt::Display for GateCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Any => write!(f, "any"),
        }
    }
}

impl FromStr for GateCombination {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "and" | "conjunctive" => Ok(Self::All),
            "any" | "or" | "disjunctive" => Ok(Self::Any),
            other => Err(DomainError::validation(format!(
                "Unknown gate combination: {}",
                other
            ))),
        }
    }
}
