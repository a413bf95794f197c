//! Team progress facts consumed by availability resolution

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ChallengeId;

/// What a team has achieved on one challenge.
///
/// Supplied fresh by the progress collaborator for every query; the engine
/// never caches or derives these.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamProgressFact {
    pub is_completed: bool,
    /// Points earned; fractional scores are allowed
    pub score: f64,
    /// Set when an organizer has explicitly opened gates sourced here for the team
    #[serde(default)]
    pub manual_override: bool,
}

impl TeamProgressFact {
    pub fn completed() -> Self {
        Self {
            is_completed: true,
            ..Self::default()
        }
    }

    pub fn scored(score: f64) -> Self {
        Self {
            score,
            ..Self::default()
        }
    }

    pub fn overridden() -> Self {
        Self {
            manual_override: true,
            ..Self::default()
        }
    }
}

/// A team's facts keyed by challenge
pub type TeamProgress = HashMap<ChallengeId, TeamProgressFact>;
