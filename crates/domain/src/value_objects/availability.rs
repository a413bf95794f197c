//! Per-team availability of a challenge

use serde::{Deserialize, Serialize};

use crate::entities::Gate;
use crate::ChallengeId;

/// Whether a team can currently attempt a challenge.
///
/// Produced fresh for each query and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResult {
    pub challenge_id: ChallengeId,
    pub is_unlocked: bool,
    /// Unmet incoming gates, in the snapshot's gate order. Empty when unlocked.
    pub blocking_gates: Vec<Gate>,
}

impl AvailabilityResult {
    pub fn unlocked(challenge_id: ChallengeId) -> Self {
        Self {
            challenge_id,
            is_unlocked: true,
            blocking_gates: Vec::new(),
        }
    }

    pub fn locked(challenge_id: ChallengeId, blocking_gates: Vec<Gate>) -> Self {
        Self {
            challenge_id,
            is_unlocked: false,
            blocking_gates,
        }
    }
}
