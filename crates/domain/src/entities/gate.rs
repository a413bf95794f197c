//! Gate entity - a prerequisite edge between two challenges
//!
//! A gate `source -> target` means the target challenge stays locked for a
//! team until the gate's condition holds for that team on the source
//! challenge. Several gates may point at the same target; how they combine is
//! decided by the target's `GateCombination`.
//!
//! Self-gates (`source == target`) are representable on purpose. They are
//! rejected by cycle detection with a diagnostic path rather than refused at
//! construction time.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value_objects::TeamProgressFact;
use crate::{ChallengeId, GameId, GateId};

/// Condition a team must meet on the source challenge
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GateCondition {
    /// Source challenge must be completed
    Completed,
    /// Team score on the source challenge must reach the threshold
    MinimumScore(f64),
    /// An organizer must have explicitly opened the gate for the team
    ManualOverride,
}

impl GateCondition {
    /// Evaluate the condition against a team's fact for the source challenge.
    ///
    /// A missing fact never satisfies a condition.
    pub fn is_satisfied_by(&self, fact: Option<&TeamProgressFact>) -> bool {
        let Some(fact) = fact else {
            return false;
        };
        match self {
            Self::Completed => fact.is_completed,
            Self::MinimumScore(threshold) => fact.score >= *threshold,
            Self::ManualOverride => fact.manual_override,
        }
    }
}

impl fmt::Display for GateCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Completed => write!(f, "completed"),
            Self::MinimumScore(threshold) => write!(f, "score >= {}", threshold),
            Self::ManualOverride => write!(f, "manual override"),
        }
    }
}

/// A directed prerequisite edge scoped to one game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gate {
    id: GateId,
    game_id: GameId,
    source_challenge_id: ChallengeId,
    target_challenge_id: ChallengeId,
    condition: GateCondition,
}

impl Gate {
    pub fn new(
        game_id: GameId,
        source_challenge_id: ChallengeId,
        target_challenge_id: ChallengeId,
        condition: GateCondition,
    ) -> Self {
        Self {
            id: GateId::new(),
            game_id,
            source_challenge_id,
            target_challenge_id,
            condition,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> GateId {
        self.id
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn source_challenge_id(&self) -> ChallengeId {
        self.source_challenge_id
    }

    pub fn target_challenge_id(&self) -> ChallengeId {
        self.target_challenge_id
    }

    pub fn condition(&self) -> GateCondition {
        self.condition
    }

    pub fn is_self_gate(&self) -> bool {
        self.source_challenge_id == self.target_challenge_id
    }

    // === Builder Methods ===

    /// Set the gate ID (used when storage assigns or reloads identities).
    pub fn with_id(mut self, id: GateId) -> Self {
        self.id = id;
        self
    }

    pub fn with_condition(mut self, condition: GateCondition) -> Self {
        self.condition = condition;
        self
    }
}
