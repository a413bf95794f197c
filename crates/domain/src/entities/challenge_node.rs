//! Challenge node - a challenge's identity inside one game's gate graph
//!
//! Nodes carry no mutable state. Everything the engine needs to know about a
//! challenge's progress comes from `TeamProgressFact`s supplied at query time.

use serde::{Deserialize, Serialize};

use crate::value_objects::GateCombination;
use crate::{ChallengeId, GameId};

/// A challenge as seen by the gate graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeNode {
    id: ChallengeId,
    game_id: GameId,
    /// How incoming gates combine. `None` defers to the engine-wide default.
    #[serde(default)]
    combination: Option<GateCombination>,
}

impl ChallengeNode {
    pub fn new(id: ChallengeId, game_id: GameId) -> Self {
        Self {
            id,
            game_id,
            combination: None,
        }
    }

    // === Accessors ===

    pub fn id(&self) -> ChallengeId {
        self.id
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn combination(&self) -> Option<GateCombination> {
        self.combination
    }

    // === Builder Methods ===

    /// Override the combination policy for this challenge only.
    pub fn with_combination(mut self, combination: GateCombination) -> Self {
        self.combination = Some(combination);
        self
    }
}
