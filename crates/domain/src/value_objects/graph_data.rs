//! Raw graph contents exchanged with the storage collaborator

use serde::{Deserialize, Serialize};

use crate::entities::{ChallengeNode, Gate};

/// A game's challenges and gates, as loaded from storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphData {
    pub challenges: Vec<ChallengeNode>,
    pub gates: Vec<Gate>,
}

impl GraphData {
    pub fn new(challenges: Vec<ChallengeNode>, gates: Vec<Gate>) -> Self {
        Self { challenges, gates }
    }
}
