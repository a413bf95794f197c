//! Gate graph use case errors.

use gategraph_domain::{CyclePath, GameId, GateId};

use crate::infrastructure::ports::RepoError;

/// Outcome taxonomy for gate mutations and availability queries.
///
/// `CycleRejected` and `GateNotFound` mean the request itself is invalid.
/// `Cancelled` and `Collaborator` mean nothing changed and the caller may retry.
#[derive(Debug, thiserror::Error)]
pub enum GateGraphError {
    #[error("Gate would create a cycle: {0}")]
    CycleRejected(CyclePath),

    #[error("Gate not found: {0}")]
    GateNotFound(GateId),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Collaborator failure: {0}")]
    Collaborator(#[from] RepoError),

    /// Committed data breaks a graph invariant; fatal to the operation.
    #[error("Committed gate graph for game {game_id} is corrupt: {reason}")]
    CorruptGraph { game_id: GameId, reason: String },
}

impl GateGraphError {
    /// The request was understood and refused; retrying it unchanged is pointless.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::CycleRejected(_) | Self::GateNotFound(_))
    }

    /// Nothing was applied and the same request may succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Cancelled | Self::Collaborator(_))
    }

    /// Diagnostic path of a rejected cycle.
    pub fn cycle_path(&self) -> Option<&CyclePath> {
        match self {
            Self::CycleRejected(path) => Some(path),
            _ => None,
        }
    }
}
