//! Collaborator ports consumed by the gate graph engine.

use async_trait::async_trait;
use gategraph_domain::{Gate, GameId, GateId, GraphData, TeamId, TeamProgress};

use super::RepoError;

/// Durable store of challenges and gates.
///
/// The engine treats whatever this returns as committed truth; it never
/// writes anywhere else.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GateRepo: Send + Sync {
    /// Load every challenge and gate of a game.
    async fn load_graph(&self, game_id: GameId) -> Result<GraphData, RepoError>;

    /// Persist a new gate and return the id it is stored under.
    async fn persist_gate_add(&self, game_id: GameId, gate: &Gate) -> Result<GateId, RepoError>;

    /// Delete a gate. Returns `false` if the store did not have it.
    async fn persist_gate_remove(&self, game_id: GameId, gate_id: GateId)
        -> Result<bool, RepoError>;

    /// Overwrite a gate in place. Returns `false` if the store did not have it.
    async fn persist_gate_update(&self, game_id: GameId, gate: &Gate) -> Result<bool, RepoError>;
}

/// Source of team progress facts. Facts are fetched fresh for every query.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProgressRepo: Send + Sync {
    async fn get_team_progress(
        &self,
        game_id: GameId,
        team_id: TeamId,
    ) -> Result<TeamProgress, RepoError>;
}
