//! In-memory collaborator adapters.
//!
//! Useful for development hosts and for tests that need real shared state
//! rather than scripted mocks. Nothing here survives a restart.

use async_trait::async_trait;
use dashmap::DashMap;
use gategraph_domain::{
    ChallengeId, Gate, GameId, GateId, GraphData, TeamId, TeamProgress, TeamProgressFact,
};

use crate::infrastructure::ports::{GateRepo, ProgressRepo, RepoError};

/// Gate storage backed by a concurrent map of per-game graph data.
#[derive(Default)]
pub struct InMemoryGateRepo {
    games: DashMap<GameId, GraphData>,
}

impl InMemoryGateRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a game's stored graph wholesale.
    pub fn seed(&self, game_id: GameId, data: GraphData) {
        self.games.insert(game_id, data);
    }

    /// Current stored graph of a game (empty if never written).
    pub fn graph(&self, game_id: GameId) -> GraphData {
        self.games
            .get(&game_id)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GateRepo for InMemoryGateRepo {
    async fn load_graph(&self, game_id: GameId) -> Result<GraphData, RepoError> {
        Ok(self.graph(game_id))
    }

    async fn persist_gate_add(&self, game_id: GameId, gate: &Gate) -> Result<GateId, RepoError> {
        let mut data = self.games.entry(game_id).or_default();
        if data.gates.iter().any(|existing| existing.id() == gate.id()) {
            return Err(RepoError::constraint(format!(
                "gate {} already stored",
                gate.id()
            )));
        }
        data.gates.push(gate.clone());
        Ok(gate.id())
    }

    async fn persist_gate_remove(
        &self,
        game_id: GameId,
        gate_id: GateId,
    ) -> Result<bool, RepoError> {
        let Some(mut data) = self.games.get_mut(&game_id) else {
            return Ok(false);
        };
        let before = data.gates.len();
        data.gates.retain(|gate| gate.id() != gate_id);
        Ok(data.gates.len() != before)
    }

    async fn persist_gate_update(&self, game_id: GameId, gate: &Gate) -> Result<bool, RepoError> {
        let Some(mut data) = self.games.get_mut(&game_id) else {
            return Ok(false);
        };
        match data.gates.iter_mut().find(|stored| stored.id() == gate.id()) {
            Some(stored) => {
                *stored = gate.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Team progress facts keyed by game and team.
#[derive(Default)]
pub struct InMemoryProgressRepo {
    progress: DashMap<(GameId, TeamId), TeamProgress>,
}

impl InMemoryProgressRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record (or overwrite) one fact.
    pub fn set_fact(
        &self,
        game_id: GameId,
        team_id: TeamId,
        challenge_id: ChallengeId,
        fact: TeamProgressFact,
    ) {
        self.progress
            .entry((game_id, team_id))
            .or_default()
            .insert(challenge_id, fact);
    }
}

#[async_trait]
impl ProgressRepo for InMemoryProgressRepo {
    async fn get_team_progress(
        &self,
        game_id: GameId,
        team_id: TeamId,
    ) -> Result<TeamProgress, RepoError> {
        Ok(self
            .progress
            .get(&(game_id, team_id))
            .map(|entry| entry.value().clone())
            .unwrap_or_default())
    }
}
