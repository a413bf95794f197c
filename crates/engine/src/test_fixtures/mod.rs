//! Common test helpers: graph builders, tracing setup and a storage adapter
//! whose writes can be held open.

use std::sync::Arc;

use async_trait::async_trait;
use gategraph_domain::{
    ChallengeId, ChallengeNode, GameId, Gate, GateCondition, GateId, GraphData,
};
use tokio::sync::{Notify, Semaphore};

use crate::infrastructure::memory::InMemoryGateRepo;
use crate::infrastructure::ports::{GateRepo, RepoError};

// =============================================================================
// Tracing
// =============================================================================

/// Route tracing output through the test harness. Safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gategraph=debug")),
        )
        .with_test_writer()
        .try_init();
}

// =============================================================================
// Graph builders
// =============================================================================

/// A `Completed` gate with a fresh id.
pub fn gate(game_id: GameId, source: ChallengeId, target: ChallengeId) -> Gate {
    Gate::new(game_id, source, target, GateCondition::Completed)
}

/// `len` challenges linked `c0 -> c1 -> ... -> c(len-1)`.
pub fn chain(game_id: GameId, len: usize) -> (Vec<ChallengeId>, GraphData) {
    let ids: Vec<ChallengeId> = (0..len).map(|_| ChallengeId::new()).collect();
    let challenges = ids
        .iter()
        .map(|id| ChallengeNode::new(*id, game_id))
        .collect();
    let gates = ids
        .windows(2)
        .map(|pair| gate(game_id, pair[0], pair[1]))
        .collect();
    (ids, GraphData::new(challenges, gates))
}

// =============================================================================
// Held storage
// =============================================================================

/// In-memory gate storage where `persist_gate_add` for one game parks until
/// [`BlockingGateRepo::open`] is called. Other games and other operations
/// pass straight through.
pub struct BlockingGateRepo {
    inner: Arc<InMemoryGateRepo>,
    held_game: GameId,
    entered: Notify,
    latch: Semaphore,
}

impl BlockingGateRepo {
    pub fn new(held_game: GameId) -> Self {
        Self {
            inner: Arc::new(InMemoryGateRepo::new()),
            held_game,
            entered: Notify::new(),
            latch: Semaphore::new(0),
        }
    }

    pub fn inner(&self) -> &InMemoryGateRepo {
        &self.inner
    }

    /// Resolves once a held write has started.
    pub async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    /// Let every held write (current and future) proceed.
    pub fn open(&self) {
        self.latch.add_permits(1);
    }
}

#[async_trait]
impl GateRepo for BlockingGateRepo {
    async fn load_graph(&self, game_id: GameId) -> Result<GraphData, RepoError> {
        self.inner.load_graph(game_id).await
    }

    async fn persist_gate_add(&self, game_id: GameId, gate: &Gate) -> Result<GateId, RepoError> {
        if game_id == self.held_game {
            self.entered.notify_one();
            let _pass = self
                .latch
                .acquire()
                .await
                .map_err(|e| RepoError::database("persist_gate_add", e))?;
        }
        self.inner.persist_gate_add(game_id, gate).await
    }

    async fn persist_gate_remove(
        &self,
        game_id: GameId,
        gate_id: GateId,
    ) -> Result<bool, RepoError> {
        self.inner.persist_gate_remove(game_id, gate_id).await
    }

    async fn persist_gate_update(&self, game_id: GameId, gate: &Gate) -> Result<bool, RepoError> {
        self.inner.persist_gate_update(game_id, gate).await
    }
}
