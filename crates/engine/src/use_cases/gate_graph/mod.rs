//! Gate graph use cases.
//!
//! Mutations (propose, remove, update) run one at a time per game:
//! 1. Admission through the game's `MutationGate` slot (FIFO, cancellable)
//! 2. Fresh load of the committed graph from storage, verified acyclic
//! 3. Cycle check of the proposed gate against that snapshot
//! 4. Persistence through the storage collaborator
//! 5. Swap of the cached snapshot pointer, then release of the permit
//!
//! Queries never touch the mutation gate. They read whichever snapshot the
//! pointer refers to and resolve availability against fresh progress facts.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use gategraph_domain::{
    detect_cycle, find_cycle, AvailabilityResolver, AvailabilityResult, ChallengeId,
    DomainError, GameId, Gate, GateCondition, GateId, GraphSnapshot, TeamId,
};
use tokio_util::sync::CancellationToken;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::ports::{GateRepo, ProgressRepo, RepoError};
use crate::stores::{MutationGate, MutationPermit, SnapshotStore};

mod error;


pub use error::GateGraphError;

/// Orchestrates gate mutations and availability queries for all games.
pub struct GateGraphService {
    gates: Arc<dyn GateRepo>,
    progress: Arc<dyn ProgressRepo>,
    snapshots: SnapshotStore,
    mutation_gate: MutationGate,
    resolver: AvailabilityResolver,
    collaborator_timeout: Option<Duration>,
}

impl GateGraphService {
    pub fn new(
        gates: Arc<dyn GateRepo>,
        progress: Arc<dyn ProgressRepo>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            gates,
            progress,
            snapshots: SnapshotStore::new(),
            mutation_gate: MutationGate::new(),
            resolver: AvailabilityResolver::new(config.default_combination),
            collaborator_timeout: config.collaborator_timeout,
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a gate `source -> target` unless it would close a cycle.
    ///
    /// # Returns
    /// * `Ok(Gate)` - The accepted gate, carrying the id storage assigned
    /// * `Err(GateGraphError::CycleRejected)` - Nothing was written
    pub async fn propose_gate(
        &self,
        game_id: GameId,
        source: ChallengeId,
        target: ChallengeId,
        condition: GateCondition,
        cancel: &CancellationToken,
    ) -> Result<Gate, GateGraphError> {
        let _permit = self.admit(game_id, cancel).await?;
        let snapshot = self.load_committed(game_id, cancel).await?;

        if let Some(path) = detect_cycle(&snapshot, source, target) {
            tracing::info!(
                game_id = %game_id,
                source = %source,
                target = %target,
                cycle = %path,
                "Gate rejected: would create a cycle"
            );
            return Err(GateGraphError::CycleRejected(path));
        }

        let gate = Gate::new(game_id, source, target, condition);
        let gate_id = self
            .persist(game_id, cancel, "persist_gate_add", || {
                self.gates.persist_gate_add(game_id, &gate)
            })
            .await?;
        let gate = gate.with_id(gate_id);
        self.commit(game_id, snapshot.with_gate(gate.clone()))?;

        tracing::info!(
            game_id = %game_id,
            gate_id = %gate_id,
            source = %source,
            target = %target,
            condition = %condition,
            "Gate accepted"
        );
        Ok(gate)
    }

    /// Remove a gate. Removal can never introduce a cycle.
    pub async fn remove_gate(
        &self,
        game_id: GameId,
        gate_id: GateId,
        cancel: &CancellationToken,
    ) -> Result<Gate, GateGraphError> {
        let _permit = self.admit(game_id, cancel).await?;
        let snapshot = self.load_committed(game_id, cancel).await?;

        let Some(gate) = snapshot.gate(gate_id).cloned() else {
            return Err(GateGraphError::GateNotFound(gate_id));
        };

        let found = self
            .persist(game_id, cancel, "persist_gate_remove", || {
                self.gates.persist_gate_remove(game_id, gate_id)
            })
            .await?;
        if !found {
            // Storage changed underneath the snapshot we just loaded.
            self.snapshots.invalidate(game_id);
            tracing::warn!(game_id = %game_id, gate_id = %gate_id, "Storage no longer holds gate");
            return Err(GateGraphError::GateNotFound(gate_id));
        }
        self.commit(game_id, snapshot.without_gate(gate_id))?;

        tracing::info!(game_id = %game_id, gate_id = %gate_id, "Gate removed");
        Ok(gate)
    }

    /// Change the condition of an existing gate. Topology is unchanged, so no
    /// cycle check is needed.
    pub async fn update_gate_condition(
        &self,
        game_id: GameId,
        gate_id: GateId,
        condition: GateCondition,
        cancel: &CancellationToken,
    ) -> Result<Gate, GateGraphError> {
        let _permit = self.admit(game_id, cancel).await?;
        let snapshot = self.load_committed(game_id, cancel).await?;

        let Some(current) = snapshot.gate(gate_id) else {
            return Err(GateGraphError::GateNotFound(gate_id));
        };
        let updated = current.clone().with_condition(condition);

        let found = self
            .persist(game_id, cancel, "persist_gate_update", || {
                self.gates.persist_gate_update(game_id, &updated)
            })
            .await?;
        if !found {
            self.snapshots.invalidate(game_id);
            tracing::warn!(game_id = %game_id, gate_id = %gate_id, "Storage no longer holds gate");
            return Err(GateGraphError::GateNotFound(gate_id));
        }
        self.commit(game_id, snapshot.with_replaced_gate(updated.clone()))?;

        tracing::info!(
            game_id = %game_id,
            gate_id = %gate_id,
            condition = %condition,
            "Gate condition updated"
        );
        Ok(updated)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Availability of every challenge in a game for one team.
    ///
    /// Runs against the cached snapshot without waiting on mutations. A query
    /// racing a mutation sees either the old or the new graph, never a mix.
    pub async fn get_availability(
        &self,
        game_id: GameId,
        team_id: TeamId,
        cancel: &CancellationToken,
    ) -> Result<HashMap<ChallengeId, AvailabilityResult>, GateGraphError> {
        let snapshot = match self.snapshots.get(game_id) {
            Some(snapshot) => snapshot,
            None => {
                tracing::debug!(game_id = %game_id, "Snapshot cache miss");
                let epoch = self.snapshots.epoch(game_id);
                let loaded = self.load_verified(game_id, cancel).await?;
                self.snapshots.publish_if_current(loaded, epoch)
            }
        };

        let progress = self
            .guarded(game_id, cancel, "get_team_progress", || {
                self.progress.get_team_progress(game_id, team_id)
            })
            .await?;

        let availability = self.resolver.resolve(&snapshot, &progress);
        tracing::debug!(
            game_id = %game_id,
            team_id = %team_id,
            challenges = availability.len(),
            unlocked = availability.values().filter(|r| r.is_unlocked).count(),
            "Resolved availability"
        );
        Ok(availability)
    }

    /// The committed snapshot currently cached for a game.
    pub fn current_snapshot(&self, game_id: GameId) -> Option<Arc<GraphSnapshot>> {
        self.snapshots.get(game_id)
    }

    /// Forget the cached snapshot; the next query reloads from storage.
    pub fn invalidate(&self, game_id: GameId) -> bool {
        let dropped = self.snapshots.invalidate(game_id);
        tracing::debug!(game_id = %game_id, dropped, "Snapshot invalidated");
        dropped
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn admit(
        &self,
        game_id: GameId,
        cancel: &CancellationToken,
    ) -> Result<MutationPermit, GateGraphError> {
        self.mutation_gate
            .acquire(game_id, cancel)
            .await
            .ok_or_else(|| {
                tracing::warn!(game_id = %game_id, "Gate mutation cancelled before admission");
                GateGraphError::Cancelled
            })
    }

    /// Load from storage and publish as the committed snapshot.
    ///
    /// Only call while holding the game's permit.
    async fn load_committed(
        &self,
        game_id: GameId,
        cancel: &CancellationToken,
    ) -> Result<Arc<GraphSnapshot>, GateGraphError> {
        let snapshot = self.load_verified(game_id, cancel).await?;
        Ok(self.snapshots.publish(snapshot))
    }

    async fn load_verified(
        &self,
        game_id: GameId,
        cancel: &CancellationToken,
    ) -> Result<GraphSnapshot, GateGraphError> {
        let data = self
            .guarded(game_id, cancel, "load_graph", || self.gates.load_graph(game_id))
            .await?;

        let snapshot = GraphSnapshot::build(game_id, data)
            .map_err(|err| self.corrupt(game_id, err.to_string()))?;
        if let Some(path) = find_cycle(&snapshot) {
            return Err(self.corrupt(game_id, format!("contains cycle {}", path)));
        }

        tracing::debug!(
            game_id = %game_id,
            challenges = snapshot.challenges().len(),
            gates = snapshot.gates().len(),
            "Loaded gate graph"
        );
        Ok(snapshot)
    }

    /// Publish the post-mutation snapshot.
    fn commit(
        &self,
        game_id: GameId,
        next: Result<GraphSnapshot, DomainError>,
    ) -> Result<Arc<GraphSnapshot>, GateGraphError> {
        match next {
            Ok(snapshot) => Ok(self.snapshots.publish(snapshot)),
            Err(err) => Err(self.corrupt(game_id, err.to_string())),
        }
    }

    fn corrupt(&self, game_id: GameId, reason: String) -> GateGraphError {
        self.snapshots.invalidate(game_id);
        tracing::error!(game_id = %game_id, reason = %reason, "Committed gate graph violates invariants");
        GateGraphError::CorruptGraph { game_id, reason }
    }

    /// Like `guarded`, but an interrupted write leaves storage in an unknown
    /// state, so the cached snapshot is dropped.
    async fn persist<T, F, Fut>(
        &self,
        game_id: GameId,
        cancel: &CancellationToken,
        operation: &'static str,
        call: F,
    ) -> Result<T, GateGraphError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RepoError>>,
    {
        let result = self.guarded(game_id, cancel, operation, call).await;
        let interrupted = match &result {
            Err(GateGraphError::Cancelled) => true,
            Err(GateGraphError::Collaborator(err)) => err.is_timeout(),
            _ => false,
        };
        if interrupted {
            self.snapshots.invalidate(game_id);
        }
        result
    }

    /// Run one collaborator call under the cancellation token and the
    /// configured timeout. The call is not started if `cancel` already fired.
    async fn guarded<T, F, Fut>(
        &self,
        game_id: GameId,
        cancel: &CancellationToken,
        operation: &'static str,
        call: F,
    ) -> Result<T, GateGraphError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, RepoError>>,
    {
        if cancel.is_cancelled() {
            return Err(GateGraphError::Cancelled);
        }

        let limit = self.collaborator_timeout;
        let pending = call();
        let bounded = async move {
            match limit {
                Some(limit) => tokio::time::timeout(limit, pending)
                    .await
                    .unwrap_or_else(|_| Err(RepoError::timeout(operation, limit))),
                None => pending.await,
            }
        };

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(GateGraphError::Cancelled),
            result = bounded => result.map_err(GateGraphError::from),
        };

        if let Err(err) = &outcome {
            tracing::warn!(game_id = %game_id, operation, error = %err, "Collaborator call did not complete");
        }
        outcome
    }
}
