//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::config::EngineConfig;
use crate::infrastructure::memory::{InMemoryGateRepo, InMemoryProgressRepo};
use crate::infrastructure::ports::{GateRepo, ProgressRepo};
use crate::use_cases::GateGraphService;

/// Main application state.
///
/// Hosts build one `App` at startup and share `gate_graph` across request
/// handlers.
pub struct App {
    pub config: EngineConfig,
    pub gate_graph: Arc<GateGraphService>,
}

impl App {
    /// Wire the engine to the host's storage and progress collaborators.
    pub fn new(
        gates: Arc<dyn GateRepo>,
        progress: Arc<dyn ProgressRepo>,
        config: EngineConfig,
    ) -> Self {
        tracing::info!(
            collaborator_timeout = ?config.collaborator_timeout,
            default_combination = %config.default_combination,
            "Gate graph engine ready"
        );
        let gate_graph = Arc::new(GateGraphService::new(gates, progress, &config));
        Self { config, gate_graph }
    }

    /// Engine backed by process-local storage, for development hosts.
    pub fn in_memory(config: EngineConfig) -> Self {
        Self::new(
            Arc::new(InMemoryGateRepo::new()),
            Arc::new(InMemoryProgressRepo::new()),
            config,
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use gategraph_domain::{ChallengeId, GameId, GateCombination, GateCondition, TeamId};
    use tokio_util::sync::CancellationToken;

    use super::*;
    use crate::test_fixtures;

    #[tokio::test]
    async fn in_memory_app_round_trips_a_gate() {
        test_fixtures::init_test_tracing();
        let app = App::in_memory(EngineConfig {
            default_combination: GateCombination::Any,
            ..EngineConfig::default()
        });
        let game_id = GameId::new();
        let (a, b) = (ChallengeId::new(), ChallengeId::new());
        let cancel = CancellationToken::new();

        let gate = app
            .gate_graph
            .propose_gate(game_id, a, b, GateCondition::Completed, &cancel)
            .await
            .unwrap();
        let availability = app
            .gate_graph
            .get_availability(game_id, TeamId::new(), &cancel)
            .await
            .unwrap();

        assert!(availability[&a].is_unlocked);
        assert!(!availability[&b].is_unlocked);
        assert_eq!(availability[&b].blocking_gates, vec![gate]);
    }

    #[test]
    fn app_keeps_extreme_timeouts_as_configured() {
        test_fixtures::init_test_tracing();
        for timeout in [None, Some(Duration::MAX), Some(Duration::from_nanos(1))] {
            let config = EngineConfig {
                collaborator_timeout: timeout,
                ..EngineConfig::default()
            };

            let app = App::in_memory(config.clone());

            assert_eq!(app.config, config);
        }
    }
}
