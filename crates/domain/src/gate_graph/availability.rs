//! Per-team challenge availability.
//!
//! Each challenge is decided from its direct prerequisites' progress facts
//! only, never from whether those prerequisites are themselves unlocked. No
//! ordering or fixpoint is needed and the cost is O(challenges x in-degree).

use std::collections::HashMap;

use crate::entities::ChallengeNode;
use crate::value_objects::{AvailabilityResult, GateCombination, TeamProgress};
use crate::ChallengeId;

use super::GraphSnapshot;

/// Resolves which challenges a team can currently attempt.
#[derive(Debug, Clone, Copy, Default)]
pub struct AvailabilityResolver {
    /// Applied to challenges that do not set their own policy
    default_combination: GateCombination,
}

impl AvailabilityResolver {
    pub fn new(default_combination: GateCombination) -> Self {
        Self {
            default_combination,
        }
    }

    /// Availability of every challenge in `snapshot` for one team.
    ///
    /// Missing facts count as unmet gates, not as errors.
    pub fn resolve(
        &self,
        snapshot: &GraphSnapshot,
        progress: &TeamProgress,
    ) -> HashMap<ChallengeId, AvailabilityResult> {
        snapshot
            .challenges()
            .iter()
            .map(|node| (node.id(), self.resolve_challenge(snapshot, node, progress)))
            .collect()
    }

    /// Availability of a single challenge.
    pub fn resolve_challenge(
        &self,
        snapshot: &GraphSnapshot,
        node: &ChallengeNode,
        progress: &TeamProgress,
    ) -> AvailabilityResult {
        let combination = node.combination().unwrap_or(self.default_combination);

        let mut outcomes = Vec::new();
        let mut blocking = Vec::new();
        for gate in snapshot.prerequisites_of(node.id()) {
            let satisfied = gate
                .condition()
                .is_satisfied_by(progress.get(&gate.source_challenge_id()));
            outcomes.push(satisfied);
            if !satisfied {
                blocking.push(gate.clone());
            }
        }

        if combination.unlocks(outcomes.into_iter()) {
            AvailabilityResult::unlocked(node.id())
        } else {
            AvailabilityResult::locked(node.id(), blocking)
        }
    }
}
