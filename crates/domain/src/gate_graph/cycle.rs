//! Cycle detection over gate graphs.
//!
//! Adding `source -> target` closes a cycle iff `target` already reaches
//! `source` through existing gates. Both searches are iterative and
//! visited-set guarded, so they terminate in O(V + E) even when handed a graph
//! that is already cyclic.

use std::collections::{HashMap, HashSet};

use crate::entities::{ChallengeNode, Gate};
use crate::value_objects::CyclePath;
use crate::ChallengeId;

use super::GraphSnapshot;

/// Check whether adding `source -> target` to `snapshot` would create a cycle.
///
/// Returns the cycle rendered source-first (`source => target => ... =>
/// source`). A self-gate is reported as `source => source` without traversal.
/// When several paths lead back to `source`, the first one reached in
/// adjacency order wins.
pub fn detect_cycle(
    snapshot: &GraphSnapshot,
    source: ChallengeId,
    target: ChallengeId,
) -> Option<CyclePath> {
    if source == target {
        return Some(CyclePath::closing(vec![source]));
    }

    let mut visited: HashSet<ChallengeId> = HashSet::new();
    let mut parent: HashMap<ChallengeId, ChallengeId> = HashMap::new();
    let mut stack: Vec<(ChallengeId, Option<ChallengeId>)> = vec![(target, None)];

    while let Some((current, from)) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        if let Some(from) = from {
            parent.insert(current, from);
        }
        if current == source {
            return Some(close_walk(source, target, &parent));
        }

        // Reverse push keeps adjacency order on pop.
        let next: Vec<ChallengeId> = snapshot
            .dependents_of(current)
            .map(Gate::target_challenge_id)
            .filter(|id| !visited.contains(id))
            .collect();
        stack.extend(next.into_iter().rev().map(|id| (id, Some(current))));
    }

    None
}

/// Rebuild `source => target => ... => source` from the predecessor chain.
fn close_walk(
    source: ChallengeId,
    target: ChallengeId,
    parent: &HashMap<ChallengeId, ChallengeId>,
) -> CyclePath {
    // source <- ... <- target
    let mut back = Vec::new();
    let mut cursor = source;
    while cursor != target {
        match parent.get(&cursor) {
            Some(&prev) => {
                back.push(prev);
                cursor = prev;
            }
            None => break,
        }
    }
    back.reverse();

    let mut walk = Vec::with_capacity(back.len() + 1);
    walk.push(source);
    walk.extend(back);
    CyclePath::closing(walk)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

/// Find any cycle already present in `snapshot`.
///
/// Committed snapshots must never contain one; a hit means the data handed to
/// the engine is corrupt. Roots are visited in challenge order and the first
/// back edge found is reported, starting at the challenge it closes on.
pub fn find_cycle(snapshot: &GraphSnapshot) -> Option<CyclePath> {
    let mut state: HashMap<ChallengeId, Visit> = HashMap::new();

    for root in snapshot.challenges().iter().map(ChallengeNode::id) {
        if state.contains_key(&root) {
            continue;
        }

        state.insert(root, Visit::InProgress);
        // (challenge, index of the next outgoing gate to follow)
        let mut stack: Vec<(ChallengeId, usize)> = vec![(root, 0)];

        while let Some(&(node, cursor)) = stack.last() {
            let Some(gate) = snapshot.dependent_gate(node, cursor) else {
                state.insert(node, Visit::Done);
                stack.pop();
                continue;
            };
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let child = gate.target_challenge_id();
            match state.get(&child) {
                Some(Visit::InProgress) => {
                    let start = stack
                        .iter()
                        .position(|(id, _)| *id == child)
                        .unwrap_or_default();
                    let walk = stack[start..].iter().map(|(id, _)| *id).collect();
                    return Some(CyclePath::closing(walk));
                }
                Some(Visit::Done) => {}
                None => {
                    state.insert(child, Visit::InProgress);
                    stack.push((child, 0));
                }
            }
        }
    }

    None
}
