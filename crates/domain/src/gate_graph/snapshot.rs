//! Immutable point-in-time view of one game's gate graph.
//!
//! A snapshot is built once from `GraphData` and never mutated afterwards.
//! Edits produce a brand-new snapshot (`with_gate`, `without_gate`,
//! `with_replaced_gate`) so readers holding the old one are unaffected.

use std::collections::HashMap;

use crate::entities::{ChallengeNode, Gate};
use crate::error::DomainError;
use crate::value_objects::GraphData;
use crate::{ChallengeId, GameId, GateId};

/// Challenges and gates of one game plus adjacency indexes in both directions.
#[derive(Debug, Clone)]
pub struct GraphSnapshot {
    game_id: GameId,
    nodes: Vec<ChallengeNode>,
    node_index: HashMap<ChallengeId, usize>,
    gates: Vec<Gate>,
    gate_index: HashMap<GateId, usize>,
    /// prerequisite -> gates leaving it, in gate order
    outgoing: HashMap<ChallengeId, Vec<usize>>,
    /// dependent -> gates entering it, in gate order
    incoming: HashMap<ChallengeId, Vec<usize>>,
}

impl GraphSnapshot {
    /// Snapshot of a game with no challenges and no gates.
    pub fn empty(game_id: GameId) -> Self {
        Self {
            game_id,
            nodes: Vec::new(),
            node_index: HashMap::new(),
            gates: Vec::new(),
            gate_index: HashMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
        }
    }

    /// Build a snapshot from storage data.
    ///
    /// Gate endpoints that are not listed as challenges become implicit nodes,
    /// so forward references resolve like any other challenge.
    ///
    /// # Errors
    /// `DomainError::Constraint` when a challenge or gate is scoped to another
    /// game, or when a challenge id or gate id appears twice.
    ///
    /// Acyclicity is NOT checked here; see `find_cycle`.
    pub fn build(game_id: GameId, data: GraphData) -> Result<Self, DomainError> {
        let mut snapshot = Self::empty(game_id);

        for node in data.challenges {
            if node.game_id() != game_id {
                return Err(DomainError::constraint(format!(
                    "Challenge {} belongs to game {}, not {}",
                    node.id(),
                    node.game_id(),
                    game_id
                )));
            }
            if snapshot.node_index.contains_key(&node.id()) {
                return Err(DomainError::constraint(format!(
                    "Duplicate challenge {} in game {}",
                    node.id(),
                    game_id
                )));
            }
            snapshot.push_node(node);
        }

        for gate in data.gates {
            snapshot.push_gate(gate)?;
        }

        Ok(snapshot)
    }

    fn push_node(&mut self, node: ChallengeNode) {
        self.node_index.insert(node.id(), self.nodes.len());
        self.nodes.push(node);
    }

    fn ensure_node(&mut self, id: ChallengeId) {
        if !self.node_index.contains_key(&id) {
            self.push_node(ChallengeNode::new(id, self.game_id));
        }
    }

    fn push_gate(&mut self, gate: Gate) -> Result<(), DomainError> {
        if gate.game_id() != self.game_id {
            return Err(DomainError::constraint(format!(
                "Gate {} belongs to game {}, not {}",
                gate.id(),
                gate.game_id(),
                self.game_id
            )));
        }
        if self.gate_index.contains_key(&gate.id()) {
            return Err(DomainError::constraint(format!(
                "Duplicate gate {} in game {}",
                gate.id(),
                self.game_id
            )));
        }

        let source = gate.source_challenge_id();
        let target = gate.target_challenge_id();
        self.ensure_node(source);
        self.ensure_node(target);

        let index = self.gates.len();
        self.gate_index.insert(gate.id(), index);
        self.outgoing.entry(source).or_default().push(index);
        self.incoming.entry(target).or_default().push(index);
        self.gates.push(gate);
        Ok(())
    }

    // === Accessors ===

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    /// All challenges, listed ones first, then implicit gate endpoints.
    pub fn challenges(&self) -> &[ChallengeNode] {
        &self.nodes
    }

    pub fn challenge(&self, id: ChallengeId) -> Option<&ChallengeNode> {
        self.node_index.get(&id).and_then(|&i| self.nodes.get(i))
    }

    pub fn contains_challenge(&self, id: ChallengeId) -> bool {
        self.node_index.contains_key(&id)
    }

    pub fn gates(&self) -> &[Gate] {
        &self.gates
    }

    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gate_index.get(&id).and_then(|&i| self.gates.get(i))
    }

    /// Gates whose prerequisite is `id`.
    pub fn dependents_of(&self, id: ChallengeId) -> impl Iterator<Item = &Gate> + '_ {
        self.outgoing
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.gates.get(i))
    }

    /// Gates that must be evaluated to unlock `id`.
    pub fn prerequisites_of(&self, id: ChallengeId) -> impl Iterator<Item = &Gate> + '_ {
        self.incoming
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(|&i| self.gates.get(i))
    }

    /// The `nth` gate leaving `id`, in O(1).
    pub(crate) fn dependent_gate(&self, id: ChallengeId, nth: usize) -> Option<&Gate> {
        self.outgoing
            .get(&id)
            .and_then(|indexes| indexes.get(nth))
            .and_then(|&i| self.gates.get(i))
    }

    // === Derivation ===

    /// Copy of the snapshot's contents in storage form.
    pub fn to_data(&self) -> GraphData {
        GraphData::new(self.nodes.clone(), self.gates.clone())
    }

    /// New snapshot with `gate` appended.
    pub fn with_gate(&self, gate: Gate) -> Result<Self, DomainError> {
        let mut data = self.to_data();
        data.gates.push(gate);
        Self::build(self.game_id, data)
    }

    /// New snapshot without the gate `id`.
    pub fn without_gate(&self, id: GateId) -> Result<Self, DomainError> {
        if !self.gate_index.contains_key(&id) {
            return Err(DomainError::not_found("Gate", id.to_string()));
        }
        let mut data = self.to_data();
        data.gates.retain(|gate| gate.id() != id);
        Self::build(self.game_id, data)
    }

    /// New snapshot where the gate sharing `gate`'s id is replaced in place.
    pub fn with_replaced_gate(&self, gate: Gate) -> Result<Self, DomainError> {
        let Some(&index) = self.gate_index.get(&gate.id()) else {
            return Err(DomainError::not_found("Gate", gate.id().to_string()));
        };
        let mut data = self.to_data();
        if let Some(slot) = data.gates.get_mut(index) {
            *slot = gate;
        }
        Self::build(self.game_id, data)
    }
}
