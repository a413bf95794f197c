//! Use cases - orchestration over the domain graph and its collaborators.

pub mod gate_graph;

pub use gate_graph::{GateGraphError, GateGraphService};
