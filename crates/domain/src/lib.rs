pub mod entities;
pub mod error;
pub mod gate_graph;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{ChallengeNode, Gate, GateCondition};

pub use error::DomainError;

// Re-export graph snapshot and algorithms
pub use gate_graph::{detect_cycle, find_cycle, AvailabilityResolver, GraphSnapshot};

// Re-export ID types
pub use ids::{ChallengeId, GameId, GateId, TeamId};

// Re-export value objects
pub use value_objects::{
    AvailabilityResult, CyclePath, GateCombination, GraphData, TeamProgress, TeamProgressFact,
};
