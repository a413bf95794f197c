//! Domain entities - Core business objects with identity

mod challenge_node;
mod gate;

pub use challenge_node::ChallengeNode;
pub use gate::{Gate, GateCondition};
