//! In-memory state storage modules.
//!
//! Stores manage runtime state that doesn't belong in the database:
//! - `SnapshotStore` - Committed graph snapshot per game
//! - `MutationGate` - Per-game mutation exclusion

pub mod mutation_gate;
pub mod snapshot;

// Re-export store types
pub use mutation_gate::{MutationGate, MutationPermit};
pub use snapshot::SnapshotStore;
