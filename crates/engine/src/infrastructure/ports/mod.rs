//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Gate storage (load a game's graph, persist accepted mutations)
//! - Team progress (completion, score and override facts)

mod error;
mod repos;

// =============================================================================
// Collaborator Ports
// =============================================================================
pub use repos::{GateRepo, ProgressRepo};

// =============================================================================
// Test-Only Mock Repositories (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockGateRepo, MockProgressRepo};

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
