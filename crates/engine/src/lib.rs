//! Gate graph engine library.
//!
//! Maintains one acyclic graph of gates per game and answers which challenges
//! a team has unlocked.
//!
//! ## Structure
//!
//! - `use_cases/` - Gate mutations and availability queries
//! - `stores/` - Per-game snapshot cache and mutation admission
//! - `infrastructure/` - Collaborator ports, in-memory adapters, config and telemetry
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

/// Test fixtures shared by unit and concurrency tests.
#[cfg(test)]
pub mod test_fixtures;

pub use app::App;
