//! Gate dependency graph: snapshots and the pure algorithms run against them.

mod availability;
mod cycle;
mod snapshot;

pub use availability::AvailabilityResolver;
pub use cycle::{detect_cycle, find_cycle};
pub use snapshot::GraphSnapshot;
