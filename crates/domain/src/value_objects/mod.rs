//! Value objects - Immutable objects defined by their attributes

mod availability;
mod combination;
mod cycle_path;
mod graph_data;
mod progress;

pub use availability::AvailabilityResult;
pub use combination::GateCombination;
pub use cycle_path::CyclePath;
pub use graph_data::GraphData;
pub use progress::{TeamProgress, TeamProgressFact};
