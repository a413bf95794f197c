//! Infrastructure: collaborator ports, in-memory adapters, configuration and
//! tracing setup.

pub mod config;
pub mod memory;
pub mod ports;
pub mod telemetry;
