//! Transporter and vehicle reference data.

pub mod gateway;
pub mod model;

pub use gateway::TransporterGateway;
pub use model::{Transporter, Vehicle};
