//! Shipment domain model and remote gateway.

pub mod gateway;
pub mod model;

pub use gateway::ShipmentGateway;
pub use model::{Shipment, ShipmentRequest};
