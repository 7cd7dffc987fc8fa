//! Freightline infrastructure: storage and HTTP implementations.
//!
//! File-backed persistence for the session record, platform path
//! resolution, API configuration, and the reqwest-based gateways that
//! talk to the remote collaborator with the active identity's bearer
//! credential attached per call.

pub mod api_client;
pub mod auth_gateway;
pub mod config;
pub mod order_gateway;
pub mod paths;
pub mod session_store;
pub mod shipment_gateway;
pub mod transporter_gateway;

pub use crate::api_client::ApiClient;
pub use crate::auth_gateway::HttpAuthGateway;
pub use crate::config::ApiConfig;
pub use crate::order_gateway::HttpOrderGateway;
pub use crate::session_store::{JsonSessionStore, PersistScope};
pub use crate::shipment_gateway::HttpShipmentGateway;
pub use crate::transporter_gateway::HttpTransporterGateway;
