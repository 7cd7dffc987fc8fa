//! Freightline core: session and order-lifecycle domain layer.
//!
//! Domain models, the shared error type, the session manager, the order
//! status state machine, route authorization and the gateway traits that
//! abstract the remote collaborator. No I/O lives here; the
//! infrastructure crate supplies storage and HTTP implementations.

pub mod auth;
pub mod error;
pub mod identity;
pub mod order;
pub mod rehydration;
pub mod routing;
pub mod session;
pub mod shipment;
pub mod transporter;

// Re-export common error type
pub use error::{FreightlineError, Result};
