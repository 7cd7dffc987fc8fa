//! Error types for the Freightline client core.

use crate::order::model::OrderStatus;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the session and order-lifecycle core.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum FreightlineError {
    /// Malformed login payload (missing identity id or empty bearer token).
    /// Surfaced to the caller immediately, never retried.
    #[error("Invalid credential: {0}")]
    InvalidCredential(String),

    /// A switch was requested to an identity that is not registered.
    /// Programming/UI error, surfaced, not retried.
    #[error("Unknown identity: {identity_id}")]
    UnknownIdentity { identity_id: i64 },

    /// The remote collaborator rejected an order status transition.
    /// The local cache has been rolled back; the caller may retry.
    #[error("Status update failed for order {order_id} ({from:?} -> {to:?}): {message}")]
    StatusUpdateFailed {
        order_id: i64,
        from: OrderStatus,
        to: OrderStatus,
        message: String,
    },

    /// A transition was attempted that the order state machine forbids.
    #[error("Invalid order status transition: {from:?} -> {to:?}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// Shipment submission was attempted without a full selection.
    /// Rejected before any network call.
    #[error("Incomplete shipment assignment: missing {missing}")]
    IncompleteAssignment { missing: &'static str },

    /// The remote collaborator rejected shipment creation. The workflow
    /// keeps its pre-submit selections; the caller may retry.
    #[error("Shipment assignment submit failed: {0}")]
    AssignmentSubmitFailed(String),

    /// Network-transport failure unrelated to business logic (timeout, 5xx).
    /// Retryable; pre-call cache state is left unchanged.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl FreightlineError {
    /// Creates an InvalidCredential error
    pub fn invalid_credential(message: impl Into<String>) -> Self {
        Self::InvalidCredential(message.into())
    }

    /// Creates an UnknownIdentity error
    pub fn unknown_identity(identity_id: i64) -> Self {
        Self::UnknownIdentity { identity_id }
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is an UnknownIdentity error
    pub fn is_unknown_identity(&self) -> bool {
        matches!(self, Self::UnknownIdentity { .. })
    }

    /// Check if this is an IncompleteAssignment error
    pub fn is_incomplete_assignment(&self) -> bool {
        matches!(self, Self::IncompleteAssignment { .. })
    }

    /// Check if this is a transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Whether a caller may reasonably retry the failed operation.
    ///
    /// Returns true for remote rejections and transport failures; input
    /// validation and state-machine violations are never retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::StatusUpdateFailed { .. } | Self::AssignmentSubmitFailed(_) | Self::Transport(_)
        )
    }
}

impl From<std::io::Error> for FreightlineError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for FreightlineError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

/// A type alias for `Result<T, FreightlineError>`.
pub type Result<T> = std::result::Result<T, FreightlineError>;
