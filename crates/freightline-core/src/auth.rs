//! Authentication gateway trait.
//!
//! The client never verifies passwords or issues tokens; it hands the
//! entered credentials to the remote collaborator and consumes whatever
//! identity and bearer token come back.

use crate::error::Result;
use crate::identity::{Credential, Identity};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Login form payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// A successful remote login: the issued identity plus its bearer token.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub identity: Identity,
    pub credential: Credential,
}

/// An abstract client for the remote authentication collaborator.
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges email/password for an identity and credential.
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome>;
}
