//! HTTP implementation of the authentication gateway.

use crate::api_client::ApiClient;
use async_trait::async_trait;
use freightline_core::auth::{AuthGateway, LoginOutcome, LoginRequest};
use freightline_core::error::{FreightlineError, Result};
use freightline_core::identity::{Credential, Identity, Role};
use serde::Deserialize;

/// Login response wire shape.
///
/// The backend reports the account's email nowhere in this payload; the
/// identity record reuses the email the user logged in with.
#[derive(Debug, Deserialize)]
struct LoginResponse {
    #[serde(rename = "userId")]
    user_id: i64,
    access_token: String,
    role: Role,
    name: String,
}

pub struct HttpAuthGateway {
    client: ApiClient,
}

impl HttpAuthGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for HttpAuthGateway {
    async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome> {
        let response: LoginResponse = self.client.post_json("/auth/login", request).await?;
        if response.user_id <= 0 || response.access_token.is_empty() {
            return Err(FreightlineError::invalid_credential(
                "login response is missing a user id or access token",
            ));
        }

        tracing::info!(user_id = response.user_id, "remote login succeeded");
        Ok(LoginOutcome {
            identity: Identity {
                id: response.user_id,
                name: response.name,
                email: request.email.clone(),
                role: response.role,
            },
            credential: Credential::new(response.access_token),
        })
    }
}
