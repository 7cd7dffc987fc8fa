//! Authenticated HTTP client.
//!
//! The single interception point every outbound call goes through. The
//! bearer header is resolved from the session manager at call time, not
//! at construction, because the active identity can change between
//! calls; nothing here caches a credential beyond one call's lifetime.

use crate::config::ApiConfig;
use freightline_core::error::{FreightlineError, Result};
use freightline_core::session::SessionManager;
use reqwest::Method;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use uuid::Uuid;

/// HTTP client for the remote collaborator.
///
/// Cheap to clone via the inner reqwest client; all gateways share one
/// instance.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<SessionManager>,
}

impl ApiClient {
    /// Builds a client from resolved configuration.
    pub fn new(config: &ApiConfig, session: Arc<SessionManager>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FreightlineError::transport(e.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Resolves the authorization header for one outbound call.
    ///
    /// Attaches the active identity's bearer token when a usable one
    /// exists; otherwise any previously-set authorization header is
    /// removed rather than sent stale.
    pub async fn apply_authorization(&self, headers: &mut HeaderMap) {
        match self.session.active_credential().await {
            Some(credential) if credential.is_usable() => {
                if credential.looks_expired() {
                    tracing::warn!(
                        "bearer token looks expired; sending anyway, the server is authoritative"
                    );
                }
                match HeaderValue::from_str(&format!("Bearer {}", credential.token())) {
                    Ok(value) => {
                        headers.insert(AUTHORIZATION, value);
                    }
                    Err(_) => {
                        tracing::warn!("bearer token is not a valid header value, stripping");
                        headers.remove(AUTHORIZATION);
                    }
                }
            }
            _ => {
                headers.remove(AUTHORIZATION);
            }
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let request_id = Uuid::new_v4();
        let url = format!("{}{}", self.base_url, path);

        let mut headers = HeaderMap::new();
        self.apply_authorization(&mut headers).await;
        tracing::debug!(
            %request_id,
            %method,
            path,
            authenticated = headers.contains_key(AUTHORIZATION),
            "outbound request"
        );

        let mut builder = self.http.request(method, url).headers(headers);
        if let Some(body) = body {
            builder = builder.json(&body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FreightlineError::transport(format!("{}: {}", path, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::warn!(%request_id, %status, path, "request rejected");
            return Err(FreightlineError::transport(format!(
                "{} {}: {}",
                status, path, detail
            )));
        }
        Ok(response)
    }

    async fn parse<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        response
            .json::<T>()
            .await
            .map_err(|e| FreightlineError::Serialization {
                format: "JSON".to_string(),
                message: e.to_string(),
            })
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(Method::GET, path, None).await?;
        Self::parse(response).await
    }

    pub(crate) async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::POST, path, Some(body)).await?;
        Self::parse(response).await
    }

    pub(crate) async fn patch_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(Method::PATCH, path, Some(body)).await?;
        Self::parse(response).await
    }
}
