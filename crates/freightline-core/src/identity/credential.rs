//! Bearer credential wrapper.
//!
//! Credentials are opaque strings issued by the remote collaborator. The
//! client never enforces expiry; `expiry_hint` exists purely so callers can
//! log a warning before sending a token the server will reject anyway.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

/// An opaque bearer token, associated 1:1 with an identity id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential {
    token: String,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// The raw bearer string, exactly as issued.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Whether this credential should be attached to outbound requests.
    ///
    /// The reference client persisted through a string-typed storage layer,
    /// so the literal sentinels "null" and "undefined" could leak into the
    /// token slot; those must never be sent as a bearer header.
    pub fn is_usable(&self) -> bool {
        !self.token.is_empty() && self.token != "null" && self.token != "undefined"
    }

    /// Best-effort decode of a JWT `exp` claim, as epoch seconds.
    ///
    /// Diagnostic only. Returns `None` for non-JWT tokens or tokens without
    /// an `exp` claim; the server stays authoritative for expiry either way.
    pub fn expiry_hint(&self) -> Option<i64> {
        let payload = self.token.split('.').nth(1)?;
        let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
        let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
        claims.get("exp")?.as_i64()
    }

    /// Whether `expiry_hint` says this token is already past its expiry.
    ///
    /// False when no hint can be decoded.
    pub fn looks_expired(&self) -> bool {
        match self.expiry_hint() {
            Some(exp) => exp < chrono::Utc::now().timestamp(),
            None => false,
        }
    }
}
