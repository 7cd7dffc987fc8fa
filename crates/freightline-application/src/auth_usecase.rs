//! Login, logout and account-switch use cases.

use freightline_core::auth::{AuthGateway, LoginRequest};
use freightline_core::error::Result;
use freightline_core::session::SessionManager;
use std::sync::Arc;

/// Orchestrates the authentication flows over the remote gateway and
/// the session core.
pub struct AuthUseCase {
    gateway: Arc<dyn AuthGateway>,
    session: Arc<SessionManager>,
}

impl AuthUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>, session: Arc<SessionManager>) -> Self {
        Self { gateway, session }
    }

    /// Logs in with email and password. On success the identity is
    /// registered and made active, and the caller gets the dashboard
    /// route for its role.
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let outcome = self
            .gateway
            .login(&LoginRequest {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await?;
        let route = outcome.identity.role.dashboard_route().to_string();
        self.session
            .login(outcome.identity, outcome.credential)
            .await?;
        Ok(route)
    }

    /// Logs one identity out. Logging out an unknown identity is a
    /// no-op.
    pub async fn logout(&self, identity_id: i64) -> Result<()> {
        self.session.logout(identity_id).await
    }

    /// Makes an already-registered identity the active one and returns
    /// its dashboard route.
    pub async fn switch_account(&self, identity_id: i64) -> Result<String> {
        self.session.switch_active(identity_id).await?;
        let identity = self
            .session
            .identity(identity_id)
            .await
            .ok_or_else(|| freightline_core::FreightlineError::unknown_identity(identity_id))?;
        Ok(identity.role.dashboard_route().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use freightline_core::FreightlineError;
    use freightline_core::auth::LoginOutcome;
    use freightline_core::identity::{Credential, Identity, Role};
    use freightline_core::session::model::SessionState;
    use freightline_core::session::repository::SessionStateRepository;
    use std::collections::HashMap;
    use std::sync::Mutex;

    struct NullRepository;

    #[async_trait]
    impl SessionStateRepository for NullRepository {
        async fn load(&self) -> Result<Option<SessionState>> {
            Ok(None)
        }

        async fn save(&self, _state: &SessionState) -> Result<()> {
            Ok(())
        }
    }

    /// Mock auth backend keyed by email.
    struct MockAuthGateway {
        accounts: Mutex<HashMap<String, (Identity, Credential)>>,
    }

    impl MockAuthGateway {
        fn with_account(email: &str, identity: Identity, credential: Credential) -> Self {
            let mut accounts = HashMap::new();
            accounts.insert(email.to_string(), (identity, credential));
            Self {
                accounts: Mutex::new(accounts),
            }
        }
    }

    #[async_trait]
    impl AuthGateway for MockAuthGateway {
        async fn login(&self, request: &LoginRequest) -> Result<LoginOutcome> {
            let accounts = self.accounts.lock().unwrap();
            let (identity, credential) = accounts
                .get(&request.email)
                .cloned()
                .ok_or_else(|| FreightlineError::invalid_credential("unknown account"))?;
            Ok(LoginOutcome {
                identity,
                credential,
            })
        }
    }

    fn identity(id: i64, role: Role) -> Identity {
        Identity {
            id,
            name: format!("user-{}", id),
            email: format!("user-{}@example.com", id),
            role,
        }
    }

    #[tokio::test]
    async fn test_login_registers_identity_and_returns_role_route() {
        let session = Arc::new(SessionManager::new(Arc::new(NullRepository)));
        let gateway = Arc::new(MockAuthGateway::with_account(
            "ava@example.com",
            identity(42, Role::Vendor),
            Credential::new("tok-42"),
        ));
        let auth = AuthUseCase::new(gateway, session.clone());

        let route = auth.login("ava@example.com", "hunter2").await.unwrap();
        assert_eq!(route, "/dashboard/vendor");
        assert_eq!(session.active_id().await, Some(42));
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_untouched() {
        let session = Arc::new(SessionManager::new(Arc::new(NullRepository)));
        let gateway = Arc::new(MockAuthGateway::with_account(
            "ava@example.com",
            identity(42, Role::Vendor),
            Credential::new("tok-42"),
        ));
        let auth = AuthUseCase::new(gateway, session.clone());

        let err = auth.login("nobody@example.com", "pw").await.unwrap_err();
        assert!(matches!(err, FreightlineError::InvalidCredential(_)));
        assert!(session.snapshot().await.is_empty());
    }

    #[tokio::test]
    async fn test_switch_account_returns_the_new_actives_route() {
        let session = Arc::new(SessionManager::new(Arc::new(NullRepository)));
        session
            .login(identity(42, Role::Vendor), Credential::new("tok-42"))
            .await
            .unwrap();
        session
            .login(identity(7, Role::Admin), Credential::new("tok-7"))
            .await
            .unwrap();
        let gateway = Arc::new(MockAuthGateway::with_account(
            "unused@example.com",
            identity(1, Role::Vendor),
            Credential::new("t"),
        ));
        let auth = AuthUseCase::new(gateway, session.clone());

        let route = auth.switch_account(42).await.unwrap();
        assert_eq!(route, "/dashboard/vendor");
        assert_eq!(session.active_id().await, Some(42));

        let err = auth.switch_account(999).await.unwrap_err();
        assert!(err.is_unknown_identity());
    }
}
