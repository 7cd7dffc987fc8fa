//! Process bootstrap: composition root and session rehydration.
//!
//! Builds the object graph (store, session manager, HTTP client and
//! gateways, services), restores persisted state, and opens the
//! rehydration gate. The gate opens unconditionally at the end of
//! rehydration, load failure included: a corrupt session file must
//! leave the process usable as logged-out, not wedged in `Loading`.

use freightline_core::error::Result;
use freightline_core::rehydration::RehydrationGate;
use freightline_core::session::SessionManager;
use freightline_core::session::repository::SessionStateRepository;
use freightline_infrastructure::{
    ApiClient, ApiConfig, HttpAuthGateway, HttpOrderGateway, HttpShipmentGateway,
    HttpTransporterGateway, JsonSessionStore, PersistScope,
};
use std::sync::Arc;

use crate::assignment::AssignmentWorkflow;
use crate::auth_usecase::AuthUseCase;
use crate::orders::OrderService;
use crate::route_guard::RouteGuard;

/// Restores persisted session state into the manager, restores the
/// order cache when one is wired, and opens the gate.
///
/// A load error is logged and tolerated; the process starts empty. The
/// restored state is installed without re-persisting, so a read-only
/// storage location does not fail startup.
pub async fn rehydrate(
    session: &SessionManager,
    repository: &dyn SessionStateRepository,
    orders: Option<&OrderService>,
    gate: &RehydrationGate,
) -> Result<()> {
    match repository.load().await {
        Ok(Some(state)) => {
            tracing::info!(
                identities = state.identities.len(),
                "restoring persisted session state"
            );
            session.replace_state(state).await;
        }
        Ok(None) => {
            tracing::debug!("no persisted session state, starting empty");
        }
        Err(e) => {
            tracing::warn!(error = %e, "session rehydration failed, starting empty");
        }
    }

    if let Some(orders) = orders {
        if let Err(e) = orders.restore_cache().await {
            tracing::warn!(error = %e, "order cache restore failed, starting with an empty cache");
        }
    }

    gate.open();
    Ok(())
}

/// The fully wired application: session core, use cases and services.
pub struct AppContext {
    pub session: Arc<SessionManager>,
    pub gate: RehydrationGate,
    pub auth: AuthUseCase,
    pub orders: Arc<OrderService>,
    pub route_guard: RouteGuard,
    transporters_gateway: Arc<HttpTransporterGateway>,
    shipments_gateway: Arc<HttpShipmentGateway>,
}

impl AppContext {
    /// Builds and rehydrates the whole graph against the platform
    /// default storage location.
    pub async fn initialize(config: ApiConfig, scope: PersistScope) -> Result<Self> {
        let store = Arc::new(JsonSessionStore::default_location(scope)?);
        Self::initialize_with_store(config, store).await
    }

    /// Like [`AppContext::initialize`], with an explicit store. Used by
    /// tests and embedders that manage their own storage path.
    pub async fn initialize_with_store(
        config: ApiConfig,
        store: Arc<JsonSessionStore>,
    ) -> Result<Self> {
        let session = Arc::new(SessionManager::new(store.clone()));
        let gate = RehydrationGate::new();

        let client = ApiClient::new(&config, session.clone())?;
        let auth = AuthUseCase::new(
            Arc::new(HttpAuthGateway::new(client.clone())),
            session.clone(),
        );
        let orders = Arc::new(OrderService::with_cache_repository(
            Arc::new(HttpOrderGateway::new(client.clone())),
            session.clone(),
            gate.clone(),
            store.clone(),
        ));
        let transporters_gateway = Arc::new(HttpTransporterGateway::new(client.clone()));
        let shipments_gateway = Arc::new(HttpShipmentGateway::new(client));
        let route_guard = RouteGuard::new(session.clone(), gate.clone());

        rehydrate(&session, store.as_ref(), Some(&orders), &gate).await?;

        Ok(Self {
            session,
            gate,
            auth,
            orders,
            route_guard,
            transporters_gateway,
            shipments_gateway,
        })
    }

    /// Starts a fresh assignment workflow for one order.
    pub fn assignment_for(&self, order_id: i64) -> AssignmentWorkflow {
        AssignmentWorkflow::new(
            order_id,
            self.transporters_gateway.clone(),
            self.shipments_gateway.clone(),
            self.orders.clone(),
            self.gate.clone(),
        )
    }
}
