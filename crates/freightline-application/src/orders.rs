//! Per-identity order service and lifecycle transitions.
//!
//! The order cache is an arena keyed by identity id so one account's
//! orders never leak into another account's view after a switch. Every
//! fetch is tagged with the identity id that was active when it was
//! issued; a result arriving after that identity has logged out is
//! discarded instead of being written into the wrong slot.

use freightline_core::error::{FreightlineError, Result};
use freightline_core::order::cache::OrderCacheRepository;
use freightline_core::order::gateway::OrderGateway;
use freightline_core::order::model::{Order, OrderStatus};
use freightline_core::rehydration::RehydrationGate;
use freightline_core::session::SessionManager;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cached, eventually-consistent view of the remote order collection,
/// scoped per identity, plus the status transition operations.
pub struct OrderService {
    gateway: Arc<dyn OrderGateway>,
    session: Arc<SessionManager>,
    gate: RehydrationGate,
    /// Order arena keyed by identity id.
    cache: RwLock<HashMap<i64, Vec<Order>>>,
    /// Optional durable backing for the cache; wired only when the
    /// persistence scope includes orders.
    cache_repository: Option<Arc<dyn OrderCacheRepository>>,
}

impl OrderService {
    pub fn new(
        gateway: Arc<dyn OrderGateway>,
        session: Arc<SessionManager>,
        gate: RehydrationGate,
    ) -> Self {
        Self {
            gateway,
            session,
            gate,
            cache: RwLock::new(HashMap::new()),
            cache_repository: None,
        }
    }

    /// Like [`OrderService::new`], with the cache written through to a
    /// durable repository.
    pub fn with_cache_repository(
        gateway: Arc<dyn OrderGateway>,
        session: Arc<SessionManager>,
        gate: RehydrationGate,
        cache_repository: Arc<dyn OrderCacheRepository>,
    ) -> Self {
        Self {
            cache_repository: Some(cache_repository),
            ..Self::new(gateway, session, gate)
        }
    }

    /// Restores a persisted cache snapshot, if the repository has one.
    ///
    /// Called during bootstrap, before the rehydration gate opens.
    pub async fn restore_cache(&self) -> Result<()> {
        let Some(repository) = &self.cache_repository else {
            return Ok(());
        };
        if let Some(orders) = repository.load_orders().await? {
            *self.cache.write().await = orders;
            tracing::debug!("order cache restored from durable storage");
        }
        Ok(())
    }

    /// Refetches the active identity's orders from the remote
    /// collaborator.
    ///
    /// Waits for the rehydration gate, then tags the fetch with the
    /// identity active at issue time. The result is written only into
    /// that identity's cache slot, and discarded entirely if the
    /// identity has been logged out by the time it arrives.
    pub async fn refresh(&self) -> Result<()> {
        self.gate.ready().await;
        let issued_for = self
            .session
            .active_id()
            .await
            .ok_or_else(|| FreightlineError::internal("order refresh requires an active identity"))?;

        let orders = self.gateway.fetch_orders().await?;

        if !self.session.contains(issued_for).await {
            tracing::debug!(
                identity_id = issued_for,
                "discarding order fetch result for a logged-out identity"
            );
            return Ok(());
        }

        let mut cache = self.cache.write().await;
        cache.insert(issued_for, orders);
        self.persist_cache(&cache).await;
        Ok(())
    }

    /// The cached orders of one identity.
    pub async fn orders_for(&self, identity_id: i64) -> Vec<Order> {
        self.cache
            .read()
            .await
            .get(&identity_id)
            .cloned()
            .unwrap_or_default()
    }

    /// The cached orders of the currently active identity.
    pub async fn active_orders(&self) -> Vec<Order> {
        match self.session.active_id().await {
            Some(id) => self.orders_for(id).await,
            None => Vec::new(),
        }
    }

    /// A full copy of the cache arena, keyed by identity id.
    pub async fn snapshot(&self) -> HashMap<i64, Vec<Order>> {
        self.cache.read().await.clone()
    }

    /// One cached order of the active identity, by id.
    pub async fn order(&self, order_id: i64) -> Option<Order> {
        self.active_orders()
            .await
            .into_iter()
            .find(|order| order.id == order_id)
    }

    /// Drives a status transition for one of the active identity's
    /// orders.
    ///
    /// Enforces the state machine (terminal states accept nothing),
    /// applies the new status optimistically, then performs the remote
    /// write. On remote failure the cache entry rolls back to its
    /// pre-transition value and the caller gets
    /// [`FreightlineError::StatusUpdateFailed`].
    pub async fn set_status(&self, order_id: i64, status: OrderStatus) -> Result<Order> {
        self.gate.ready().await;
        let identity_id = self.session.active_id().await.ok_or_else(|| {
            FreightlineError::internal("status transition requires an active identity")
        })?;

        // The write lock is held across the remote call so concurrent
        // transitions on the same cache are applied one at a time.
        let mut cache = self.cache.write().await;
        let orders = cache
            .get_mut(&identity_id)
            .ok_or_else(|| FreightlineError::not_found("order", order_id.to_string()))?;
        let index = orders
            .iter()
            .position(|order| order.id == order_id)
            .ok_or_else(|| FreightlineError::not_found("order", order_id.to_string()))?;

        let previous = orders[index].clone();
        if !previous.status.can_transition_to(status) {
            return Err(FreightlineError::InvalidTransition {
                from: previous.status,
                to: status,
            });
        }

        orders[index].status = status;
        match self.gateway.update_status(order_id, status).await {
            Ok(updated) => {
                orders[index] = updated.clone();
                tracing::info!(order_id, ?status, "order status transitioned");
                self.persist_cache(&cache).await;
                Ok(updated)
            }
            Err(e) => {
                orders[index] = previous.clone();
                tracing::warn!(order_id, error = %e, "status transition rejected, cache rolled back");
                Err(FreightlineError::StatusUpdateFailed {
                    order_id,
                    from: previous.status,
                    to: status,
                    message: e.to_string(),
                })
            }
        }
    }

    async fn persist_cache(&self, cache: &HashMap<i64, Vec<Order>>) {
        if let Some(repository) = &self.cache_repository {
            if let Err(e) = repository.save_orders(cache).await {
                tracing::warn!(error = %e, "failed to persist order cache snapshot");
            }
        }
    }
}
