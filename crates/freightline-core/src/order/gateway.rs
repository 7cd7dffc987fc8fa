//! Order gateway trait.
//!
//! Abstracts the remote order collaborator. Implementations attach the
//! active identity's bearer credential at call time; the server scopes
//! `fetch_orders` to whoever that credential belongs to.

use super::model::{DeliveryLocation, LineItem, Order, OrderStatus};
use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Payload for creating a new order (the vendor-side action).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOrder {
    pub warehouse_id: i64,
    pub location: DeliveryLocation,
    pub items: Vec<LineItem>,
}

/// An abstract client for the remote order collaborator.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Fetches the orders of the identity the request is issued for.
    async fn fetch_orders(&self) -> Result<Vec<Order>>;

    /// Creates an order; the server sets the initial `Pending` status.
    async fn create_order(&self, order: &NewOrder) -> Result<Order>;

    /// Writes a status transition and returns the updated order.
    ///
    /// Implementations must not touch any local cache; rollback on
    /// failure is the caller's responsibility.
    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<Order>;
}
