//! Order domain model and status state machine.
//!
//! Orders are owned by the remote collaborator; the client holds an
//! eventually-consistent cached copy per identity. Status is only ever
//! mutated through the lifecycle operations, never by editing a record.

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// `Pending` and `Shipped` are the non-terminal states. `Delivered` and
/// `Cancelled` are terminal: no transition leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Pending,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Whether no further transition is permitted out of this state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether the state machine permits moving from `self` to `next`.
    ///
    /// Any non-terminal state may move to any other state (manual operator
    /// overrides go straight to `Delivered` or `Cancelled`); a transition
    /// to the current state is not a transition.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        !self.is_terminal() && *self != next
    }
}

/// Delivery address attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryLocation {
    #[serde(default)]
    pub house: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub country: String,
}

/// One ordered product line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: i64,
    pub quantity: u32,
    pub unit_price: f64,
}

/// An order as returned by the remote collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub status: OrderStatus,
    pub total_amount: f64,
    /// RFC 3339 creation timestamp, as reported by the backend.
    pub created_at: String,
    /// Vendor account that created the order.
    pub vendor_id: i64,
    /// Warehouse the order ships from.
    pub warehouse_id: i64,
    #[serde(default)]
    pub location: Option<DeliveryLocation>,
    #[serde(default)]
    pub items: Vec<LineItem>,
}
