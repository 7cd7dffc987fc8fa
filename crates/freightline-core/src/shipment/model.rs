//! Shipment domain model.

use serde::{Deserialize, Serialize};

/// A shipment record, created exactly once per order.
///
/// The existence of a shipment is what moves the source order to
/// `Shipped`; shipments are never created directly by a status edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub id: i64,
    /// The order this shipment carries.
    pub order_id: i64,
    /// The vehicle assigned to carry it.
    pub vehicle_id: i64,
    /// The transporter the vehicle belongs to.
    pub transporter_id: i64,
    /// Carrier-side status string, opaque to this core.
    #[serde(default)]
    pub status: String,
    /// RFC 3339 creation timestamp, as reported by the backend.
    pub created_at: String,
}

/// Payload for creating a shipment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentRequest {
    pub order_id: i64,
    pub vehicle_id: i64,
    /// The transporter's backing user account, as the backend expects it.
    pub user_id: i64,
}
