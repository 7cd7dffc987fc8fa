//! Shipment gateway trait.

use super::model::{Shipment, ShipmentRequest};
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the remote shipment collaborator.
#[async_trait]
pub trait ShipmentGateway: Send + Sync {
    /// Lists shipments visible to the identity the request is issued for.
    async fn list_shipments(&self) -> Result<Vec<Shipment>>;

    /// Creates the shipment binding an order to a transporter's vehicle.
    async fn create_shipment(&self, request: &ShipmentRequest) -> Result<Shipment>;
}
