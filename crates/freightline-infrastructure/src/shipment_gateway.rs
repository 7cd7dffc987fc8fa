//! HTTP implementation of the shipment gateway.

use crate::api_client::ApiClient;
use async_trait::async_trait;
use freightline_core::error::Result;
use freightline_core::shipment::gateway::ShipmentGateway;
use freightline_core::shipment::model::{Shipment, ShipmentRequest};

pub struct HttpShipmentGateway {
    client: ApiClient,
}

impl HttpShipmentGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ShipmentGateway for HttpShipmentGateway {
    async fn list_shipments(&self) -> Result<Vec<Shipment>> {
        self.client.get_json("/shipments").await
    }

    async fn create_shipment(&self, request: &ShipmentRequest) -> Result<Shipment> {
        self.client.post_json("/shipments", request).await
    }
}
