//! HTTP implementation of the transporter gateway.

use crate::api_client::ApiClient;
use async_trait::async_trait;
use freightline_core::error::Result;
use freightline_core::transporter::gateway::TransporterGateway;
use freightline_core::transporter::model::Transporter;

pub struct HttpTransporterGateway {
    client: ApiClient,
}

impl HttpTransporterGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransporterGateway for HttpTransporterGateway {
    /// One batched call returning every transporter with its vehicles
    /// embedded; vehicle selection later needs no further request.
    async fn fetch_with_vehicles(&self) -> Result<Vec<Transporter>> {
        self.client.get_json("/transporters-with-vehicles").await
    }
}
