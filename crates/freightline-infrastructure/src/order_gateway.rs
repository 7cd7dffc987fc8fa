//! HTTP implementation of the order gateway.

use crate::api_client::ApiClient;
use async_trait::async_trait;
use freightline_core::error::Result;
use freightline_core::order::gateway::{NewOrder, OrderGateway};
use freightline_core::order::model::{Order, OrderStatus};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct StatusPatch {
    status: OrderStatus,
}

pub struct HttpOrderGateway {
    client: ApiClient,
}

impl HttpOrderGateway {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl OrderGateway for HttpOrderGateway {
    async fn fetch_orders(&self) -> Result<Vec<Order>> {
        self.client.get_json("/orders/mine").await
    }

    async fn create_order(&self, order: &NewOrder) -> Result<Order> {
        self.client.post_json("/orders", order).await
    }

    async fn update_status(&self, order_id: i64, status: OrderStatus) -> Result<Order> {
        let path = format!("/orders/{}/status", order_id);
        self.client.patch_json(&path, &StatusPatch { status }).await
    }
}
