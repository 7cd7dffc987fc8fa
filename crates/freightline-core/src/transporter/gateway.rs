//! Transporter gateway trait.

use super::model::Transporter;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract client for the transporter reference-data collaborator.
#[async_trait]
pub trait TransporterGateway: Send + Sync {
    /// Fetches all transporters with their vehicles embedded.
    ///
    /// One batched call; implementations must not fan out per
    /// transporter.
    async fn fetch_with_vehicles(&self) -> Result<Vec<Transporter>>;
}
