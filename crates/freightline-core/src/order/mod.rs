//! Order domain models and remote gateway.

pub mod cache;
pub mod gateway;
pub mod model;

pub use cache::OrderCacheRepository;
pub use gateway::OrderGateway;
pub use model::{DeliveryLocation, LineItem, Order, OrderStatus};
