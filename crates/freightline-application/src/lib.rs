//! Freightline application layer: use-case orchestration.
//!
//! Wires the session core, persistence and remote gateways together:
//! process bootstrap with rehydration gating, the login use case, the
//! per-identity order service with its lifecycle transitions, the
//! shipment assignment workflow, and the route guard.

pub mod assignment;
pub mod auth_usecase;
pub mod bootstrap;
pub mod orders;
pub mod route_guard;

pub use crate::assignment::{AssignmentOutcome, AssignmentStage, AssignmentWorkflow};
pub use crate::auth_usecase::AuthUseCase;
pub use crate::bootstrap::{AppContext, rehydrate};
pub use crate::orders::OrderService;
pub use crate::route_guard::{GuardOutcome, RouteGuard};
