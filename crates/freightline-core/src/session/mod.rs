//! Multi-account session management.
//!
//! The session core keeps every concurrently logged-in identity alongside
//! its bearer credential and a single "active identity" pointer. All other
//! components (request authentication, route authorization, per-identity
//! caches) read through the [`manager::SessionManager`].

pub mod manager;
pub mod model;
pub mod repository;

pub use manager::SessionManager;
pub use model::SessionState;
pub use repository::SessionStateRepository;
