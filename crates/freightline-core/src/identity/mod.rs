//! Identity domain models.
//!
//! An identity is a distinct logged-in account (user + role) recognized by
//! the session core. Several identities can be registered concurrently; the
//! session manager tracks which one is active.

pub mod credential;
pub mod model;

pub use credential::Credential;
pub use model::{Identity, Role};
