//! Identity and role domain models.

use serde::{Deserialize, Serialize};

/// The role an identity acts under.
///
/// Roles are issued by the authentication collaborator and never change for
/// the lifetime of an identity. Each role owns one dashboard subtree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    Vendor,
    Transporter,
    /// The backend historically reported this role as plain "Manager".
    #[serde(alias = "Manager")]
    WarehouseManager,
}

impl Role {
    /// Returns the route prefix of the dashboard subtree this role owns.
    pub fn dashboard_route(&self) -> &'static str {
        match self {
            Role::Admin => "/dashboard/admin",
            Role::Vendor => "/dashboard/vendor",
            Role::Transporter => "/dashboard/transporter",
            Role::WarehouseManager => "/dashboard/warehouse",
        }
    }
}

/// A logged-in account as issued by the authentication collaborator.
///
/// Immutable once issued; the session core stores one `Identity` per
/// concurrently logged-in account, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Backend user id.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Role deciding which dashboard subtree this identity may enter.
    pub role: Role,
}
