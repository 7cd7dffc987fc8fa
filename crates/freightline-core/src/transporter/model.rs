//! Transporter and vehicle reference data models.
//!
//! Read-only data fetched on demand when a shipment assignment is being
//! made; each transporter record embeds its full vehicle list so vehicle
//! selection needs no further network call.

use serde::{Deserialize, Serialize};

/// A vehicle belonging to one transporter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub plate_number: String,
    #[serde(rename = "type")]
    pub vehicle_type: String,
}

/// A carrier that can be assigned to ship orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transporter {
    pub id: i64,
    /// The backend user account behind this transporter; shipment
    /// creation is keyed on this, not on the transporter id itself.
    pub user_id: i64,
    pub name: String,
    #[serde(default)]
    pub vehicles: Vec<Vehicle>,
}

impl Transporter {
    /// Looks up one of this transporter's own vehicles.
    pub fn vehicle(&self, vehicle_id: i64) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id == vehicle_id)
    }
}
