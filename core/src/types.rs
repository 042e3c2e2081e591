//! Domain DTOs for the vehicle inventory API.
//!
//! # Design
//! `Vehicle` mirrors the record schema served by the inventory service. The
//! mock-server crate defines its own copy; integration tests catch any schema
//! drift between the two. `NewVehicle` is the create payload: it borrows a
//! `Vehicle` and has no `id` field, so a create request can never carry one.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;

/// A single vehicle record.
///
/// `id` is `None` for records built locally and not yet created on the
/// server. Equality compares every field, `id` included.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vehicle {
    pub name: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl Vehicle {
    /// Position of the vehicle in degrees.
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Copy of this record carrying the given server-assigned id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

/// Request payload for creating a vehicle.
#[derive(Debug, Clone, Serialize)]
pub struct NewVehicle<'a> {
    pub name: &'a str,
    pub model: &'a str,
    pub year: i64,
    pub color: &'a str,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl<'a> From<&'a Vehicle> for NewVehicle<'a> {
    fn from(vehicle: &'a Vehicle) -> Self {
        Self {
            name: &vehicle.name,
            model: &vehicle.model,
            year: vehicle.year,
            color: &vehicle.color,
            price: vehicle.price,
            latitude: vehicle.latitude,
            longitude: vehicle.longitude,
        }
    }
}
