//! Domain-level vehicle operations.
//!
//! # Design
//! `VehicleManager` adds filtering and geometry on top of `VehicleApi`.
//! Every request is issued sequentially and the first failure is returned
//! as-is; nothing is retried or swallowed.

use tracing::{debug, instrument};

use crate::api::VehicleApi;
use crate::client::VehicleClient;
use crate::config::VehicleConfig;
use crate::error::VehicleError;
use crate::filter::FilterCriteria;
use crate::geo;
use crate::transport::{Transport, UreqTransport};
use crate::types::{NewVehicle, Vehicle};

/// Client for a remote vehicle inventory.
#[derive(Debug)]
pub struct VehicleManager<T = UreqTransport> {
    api: VehicleApi<T>,
}

impl VehicleManager<UreqTransport> {
    /// Connect to the service described by `config` over HTTP.
    pub fn new(config: &VehicleConfig) -> Self {
        Self::with_transport(config, UreqTransport::new(config.timeout()))
    }

    /// Shorthand for `new` with the default timeout.
    pub fn connect(base_url: &str) -> Self {
        Self::new(&VehicleConfig::new(base_url))
    }
}

impl<T: Transport> VehicleManager<T> {
    pub fn with_transport(config: &VehicleConfig, transport: T) -> Self {
        Self {
            api: VehicleApi::new(VehicleClient::new(&config.base_url), transport),
        }
    }

    #[instrument(skip(self))]
    pub fn list_vehicles(&self) -> Result<Vec<Vehicle>, VehicleError> {
        self.api.list_all()
    }

    /// Vehicles whose fields equal every criterion, in server order.
    ///
    /// The criteria are validated in full before the list is fetched.
    #[instrument(skip(self, criteria), fields(criteria = criteria.len()))]
    pub fn filter_vehicles(&self, criteria: &FilterCriteria) -> Result<Vec<Vehicle>, VehicleError> {
        let filter = criteria.compile()?;
        let vehicles = self.list_vehicles()?;
        let total = vehicles.len();
        let matched = filter.apply(vehicles);
        debug!(total, matched = matched.len(), "filtered vehicles");
        Ok(matched)
    }

    #[instrument(skip(self))]
    pub fn get_vehicle(&self, id: i64) -> Result<Vehicle, VehicleError> {
        self.api.get_by_id(id)
    }

    /// Create `vehicle` on the server; any `id` it carries is not sent.
    #[instrument(skip(self, vehicle), fields(name = %vehicle.name))]
    pub fn add_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, VehicleError> {
        let created = self.api.create(&NewVehicle::from(vehicle))?;
        debug!(id = ?created.id, "vehicle created");
        Ok(created)
    }

    /// Replace the server's copy of `vehicle`.
    ///
    /// Fails with `MissingId` without sending anything when `vehicle.id` is
    /// unset or zero.
    #[instrument(skip(self, vehicle), fields(id = ?vehicle.id))]
    pub fn update_vehicle(&self, vehicle: &Vehicle) -> Result<Vehicle, VehicleError> {
        let id = match vehicle.id {
            Some(id) if id != 0 => id,
            _ => return Err(VehicleError::MissingId),
        };
        self.api.update(id, vehicle)
    }

    #[instrument(skip(self))]
    pub fn delete_vehicle(&self, id: i64) -> Result<(), VehicleError> {
        self.api.delete(id)
    }

    /// Great-circle distance in metres between two stored vehicles.
    #[instrument(skip(self))]
    pub fn get_distance(&self, id1: i64, id2: i64) -> Result<f64, VehicleError> {
        let first = self.get_vehicle(id1)?;
        let second = self.get_vehicle(id2)?;
        Ok(geo::great_circle_distance(
            first.coordinates(),
            second.coordinates(),
        ))
    }

    /// The vehicle closest to vehicle `id`, or `None` when the inventory
    /// holds no other vehicle.
    #[instrument(skip(self))]
    pub fn get_nearest_vehicle(&self, id: i64) -> Result<Option<Vehicle>, VehicleError> {
        let reference = self.get_vehicle(id)?;
        let vehicles = self.list_vehicles()?;
        if vehicles.len() == 1 {
            debug!("inventory holds a single vehicle");
            return Ok(None);
        }
        let nearest = geo::nearest(&reference, &vehicles).cloned();
        debug!(nearest = ?nearest.as_ref().and_then(|v| v.id), "nearest vehicle resolved");
        Ok(nearest)
    }
}
