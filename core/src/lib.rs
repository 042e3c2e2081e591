//! Blocking client for a remote vehicle inventory service.
//!
//! # Overview
//! Retrieves, filters, creates, updates and deletes vehicle records over a
//! JSON HTTP API, and computes great-circle distances and nearest neighbours
//! between stored vehicles.
//!
//! # Design
//! - `VehicleClient` is stateless: `build_*` produces an `HttpRequest`,
//!   `parse_*` consumes an `HttpResponse`, and neither touches the network.
//! - `Transport` executes requests. `UreqTransport` keeps one agent, and so
//!   one connection pool and timeout, for its whole lifetime.
//! - `VehicleApi` joins the two into the five resource operations;
//!   `VehicleManager` adds filtering and geometry on top.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod filter;
pub mod geo;
pub mod http;
pub mod manager;
pub mod transport;
pub mod types;

pub use api::VehicleApi;
pub use client::VehicleClient;
pub use config::VehicleConfig;
pub use error::VehicleError;
pub use filter::{FieldType, FilterCriteria, ValueKind, VehicleField, VehicleFilter};
pub use geo::{great_circle_distance, Coordinates, EARTH_RADIUS_METERS};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use manager::VehicleManager;
pub use transport::{Transport, UreqTransport};
pub use types::{NewVehicle, Vehicle};
