//! Error types for the vehicle inventory client.
//!
//! # Design
//! `NotFound` gets a dedicated variant carrying the requested id because
//! callers distinguish "no such vehicle" from "the server returned an
//! unexpected status". Every other non-2xx response lands in `RemoteService`
//! with the raw status and body. The filter and id variants are raised
//! locally, before any request is sent.

use thiserror::Error;

use crate::filter::{FieldType, ValueKind};

/// Errors returned by the vehicle client, adapter and manager.
#[derive(Debug, Error)]
pub enum VehicleError {
    /// The server returned 404 for the addressed vehicle.
    #[error("vehicle not found with id={id}")]
    NotFound { id: i64 },

    /// The server returned a non-2xx status other than a handled 404.
    #[error("remote service returned HTTP {status}: {body}")]
    RemoteService { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),

    /// Filter criteria named fields a vehicle does not have.
    #[error("vehicle has no attributes: {}", .fields.join(", "))]
    InvalidFilterField { fields: Vec<String> },

    /// A filter value has the wrong type for its field.
    #[error("vehicle field `{field}` has type {expected}, received {received}")]
    InvalidFilterValue {
        field: String,
        expected: FieldType,
        received: ValueKind,
    },

    /// An update was attempted on a vehicle without an id.
    #[error("vehicle id must be set to update a record")]
    MissingId,

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced an HTTP response (connect failure, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A configuration value could not be used.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl VehicleError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Errors raised before any request reaches the network.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::InvalidFilterField { .. } | Self::InvalidFilterValue { .. } | Self::MissingId
        )
    }
}
