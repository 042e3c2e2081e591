//! Stateless HTTP request builder and response parser for the vehicle API.
//!
//! # Design
//! `VehicleClient` holds only a `base_url` and carries no mutable state
//! between calls. Each resource operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Executing the round-trip is left to a `Transport`.

use serde::de::DeserializeOwned;

use crate::error::VehicleError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{NewVehicle, Vehicle};

/// Synchronous, stateless codec for the `/vehicles` resource.
#[derive(Debug, Clone)]
pub struct VehicleClient {
    base_url: String,
}

impl VehicleClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_vehicles(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/vehicles", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_get_vehicle(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_vehicle(&self, input: &NewVehicle<'_>) -> Result<HttpRequest, VehicleError> {
        let body = serde_json::to_string(input).map_err(|e| VehicleError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/vehicles", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// The body carries the full record, `id` included.
    pub fn build_update_vehicle(&self, id: i64, vehicle: &Vehicle) -> Result<HttpRequest, VehicleError> {
        let body = serde_json::to_string(vehicle).map_err(|e| VehicleError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/vehicles/{id}", self.base_url),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_vehicle(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/vehicles/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_vehicles(&self, response: HttpResponse) -> Result<Vec<Vehicle>, VehicleError> {
        check_status(&response, None)?;
        parse_body(&response)
    }

    pub fn parse_get_vehicle(&self, id: i64, response: HttpResponse) -> Result<Vehicle, VehicleError> {
        check_status(&response, Some(id))?;
        parse_body(&response)
    }

    /// A 404 here is an ordinary `RemoteService` error: creation has no
    /// addressed record that could be missing.
    pub fn parse_create_vehicle(&self, response: HttpResponse) -> Result<Vehicle, VehicleError> {
        check_status(&response, None)?;
        parse_body(&response)
    }

    pub fn parse_update_vehicle(&self, id: i64, response: HttpResponse) -> Result<Vehicle, VehicleError> {
        check_status(&response, Some(id))?;
        parse_body(&response)
    }

    /// The response body is ignored on success.
    pub fn parse_delete_vehicle(&self, id: i64, response: HttpResponse) -> Result<(), VehicleError> {
        check_status(&response, Some(id))
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

/// Map non-success status codes to the appropriate `VehicleError` variant.
///
/// `addressed` is the id in the request path; only then does a 404 mean
/// the vehicle does not exist.
fn check_status(response: &HttpResponse, addressed: Option<i64>) -> Result<(), VehicleError> {
    if response.is_success() {
        return Ok(());
    }
    match addressed {
        Some(id) if response.status == 404 => Err(VehicleError::NotFound { id }),
        _ => Err(VehicleError::RemoteService {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}

fn parse_body<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, VehicleError> {
    serde_json::from_str(&response.body).map_err(|e| VehicleError::InvalidResponse(e.to_string()))
}
