//! Resource operations on `/vehicles`, executed over a `Transport`.

use tracing::{instrument, warn};

use crate::client::VehicleClient;
use crate::error::VehicleError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;
use crate::types::{NewVehicle, Vehicle};

/// Pairs the stateless `VehicleClient` codec with a transport.
///
/// No operation retries; every error is returned as the codec or the
/// transport produced it.
#[derive(Debug)]
pub struct VehicleApi<T> {
    client: VehicleClient,
    transport: T,
}

impl<T: Transport> VehicleApi<T> {
    pub fn new(client: VehicleClient, transport: T) -> Self {
        Self { client, transport }
    }

    #[instrument(skip(self))]
    pub fn list_all(&self) -> Result<Vec<Vehicle>, VehicleError> {
        let response = self.send(self.client.build_list_vehicles())?;
        self.client.parse_list_vehicles(response).inspect_err(log_failure)
    }

    #[instrument(skip(self))]
    pub fn get_by_id(&self, id: i64) -> Result<Vehicle, VehicleError> {
        let response = self.send(self.client.build_get_vehicle(id))?;
        self.client.parse_get_vehicle(id, response).inspect_err(log_failure)
    }

    #[instrument(skip(self, vehicle), fields(name = %vehicle.name))]
    pub fn create(&self, vehicle: &NewVehicle<'_>) -> Result<Vehicle, VehicleError> {
        let response = self.send(self.client.build_create_vehicle(vehicle)?)?;
        self.client.parse_create_vehicle(response).inspect_err(log_failure)
    }

    #[instrument(skip(self, vehicle))]
    pub fn update(&self, id: i64, vehicle: &Vehicle) -> Result<Vehicle, VehicleError> {
        let response = self.send(self.client.build_update_vehicle(id, vehicle)?)?;
        self.client.parse_update_vehicle(id, response).inspect_err(log_failure)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: i64) -> Result<(), VehicleError> {
        let response = self.send(self.client.build_delete_vehicle(id))?;
        self.client.parse_delete_vehicle(id, response).inspect_err(log_failure)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, VehicleError> {
        self.transport.execute(request).inspect_err(log_failure)
    }
}

fn log_failure(err: &VehicleError) {
    warn!(error = %err, "vehicle API request failed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::HttpMethod;
    use crate::transport::MockTransport;

    const BASE_URL: &str = "http://inventory.test";

    const BMW: &str = r#"{"id":2,"name":"BMW","model":"X5","year":2015,"color":"black","price":20000,"latitude":59.986607,"longitude":30.321435}"#;

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    fn api(transport: MockTransport) -> VehicleApi<MockTransport> {
        VehicleApi::new(VehicleClient::new(BASE_URL), transport)
    }

    fn bmw() -> Vehicle {
        serde_json::from_str(BMW).unwrap()
    }

    #[test]
    fn list_all_issues_get_on_collection() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| req.method == HttpMethod::Get && req.url == "http://inventory.test/vehicles")
            .times(1)
            .returning(|_| Ok(response(200, &format!("[{BMW}]"))));

        assert_eq!(api(transport).list_all().unwrap(), vec![bmw()]);
    }

    #[test]
    fn get_by_id_maps_404_to_not_found() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| req.url == "http://inventory.test/vehicles/5")
            .times(1)
            .returning(|_| Ok(response(404, r#"{"error":"Vehicle not found"}"#)));

        let err = api(transport).get_by_id(5).unwrap_err();
        assert!(matches!(err, VehicleError::NotFound { id: 5 }));
    }

    #[test]
    fn create_posts_record_without_id() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                let body: serde_json::Value =
                    serde_json::from_str(req.body.as_deref().unwrap_or("null")).unwrap();
                req.method == HttpMethod::Post
                    && req.url == "http://inventory.test/vehicles"
                    && body.get("id").is_none()
                    && body["name"] == "BMW"
            })
            .times(1)
            .returning(|_| Ok(response(201, BMW)));

        let vehicle = bmw();
        let created = api(transport).create(&NewVehicle::from(&vehicle)).unwrap();
        assert_eq!(created.id, Some(2));
    }

    #[test]
    fn update_puts_full_record() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| {
                let body: serde_json::Value =
                    serde_json::from_str(req.body.as_deref().unwrap_or("null")).unwrap();
                req.method == HttpMethod::Put
                    && req.url == "http://inventory.test/vehicles/2"
                    && body["id"] == 2
            })
            .times(1)
            .returning(|_| Ok(response(200, BMW)));

        assert_eq!(api(transport).update(2, &bmw()).unwrap(), bmw());
    }

    #[test]
    fn delete_maps_statuses() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .withf(|req| req.method == HttpMethod::Delete && req.url.ends_with("/vehicles/1"))
            .times(1)
            .returning(|_| Ok(response(204, "")));
        transport
            .expect_execute()
            .withf(|req| req.method == HttpMethod::Delete && req.url.ends_with("/vehicles/2"))
            .times(1)
            .returning(|_| Ok(response(404, "")));
        transport
            .expect_execute()
            .withf(|req| req.method == HttpMethod::Delete && req.url.ends_with("/vehicles/3"))
            .times(1)
            .returning(|_| Ok(response(500, "db down")));

        let api = api(transport);
        assert!(api.delete(1).is_ok());
        assert!(matches!(api.delete(2), Err(VehicleError::NotFound { id: 2 })));
        assert!(matches!(
            api.delete(3),
            Err(VehicleError::RemoteService { status: 500, .. })
        ));
    }

    #[test]
    fn transport_errors_propagate_unchanged() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Err(VehicleError::Transport("timed out".to_string())));

        match api(transport).list_all() {
            Err(VehicleError::Transport(msg)) => assert_eq!(msg, "timed out"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn malformed_body_is_invalid_response() {
        let mut transport = MockTransport::new();
        transport
            .expect_execute()
            .times(1)
            .returning(|_| Ok(response(200, "<html>")));

        let err = api(transport).get_by_id(1).unwrap_err();
        assert!(matches!(err, VehicleError::InvalidResponse(_)));
    }
}
