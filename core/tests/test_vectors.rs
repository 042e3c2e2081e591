//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results or error kinds. Comparing parsed JSON (not raw
//! strings) avoids false negatives from field-ordering differences.

use serde_json::Value;
use vehicle_core::{HttpMethod, HttpRequest, HttpResponse, NewVehicle, Vehicle, VehicleClient, VehicleError};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> VehicleClient {
    VehicleClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

fn input_id(case: &Value) -> i64 {
    case["input_id"].as_i64().unwrap()
}

/// Check method, path and (when the vector lists them) headers and body.
fn assert_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: path");

    match expected.get("headers") {
        Some(headers) => {
            let expected_headers: Vec<(String, String)> = headers
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let arr = h.as_array().unwrap();
                    (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
        }
        None => assert!(req.headers.is_empty(), "{name}: headers should be empty"),
    }

    match expected.get("body") {
        Some(body) => {
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Check an error against the vector's `expected_error` kind.
fn assert_error(name: &str, case: &Value, err: VehicleError) {
    match case["expected_error"].as_str().unwrap() {
        "NotFound" => match err {
            VehicleError::NotFound { id } => assert_eq!(id, input_id(case), "{name}: not-found id"),
            other => panic!("{name}: expected NotFound, got {other:?}"),
        },
        "RemoteService" => {
            let status = case["simulated_response"]["status"].as_u64().unwrap() as u16;
            assert!(
                matches!(err, VehicleError::RemoteService { status: s, .. } if s == status),
                "{name}: expected RemoteService, got {err:?}"
            );
        }
        "InvalidResponse" => assert!(
            matches!(err, VehicleError::InvalidResponse(_)),
            "{name}: expected InvalidResponse, got {err:?}"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn assert_outcome<T>(name: &str, case: &Value, result: Result<T, VehicleError>)
where
    T: std::fmt::Debug + PartialEq + serde::de::DeserializeOwned,
{
    if case.get("expected_error").is_some() {
        assert_error(name, case, result.unwrap_err());
    } else {
        let expected: T = serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(result.unwrap(), expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();
        assert_request(name, &c.build_list_vehicles(), &case["expected_request"]);
        assert_outcome::<Vec<Vehicle>>(name, &case, c.parse_list_vehicles(simulated_response(&case)));
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        assert_request(name, &c.build_get_vehicle(id), &case["expected_request"]);
        assert_outcome::<Vehicle>(name, &case, c.parse_get_vehicle(id, simulated_response(&case)));
    }
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: Vehicle = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_create_vehicle(&NewVehicle::from(&input)).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Vehicle>(name, &case, c.parse_create_vehicle(simulated_response(&case)));
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        let input: Vehicle = serde_json::from_value(case["input"].clone()).unwrap();
        let req = c.build_update_vehicle(id, &input).unwrap();
        assert_request(name, &req, &case["expected_request"]);
        assert_outcome::<Vehicle>(name, &case, c.parse_update_vehicle(id, simulated_response(&case)));
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();
        let id = input_id(&case);
        assert_request(name, &c.build_delete_vehicle(id), &case["expected_request"]);

        let result = c.parse_delete_vehicle(id, simulated_response(&case));
        if case.get("expected_error").is_some() {
            assert_error(name, &case, result.unwrap_err());
        } else {
            assert!(result.is_ok(), "{name}: expected success");
        }
    }
}
