use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of create and update requests. A client-supplied `id` is ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VehicleInput {
    pub name: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub price: i64,
    pub latitude: f64,
    pub longitude: f64,
}

impl Vehicle {
    fn from_input(id: i64, input: VehicleInput) -> Self {
        Self {
            id,
            name: input.name,
            model: input.model,
            year: input.year,
            color: input.color,
            price: input.price,
            latitude: input.latitude,
            longitude: input.longitude,
        }
    }
}

#[derive(Debug, Default)]
pub struct Inventory {
    last_id: i64,
    vehicles: BTreeMap<i64, Vehicle>,
}

impl Inventory {
    fn insert(&mut self, input: VehicleInput) -> Vehicle {
        self.last_id += 1;
        let vehicle = Vehicle::from_input(self.last_id, input);
        self.vehicles.insert(vehicle.id, vehicle.clone());
        vehicle
    }
}

pub type Db = Arc<RwLock<Inventory>>;

type NotFound = (StatusCode, Json<Value>);

fn not_found() -> NotFound {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Vehicle not found" })))
}

pub fn app() -> Router {
    app_with(Vec::new())
}

/// An app whose inventory starts with `seed`, ids assigned from 1 in order.
pub fn app_with(seed: Vec<VehicleInput>) -> Router {
    let mut inventory = Inventory::default();
    for input in seed {
        inventory.insert(input);
    }
    let db: Db = Arc::new(RwLock::new(inventory));
    Router::new()
        .route("/vehicles", get(list_vehicles).post(create_vehicle))
        .route(
            "/vehicles/{id}",
            get(get_vehicle).put(update_vehicle).delete(delete_vehicle),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, app()).await
}

pub async fn serve(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}

async fn list_vehicles(State(db): State<Db>) -> Json<Vec<Vehicle>> {
    let inventory = db.read().await;
    Json(inventory.vehicles.values().cloned().collect())
}

async fn create_vehicle(
    State(db): State<Db>,
    Json(input): Json<VehicleInput>,
) -> (StatusCode, Json<Vehicle>) {
    let vehicle = db.write().await.insert(input);
    (StatusCode::CREATED, Json(vehicle))
}

async fn get_vehicle(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Vehicle>, NotFound> {
    let inventory = db.read().await;
    inventory.vehicles.get(&id).cloned().map(Json).ok_or_else(not_found)
}

async fn update_vehicle(
    State(db): State<Db>,
    Path(id): Path<i64>,
    Json(input): Json<VehicleInput>,
) -> Result<Json<Vehicle>, NotFound> {
    let mut inventory = db.write().await;
    let vehicle = inventory.vehicles.get_mut(&id).ok_or_else(not_found)?;
    *vehicle = Vehicle::from_input(id, input);
    Ok(Json(vehicle.clone()))
}

async fn delete_vehicle(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<StatusCode, NotFound> {
    let mut inventory = db.write().await;
    inventory
        .vehicles
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(not_found)
}
