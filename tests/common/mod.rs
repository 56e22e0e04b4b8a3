//! Shared harness for integration tests.
//!
//! Spins up a mock catalog per test (wiremock) and builds clients with
//! short retry delays so failure-path tests stay fast.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use wiremock::MockServer;

use holocron::catalog::{CatalogClient, CatalogConfig};
use holocron::services::GalaxyServices;

/// Config pointed at the mock server, with fast retries.
pub fn test_config(server: &MockServer) -> CatalogConfig {
    CatalogConfig {
        base_url: format!("{}/api/", server.uri()),
        max_retries: 3,
        retry_delay: Duration::from_millis(5),
        cache_ttl: Duration::from_secs(300),
        cache_capacity: 1_000,
    }
}

pub fn client(server: &MockServer) -> CatalogClient {
    CatalogClient::new(test_config(server)).expect("catalog client builds")
}

pub fn client_with(server: &MockServer, tweak: impl FnOnce(&mut CatalogConfig)) -> CatalogClient {
    let mut config = test_config(server);
    tweak(&mut config);
    CatalogClient::new(config).expect("catalog client builds")
}

pub fn services(server: &MockServer) -> Arc<GalaxyServices> {
    Arc::new(GalaxyServices::new(Arc::new(client(server))))
}

/// One page of a listing in the catalog's wire shape.
pub fn page(count: u64, next: Option<String>, results: Vec<Value>) -> Value {
    json!({
        "count": count,
        "next": next,
        "previous": null,
        "results": results,
    })
}

pub fn person(server: &MockServer, id: &str, name: &str) -> Value {
    json!({
        "name": name,
        "height": "172",
        "mass": "77",
        "hair_color": "blond",
        "skin_color": "fair",
        "eye_color": "blue",
        "birth_year": "19BBY",
        "gender": "male",
        "homeworld": format!("{}/api/planets/1/", server.uri()),
        "films": [],
        "species": [],
        "vehicles": [],
        "starships": [],
        "url": format!("{}/api/people/{id}/", server.uri()),
    })
}

pub fn planet(server: &MockServer, id: &str, name: &str) -> Value {
    json!({
        "name": name,
        "rotation_period": "23",
        "orbital_period": "304",
        "diameter": "10465",
        "climate": "arid",
        "gravity": "1 standard",
        "terrain": "desert",
        "surface_water": "1",
        "population": "200000",
        "residents": [],
        "films": [],
        "url": format!("{}/api/planets/{id}/", server.uri()),
    })
}

pub fn starship(server: &MockServer, id: &str, name: &str) -> Value {
    json!({
        "name": name,
        "model": format!("{name} model"),
        "manufacturer": "Corellian Engineering Corporation",
        "cost_in_credits": "unknown",
        "length": "34.37",
        "max_atmosphering_speed": "unknown",
        "crew": "4",
        "passengers": "0",
        "cargo_capacity": "unknown",
        "consumables": "2 months",
        "hyperdrive_rating": "unknown",
        "MGLT": "unknown",
        "starship_class": "Light freighter",
        "pilots": [],
        "films": [],
        "url": format!("{}/api/starships/{id}/", server.uri()),
    })
}

pub fn vehicle(server: &MockServer, id: &str, name: &str) -> Value {
    json!({
        "name": name,
        "model": format!("{name} model"),
        "manufacturer": "Corellia Mining Corporation",
        "cost_in_credits": "unknown",
        "length": "36.8",
        "max_atmosphering_speed": "unknown",
        "crew": "46",
        "passengers": "30",
        "cargo_capacity": "unknown",
        "consumables": "2 months",
        "vehicle_class": "wheeled",
        "pilots": [],
        "films": [],
        "url": format!("{}/api/vehicles/{id}/", server.uri()),
    })
}
