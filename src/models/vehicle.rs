use serde::{Deserialize, Serialize};

use crate::catalog::CatalogKind;
use crate::models::CatalogResource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub cost_in_credits: String,
    pub length: String,
    pub max_atmosphering_speed: String,
    pub crew: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub consumables: String,
    pub vehicle_class: String,
    #[serde(default)]
    pub pilots: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

impl CatalogResource for Vehicle {
    const KIND: CatalogKind = CatalogKind::Vehicles;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
