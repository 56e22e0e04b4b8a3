use serde::{Deserialize, Serialize};

use crate::catalog::CatalogKind;
use crate::models::CatalogResource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Starship {
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
    pub hyperdrive_rating: String,
    /// Megalights per hour. The catalog spells the key in caps.
    #[serde(rename = "MGLT")]
    pub mglt: String,
    pub starship_class: String,
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

impl CatalogResource for Starship {
    const KIND: CatalogKind = CatalogKind::Starships;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
