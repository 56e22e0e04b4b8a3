use serde::{Deserialize, Serialize};

use crate::catalog::CatalogKind;
use crate::models::CatalogResource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Planet {
    pub name: String,
    pub rotation_period: String,
    pub orbital_period: String,
    pub diameter: String,
    pub climate: String,
    pub gravity: String,
    pub terrain: String,
    pub surface_water: String,
    pub population: String,
    #[serde(default)]
    pub residents: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

impl CatalogResource for Planet {
    const KIND: CatalogKind = CatalogKind::Planets;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
