use serde::{Deserialize, Serialize};

use crate::catalog::CatalogKind;
use crate::models::CatalogResource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Species {
    pub name: String,
    pub classification: String,
    pub designation: String,
    pub average_height: String,
    pub skin_colors: String,
    pub hair_colors: String,
    pub eye_colors: String,
    pub average_lifespan: String,
    /// Null for species with no single homeworld (e.g. droids).
    pub homeworld: Option<String>,
    pub language: String,
    #[serde(default)]
    pub people: Vec<String>,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

impl CatalogResource for Species {
    const KIND: CatalogKind = CatalogKind::Species;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
