use serde::{Deserialize, Serialize};

use crate::catalog::CatalogKind;
use crate::models::CatalogResource;

/// A character. Numeric-looking attributes stay as strings because the
/// catalog emits `"unknown"` / `"n/a"` sentinels in them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub height: String,
    pub mass: String,
    pub hair_color: String,
    pub skin_color: String,
    pub eye_color: String,
    pub birth_year: String,
    pub gender: String,
    pub homeworld: String,
    #[serde(default)]
    pub films: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

impl CatalogResource for Person {
    const KIND: CatalogKind = CatalogKind::People;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.name
    }
}
