use serde::{Deserialize, Serialize};

use crate::catalog::CatalogKind;
use crate::models::CatalogResource;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Film {
    pub title: String,
    pub episode_id: i64,
    pub opening_crawl: String,
    pub director: String,
    pub producer: String,
    pub release_date: String,
    #[serde(default)]
    pub characters: Vec<String>,
    #[serde(default)]
    pub planets: Vec<String>,
    #[serde(default)]
    pub starships: Vec<String>,
    #[serde(default)]
    pub vehicles: Vec<String>,
    #[serde(default)]
    pub species: Vec<String>,
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub edited: String,
    pub url: String,
}

impl CatalogResource for Film {
    const KIND: CatalogKind = CatalogKind::Films;

    fn url(&self) -> &str {
        &self.url
    }

    fn display_name(&self) -> &str {
        &self.title
    }
}
