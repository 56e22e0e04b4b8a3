pub mod client;

pub use client::{CatalogClient, CatalogConfig, DEFAULT_BASE_URL};

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::HolocronError;

/// Entity kinds exposed by the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogKind {
    People,
    Planets,
    Starships,
    Vehicles,
    Films,
    Species,
}

impl CatalogKind {
    /// Listing endpoint relative to the catalog base URL.
    pub fn endpoint(&self) -> &'static str {
        match self {
            CatalogKind::People => "people/",
            CatalogKind::Planets => "planets/",
            CatalogKind::Starships => "starships/",
            CatalogKind::Vehicles => "vehicles/",
            CatalogKind::Films => "films/",
            CatalogKind::Species => "species/",
        }
    }

    /// Get all catalog kinds.
    pub fn all() -> Vec<CatalogKind> {
        vec![
            CatalogKind::People,
            CatalogKind::Planets,
            CatalogKind::Starships,
            CatalogKind::Vehicles,
            CatalogKind::Films,
            CatalogKind::Species,
        ]
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CatalogKind::People => "people",
            CatalogKind::Planets => "planets",
            CatalogKind::Starships => "starships",
            CatalogKind::Vehicles => "vehicles",
            CatalogKind::Films => "films",
            CatalogKind::Species => "species",
        };
        f.write_str(label)
    }
}

impl FromStr for CatalogKind {
    type Err = HolocronError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "people" | "person" | "character" | "characters" => Ok(CatalogKind::People),
            "planets" | "planet" => Ok(CatalogKind::Planets),
            "starships" | "starship" => Ok(CatalogKind::Starships),
            "vehicles" | "vehicle" => Ok(CatalogKind::Vehicles),
            "films" | "film" => Ok(CatalogKind::Films),
            "species" => Ok(CatalogKind::Species),
            other => Err(HolocronError::Configuration(format!(
                "unknown catalog kind '{other}' (expected people, planets, starships, vehicles, films or species)"
            ))),
        }
    }
}

/// Extract the numeric identifier from a canonical resource URL.
///
/// `https://swapi.dev/api/people/1/` yields `"1"`; anything without a
/// numeric final segment yields an empty string, mirroring how the
/// catalog's own clients treat malformed URLs.
pub fn extract_id(url: &str) -> String {
    let segment = url.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    if !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit()) {
        segment.to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_id_canonical() {
        assert_eq!(extract_id("https://swapi.dev/api/people/1/"), "1");
    }

    #[test]
    fn test_extract_id_no_trailing_slash() {
        assert_eq!(extract_id("https://swapi.dev/api/starships/12"), "12");
    }

    #[test]
    fn test_extract_id_non_numeric() {
        assert_eq!(extract_id("https://swapi.dev/api/people/"), "");
    }

    #[test]
    fn test_kind_roundtrip() {
        for kind in CatalogKind::all() {
            assert_eq!(kind.to_string().parse::<CatalogKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_kind_aliases() {
        assert_eq!("character".parse::<CatalogKind>().unwrap(), CatalogKind::People);
        assert!("droids".parse::<CatalogKind>().is_err());
    }
}
