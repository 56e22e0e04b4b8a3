pub mod film;
pub mod page;
pub mod person;
pub mod planet;
pub mod species;
pub mod starship;
pub mod vehicle;

pub use film::Film;
pub use page::Page;
pub use person::Person;
pub use planet::Planet;
pub use species::Species;
pub use starship::Starship;
pub use vehicle::Vehicle;

use serde::de::DeserializeOwned;

use crate::catalog::CatalogKind;

/// A catalog entity kind with a canonical listing endpoint.
///
/// Entities are immutable snapshots fetched from the external service;
/// nothing in this crate mutates them after deserialization.
pub trait CatalogResource: DeserializeOwned + Send + Sync + 'static {
    /// The endpoint this resource lives under.
    const KIND: CatalogKind;

    /// Canonical resource URL (`.../<kind>/<id>/`).
    fn url(&self) -> &str;

    /// Human-facing label (name or title).
    fn display_name(&self) -> &str;
}
