use std::marker::PhantomData;
use std::sync::Arc;

use crate::catalog::CatalogClient;
use crate::models::{CatalogResource, Film, Page, Person, Planet, Species, Starship, Vehicle};
use crate::HolocronError;

/// Typed façade over the catalog client for one entity kind.
///
/// Pure delegation: every failure is the client's error, unmodified, so
/// callers pattern-match on a single taxonomy.
pub struct EntityService<T: CatalogResource> {
    client: Arc<CatalogClient>,
    _kind: PhantomData<fn() -> T>,
}

impl<T: CatalogResource> Clone for EntityService<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            _kind: PhantomData,
        }
    }
}

impl<T: CatalogResource> EntityService<T> {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            client,
            _kind: PhantomData,
        }
    }

    /// Every entity of this kind, aggregated across all pages.
    pub async fn get_all(&self) -> Result<Vec<T>, HolocronError> {
        self.client.fetch_all(T::KIND.endpoint()).await
    }

    /// One entity by its canonical id.
    pub async fn get_by_id(&self, id: &str) -> Result<T, HolocronError> {
        self.client.get_by_id(T::KIND, id).await
    }

    /// Single-page name/model search.
    pub async fn search(&self, query: &str) -> Result<Page<T>, HolocronError> {
        self.client.fetch_search(T::KIND.endpoint(), query).await
    }

    /// One page of the listing.
    pub async fn get_page(&self, page: u32) -> Result<Page<T>, HolocronError> {
        self.client.fetch_page(T::KIND.endpoint(), page).await
    }

    /// Resolve a relation URL to its entity.
    pub async fn get_by_url(&self, url: &str) -> Result<T, HolocronError> {
        self.client.fetch_as(url).await
    }
}

/// The six entity services behind one shared client.
#[derive(Clone)]
pub struct GalaxyServices {
    pub people: EntityService<Person>,
    pub planets: EntityService<Planet>,
    pub starships: EntityService<Starship>,
    pub vehicles: EntityService<Vehicle>,
    pub films: EntityService<Film>,
    pub species: EntityService<Species>,
}

impl GalaxyServices {
    pub fn new(client: Arc<CatalogClient>) -> Self {
        Self {
            people: EntityService::new(client.clone()),
            planets: EntityService::new(client.clone()),
            starships: EntityService::new(client.clone()),
            vehicles: EntityService::new(client.clone()),
            films: EntityService::new(client.clone()),
            species: EntityService::new(client),
        }
    }
}
