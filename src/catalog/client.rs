use std::time::Duration;

use moka::future::Cache;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::catalog::CatalogKind;
use crate::models::Page;
use crate::HolocronError;

/// Public catalog service root.
pub const DEFAULT_BASE_URL: &str = "https://swapi.dev/api/";

/// Tuning knobs for the catalog client. Retry and freshness policy are
/// centralized here; every entity service and tool funnels through one
/// client built from one of these.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub base_url: String,
    /// Retries after the initial attempt, for network errors, 429 and 5xx.
    pub max_retries: u32,
    /// Fixed backoff between attempts.
    pub retry_delay: Duration,
    /// Freshness window; entries older than this are refetched.
    pub cache_ttl: Duration,
    pub cache_capacity: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            max_retries: 3,
            retry_delay: Duration::from_secs(1),
            cache_ttl: Duration::from_secs(300),
            cache_capacity: 10_000,
        }
    }
}

impl CatalogConfig {
    /// Default config with the base URL taken from `SWAPI_BASE_URL`
    /// when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base) = std::env::var("SWAPI_BASE_URL") {
            if !base.is_empty() {
                config.base_url = base;
            }
        }
        config
    }
}

/// HTTP client for the catalog: response caching, bounded retry, and
/// pagination aggregation behind one chokepoint.
pub struct CatalogClient {
    http: reqwest::Client,
    base: Url,
    cache: Cache<String, Value>,
    config: CatalogConfig,
}

impl CatalogClient {
    /// Build a client with a fresh cache sized and aged per the config.
    pub fn new(config: CatalogConfig) -> Result<Self, HolocronError> {
        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();
        Self::with_cache(config, cache)
    }

    /// Build a client around an externally constructed cache. Lets
    /// callers share or pre-populate a cache; tests inject a fresh one.
    pub fn with_cache(
        config: CatalogConfig,
        cache: Cache<String, Value>,
    ) -> Result<Self, HolocronError> {
        let base = Url::parse(&config.base_url).map_err(|err| {
            HolocronError::Configuration(format!(
                "invalid catalog base URL '{}': {err}",
                config.base_url
            ))
        })?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
            cache,
            config,
        })
    }

    /// Resolve an absolute URL or an endpoint relative to the base.
    fn resolve(&self, target: &str) -> Result<Url, HolocronError> {
        let parsed = if target.starts_with("http://") || target.starts_with("https://") {
            Url::parse(target)
        } else {
            self.base.join(target)
        };
        parsed.map_err(|err| {
            HolocronError::Configuration(format!("invalid catalog URL '{target}': {err}"))
        })
    }

    /// Fetch a single URL, consulting the cache first. On a miss the
    /// parsed body is cached under the exact URL before returning.
    pub async fn fetch(&self, target: &str) -> Result<Value, HolocronError> {
        let url = self.resolve(target)?;
        let key = url.to_string();

        if let Some(hit) = self.cache.get(&key).await {
            debug!(url = %key, "catalog cache hit");
            return Ok(hit);
        }

        let body = self.fetch_fresh(&url).await?;
        self.cache.insert(key, body.clone()).await;
        Ok(body)
    }

    /// One request with the retry policy applied: 404 fails immediately
    /// as `NotFound`; network errors, 429 and 5xx retry after a fixed
    /// delay up to the ceiling; other non-2xx fail as `Upstream`.
    async fn fetch_fresh(&self, url: &Url) -> Result<Value, HolocronError> {
        let mut attempt: u32 = 0;
        loop {
            match self.http.get(url.clone()).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status == StatusCode::NOT_FOUND {
                        return Err(HolocronError::NotFound {
                            url: url.to_string(),
                        });
                    }
                    if (status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error())
                        && attempt < self.config.max_retries
                    {
                        attempt += 1;
                        warn!(%url, %status, attempt, "catalog request failed, retrying");
                        tokio::time::sleep(self.config.retry_delay).await;
                        continue;
                    }
                    if !status.is_success() {
                        return Err(HolocronError::Upstream {
                            status: status.as_u16(),
                            url: url.to_string(),
                        });
                    }
                    return response.json::<Value>().await.map_err(|err| {
                        HolocronError::Decode {
                            url: url.to_string(),
                            message: err.to_string(),
                        }
                    });
                }
                Err(err) if attempt < self.config.max_retries => {
                    attempt += 1;
                    warn!(%url, error = %err, attempt, "catalog transport error, retrying");
                    tokio::time::sleep(self.config.retry_delay).await;
                }
                Err(err) => {
                    return Err(HolocronError::Network {
                        url: url.to_string(),
                        message: err.to_string(),
                    });
                }
            }
        }
    }

    /// Fetch and deserialize into the target shape.
    pub async fn fetch_as<T: DeserializeOwned>(&self, target: &str) -> Result<T, HolocronError> {
        let value = self.fetch(target).await?;
        serde_json::from_value(value).map_err(|err| HolocronError::Decode {
            url: target.to_string(),
            message: err.to_string(),
        })
    }

    /// Fetch one page of a paginated listing.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        page: u32,
    ) -> Result<Page<T>, HolocronError> {
        let mut url = self.resolve(endpoint)?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        self.fetch_as(url.as_str()).await
    }

    /// Follow `next` links until exhausted, concatenating results in
    /// page order. Fails atomically: an error on any page propagates
    /// and no partial collection is returned.
    pub async fn fetch_all<T: DeserializeOwned>(
        &self,
        endpoint: &str,
    ) -> Result<Vec<T>, HolocronError> {
        let mut results = Vec::new();
        let mut next = Some(self.resolve(endpoint)?.to_string());
        while let Some(url) = next {
            let page: Page<T> = self.fetch_as(&url).await?;
            results.extend(page.results);
            next = page.next;
        }
        Ok(results)
    }

    /// Single-page search with the query URL-encoded onto the endpoint.
    pub async fn fetch_search<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &str,
    ) -> Result<Page<T>, HolocronError> {
        let mut url = self.resolve(endpoint)?;
        url.query_pairs_mut().append_pair("search", query);
        self.fetch_as(url.as_str()).await
    }

    /// Fetch the canonical `<kind>/<id>/` resource. A missing id
    /// surfaces as `NotFound` so callers can render "does not exist"
    /// without inspecting status codes.
    pub async fn get_by_id<T: DeserializeOwned>(
        &self,
        kind: CatalogKind,
        id: &str,
    ) -> Result<T, HolocronError> {
        let endpoint = format!("{}{}/", kind.endpoint(), id);
        self.fetch_as(&endpoint).await
    }

    /// Drop every cached response.
    pub fn clear_cache(&self) {
        self.cache.invalidate_all();
    }

    /// Probe the catalog root. True when it answers with a success
    /// status; never errors.
    pub async fn health_check(&self) -> bool {
        match self.http.head(self.base.clone()).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}
