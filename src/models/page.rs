use serde::{Deserialize, Serialize};

/// One page of a catalog listing.
///
/// Following `next` repeatedly and concatenating `results` yields
/// exactly `count` entities, each once, in the service's order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}
