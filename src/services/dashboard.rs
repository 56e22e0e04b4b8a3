use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::services::entities::GalaxyServices;
use crate::services::ranking::{rank_top_craft, RankedCraft};
use crate::HolocronError;

/// Aggregated totals plus the fleet ranking, assembled in one fan-out.
#[derive(Debug, Clone, Serialize)]
pub struct GalaxyStats {
    pub total_characters: usize,
    pub total_planets: usize,
    pub total_starships: usize,
    pub total_vehicles: usize,
    pub top_craft: Vec<RankedCraft>,
}

/// Fan-out consumer of the entity services and the ranking engine.
pub struct DashboardService {
    services: Arc<GalaxyServices>,
}

impl DashboardService {
    pub fn new(services: Arc<GalaxyServices>) -> Self {
        Self { services }
    }

    /// Top three craft across both fleet listings. Both fetches run
    /// concurrently and the first failure fails the whole call.
    pub async fn top_craft(&self) -> Result<Vec<RankedCraft>, HolocronError> {
        let (starships, vehicles) = tokio::try_join!(
            self.services.starships.get_all(),
            self.services.vehicles.get_all(),
        )?;
        Ok(rank_top_craft(&starships, &vehicles))
    }

    /// All dashboard numbers in one concurrent, fail-fast join. The
    /// ranking reuses the fleets fetched for the totals.
    pub async fn galaxy_stats(&self) -> Result<GalaxyStats, HolocronError> {
        let (people, planets, starships, vehicles) = tokio::try_join!(
            self.services.people.get_all(),
            self.services.planets.get_all(),
            self.services.starships.get_all(),
            self.services.vehicles.get_all(),
        )?;

        let top_craft = rank_top_craft(&starships, &vehicles);
        debug!(
            characters = people.len(),
            planets = planets.len(),
            starships = starships.len(),
            vehicles = vehicles.len(),
            "assembled galaxy stats"
        );

        Ok(GalaxyStats {
            total_characters: people.len(),
            total_planets: planets.len(),
            total_starships: starships.len(),
            total_vehicles: vehicles.len(),
            top_craft,
        })
    }
}
