//! Composite performance ranking over the combined fleet.
//!
//! Pure and deterministic: no I/O, no clock, no randomness. Scores are
//! computed from already-fetched entities and never cached on their own.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::catalog::extract_id;
use crate::models::{Starship, Vehicle};
use crate::utils::fields::numeric_or_zero;

/// How many craft a ranking returns.
pub const TOP_CRAFT_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CraftKind {
    Starship,
    Vehicle,
}

/// A scored, ranked craft — derived on every request, never stored.
#[derive(Debug, Clone, Serialize)]
pub struct RankedCraft {
    pub id: String,
    pub name: String,
    pub model: String,
    pub manufacturer: String,
    pub craft_class: String,
    pub cost_in_credits: String,
    pub max_speed: String,
    pub passengers: String,
    pub cargo_capacity: String,
    pub kind: CraftKind,
    pub score: f64,
    pub rank: u8,
}

/// Shared part of the scoring formula. Fields holding `"unknown"` /
/// `"n/a"` contribute nothing; cost is a penalty, not a contribution.
fn base_score(
    max_speed: &str,
    passengers: &str,
    cargo_capacity: &str,
    cost_in_credits: &str,
) -> f64 {
    let mut score = 0.0;

    let speed = numeric_or_zero(max_speed);
    if speed > 0.0 {
        score += speed / 10.0;
    }

    score += numeric_or_zero(passengers) * 5.0;

    let cargo = numeric_or_zero(cargo_capacity);
    if cargo > 0.0 {
        score += cargo / 1000.0;
    }

    let cost = numeric_or_zero(cost_in_credits);
    if cost > 0.0 {
        score -= cost / 100_000.0;
    }

    score
}

/// Score a starship. On top of the base formula, a working hyperdrive
/// is rewarded (lower rating is faster) and sublight speed in MGLT
/// counts double. Clamped at zero.
pub fn starship_score(ship: &Starship) -> f64 {
    let mut score = base_score(
        &ship.max_atmosphering_speed,
        &ship.passengers,
        &ship.cargo_capacity,
        &ship.cost_in_credits,
    );

    let hyperdrive = numeric_or_zero(&ship.hyperdrive_rating);
    if hyperdrive > 0.0 {
        score += (10.0 - hyperdrive) * 50.0;
    }
    score += numeric_or_zero(&ship.mglt) * 2.0;

    score.max(0.0)
}

/// Score a vehicle. Clamped at zero.
pub fn vehicle_score(vehicle: &Vehicle) -> f64 {
    base_score(
        &vehicle.max_atmosphering_speed,
        &vehicle.passengers,
        &vehicle.cargo_capacity,
        &vehicle.cost_in_credits,
    )
    .max(0.0)
}

fn ranked_starship(ship: &Starship) -> RankedCraft {
    RankedCraft {
        id: extract_id(&ship.url),
        name: ship.name.clone(),
        model: ship.model.clone(),
        manufacturer: ship.manufacturer.clone(),
        craft_class: ship.starship_class.clone(),
        cost_in_credits: ship.cost_in_credits.clone(),
        max_speed: ship.max_atmosphering_speed.clone(),
        passengers: ship.passengers.clone(),
        cargo_capacity: ship.cargo_capacity.clone(),
        kind: CraftKind::Starship,
        score: starship_score(ship),
        rank: 0,
    }
}

fn ranked_vehicle(vehicle: &Vehicle) -> RankedCraft {
    RankedCraft {
        id: extract_id(&vehicle.url),
        name: vehicle.name.clone(),
        model: vehicle.model.clone(),
        manufacturer: vehicle.manufacturer.clone(),
        craft_class: vehicle.vehicle_class.clone(),
        cost_in_credits: vehicle.cost_in_credits.clone(),
        max_speed: vehicle.max_atmosphering_speed.clone(),
        passengers: vehicle.passengers.clone(),
        cargo_capacity: vehicle.cargo_capacity.clone(),
        kind: CraftKind::Vehicle,
        score: vehicle_score(vehicle),
        rank: 0,
    }
}

/// Rank the combined fleet and return the top three, ranks 1..=3.
///
/// The sort is stable and descending on score, with starships listed
/// ahead of vehicles in the combined input, so ties preserve fetch
/// order.
pub fn rank_top_craft(starships: &[Starship], vehicles: &[Vehicle]) -> Vec<RankedCraft> {
    let mut combined: Vec<RankedCraft> = Vec::with_capacity(starships.len() + vehicles.len());
    combined.extend(starships.iter().map(ranked_starship));
    combined.extend(vehicles.iter().map(ranked_vehicle));

    combined.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    combined.truncate(TOP_CRAFT_COUNT);

    for (index, craft) in combined.iter_mut().enumerate() {
        craft.rank = index as u8 + 1;
    }
    combined
}
