pub mod dashboard;
pub mod entities;
pub mod ranking;

pub use dashboard::{DashboardService, GalaxyStats};
pub use entities::{EntityService, GalaxyServices};
pub use ranking::{rank_top_craft, starship_score, vehicle_score, CraftKind, RankedCraft};
