//! Terminal rendering helpers.

use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::Value;

use crate::services::{GalaxyStats, RankedCraft};

/// Pretty-print any JSON payload.
pub fn print_json(value: &Value) {
    match serde_json::to_string_pretty(value) {
        Ok(rendered) => println!("{rendered}"),
        Err(_) => println!("{value}"),
    }
}

/// Name (or title) of a raw catalog entity.
pub fn entity_label(value: &Value) -> String {
    value["name"]
        .as_str()
        .or_else(|| value["title"].as_str())
        .unwrap_or("(unnamed)")
        .to_string()
}

pub fn print_listing(header: &str, values: &[Value]) {
    println!("{} ({})", header.bold(), values.len());
    for value in values {
        println!("  {}", entity_label(value));
    }
}

pub fn print_stats(stats: &GalaxyStats) {
    println!("{}", "Galaxy overview".bold().yellow());

    let mut totals = Table::new();
    totals.load_preset(UTF8_FULL);
    totals.set_header(vec!["Characters", "Planets", "Starships", "Vehicles"]);
    totals.add_row(vec![
        stats.total_characters.to_string(),
        stats.total_planets.to_string(),
        stats.total_starships.to_string(),
        stats.total_vehicles.to_string(),
    ]);
    println!("{totals}");

    println!("{}", "Top craft".bold().yellow());
    print_craft(&stats.top_craft);
}

pub fn print_craft(craft: &[RankedCraft]) {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Rank", "Name", "Class", "Type", "Score"]);
    for entry in craft {
        table.add_row(vec![
            entry.rank.to_string(),
            entry.name.clone(),
            entry.craft_class.clone(),
            format!("{:?}", entry.kind).to_lowercase(),
            format!("{:.1}", entry.score),
        ]);
    }
    println!("{table}");
}
