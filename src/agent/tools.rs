//! The fixed mapping from tool name to schema and handler.
//!
//! Each tool wraps exactly one entity-service operation and reshapes
//! its result into a flat, agent-friendly object (camelCase keys, ids
//! extracted from URLs, units appended to display strings). Arguments
//! are validated against the tool's schema before anything executes;
//! unknown names are rejected outright. Catalog errors propagate
//! unchanged — the orchestrator decides how to surface them.

use std::sync::Arc;

use futures::future::BoxFuture;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::agent::llm::ToolDefinition;
use crate::catalog::extract_id;
use crate::services::entities::GalaxyServices;
use crate::services::ranking::rank_top_craft;
use crate::HolocronError;

type Handler = Arc<dyn Fn(Value) -> BoxFuture<'static, Result<Value, HolocronError>> + Send + Sync>;

/// A named, schema-validated callable exposed to the model.
pub struct Tool {
    name: &'static str,
    description: &'static str,
    input_schema: Value,
    handler: Handler,
}

/// Search arguments shared by every `searchX` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct SearchArgs {
    /// The name, model or title to search for.
    pub query: String,
}

/// Lookup arguments shared by every `getXDetails` tool.
#[derive(Debug, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct DetailArgs {
    /// The entity's catalog id, as returned by the search tools.
    pub id: String,
}

fn schema_of<A: JsonSchema>() -> Value {
    serde_json::to_value(schemars::schema_for!(A))
        .unwrap_or_else(|_| json!({ "type": "object" }))
}

fn empty_schema() -> Value {
    json!({ "type": "object", "properties": {}, "additionalProperties": false })
}

fn parse_args<A: DeserializeOwned>(tool: &'static str, arguments: Value) -> Result<A, HolocronError> {
    serde_json::from_value(arguments).map_err(|err| {
        HolocronError::ToolValidation(format!("invalid arguments for '{tool}': {err}"))
    })
}

/// The agent's complete tool surface.
pub struct ToolRegistry {
    tools: Vec<Tool>,
}

impl ToolRegistry {
    /// Build the full registry over one service bundle.
    pub fn for_services(services: Arc<GalaxyServices>) -> Self {
        let tools = vec![
            search_characters(services.clone()),
            get_character_details(services.clone()),
            search_planets(services.clone()),
            get_planet_details(services.clone()),
            search_starships(services.clone()),
            get_starship_details(services.clone()),
            search_vehicles(services.clone()),
            get_vehicle_details(services.clone()),
            search_films(services.clone()),
            get_film_details(services.clone()),
            search_species(services.clone()),
            get_species_details(services.clone()),
            galaxy_statistics(services),
        ];
        Self { tools }
    }

    /// Schemas and descriptions for the model's planner.
    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.tools
            .iter()
            .map(|tool| ToolDefinition {
                name: tool.name.to_string(),
                description: tool.description.to_string(),
                input_schema: tool.input_schema.clone(),
            })
            .collect()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.tools.iter().map(|tool| tool.name).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Validate and run one tool call. Unknown names are rejected
    /// before anything executes.
    pub async fn execute(&self, name: &str, arguments: Value) -> Result<Value, HolocronError> {
        let Some(tool) = self.tools.iter().find(|tool| tool.name == name) else {
            return Err(HolocronError::ToolValidation(format!(
                "unknown tool '{name}'"
            )));
        };
        (tool.handler)(arguments).await
    }
}

fn search_characters(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "searchCharacters",
        description: "Search for Star Wars characters by name. Use this when the user asks \
                      about a specific character or wants to find characters matching a name.",
        input_schema: schema_of::<SearchArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: SearchArgs = parse_args("searchCharacters", arguments)?;
                let page = services.people.search(&args.query).await?;
                Ok(json!({
                    "count": page.count,
                    "characters": page.results.iter().map(|person| json!({
                        "name": person.name,
                        "height": person.height,
                        "mass": person.mass,
                        "hairColor": person.hair_color,
                        "eyeColor": person.eye_color,
                        "birthYear": person.birth_year,
                        "gender": person.gender,
                        "id": extract_id(&person.url),
                    })).collect::<Vec<_>>(),
                }))
            })
        }),
    }
}

fn get_character_details(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "getCharacterDetails",
        description: "Get detailed information about a specific character by id. Use this \
                      after a search to get full details.",
        input_schema: schema_of::<DetailArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: DetailArgs = parse_args("getCharacterDetails", arguments)?;
                let person = services.people.get_by_id(&args.id).await?;
                Ok(json!({
                    "name": person.name,
                    "height": format!("{} cm", person.height),
                    "mass": format!("{} kg", person.mass),
                    "hairColor": person.hair_color,
                    "skinColor": person.skin_color,
                    "eyeColor": person.eye_color,
                    "birthYear": person.birth_year,
                    "gender": person.gender,
                    "homeworld": person.homeworld,
                    "films": person.films,
                    "species": person.species,
                    "vehicles": person.vehicles,
                    "starships": person.starships,
                }))
            })
        }),
    }
}

fn search_planets(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "searchPlanets",
        description: "Search for planets by name. Use this when the user asks about a \
                      specific planet.",
        input_schema: schema_of::<SearchArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: SearchArgs = parse_args("searchPlanets", arguments)?;
                let page = services.planets.search(&args.query).await?;
                Ok(json!({
                    "count": page.count,
                    "planets": page.results.iter().map(|planet| json!({
                        "name": planet.name,
                        "climate": planet.climate,
                        "terrain": planet.terrain,
                        "population": planet.population,
                        "diameter": format!("{} km", planet.diameter),
                        "id": extract_id(&planet.url),
                    })).collect::<Vec<_>>(),
                }))
            })
        }),
    }
}

fn get_planet_details(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "getPlanetDetails",
        description: "Get detailed information about a specific planet by id. Use this after \
                      a search to get full details.",
        input_schema: schema_of::<DetailArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: DetailArgs = parse_args("getPlanetDetails", arguments)?;
                let planet = services.planets.get_by_id(&args.id).await?;
                Ok(json!({
                    "name": planet.name,
                    "rotationPeriod": format!("{} hours", planet.rotation_period),
                    "orbitalPeriod": format!("{} days", planet.orbital_period),
                    "diameter": format!("{} km", planet.diameter),
                    "climate": planet.climate,
                    "gravity": planet.gravity,
                    "terrain": planet.terrain,
                    "surfaceWater": planet.surface_water,
                    "population": planet.population,
                    "residents": planet.residents,
                    "films": planet.films,
                }))
            })
        }),
    }
}

fn search_starships(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "searchStarships",
        description: "Search for starships by name or model. Use this when the user asks \
                      about a specific starship.",
        input_schema: schema_of::<SearchArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: SearchArgs = parse_args("searchStarships", arguments)?;
                let page = services.starships.search(&args.query).await?;
                Ok(json!({
                    "count": page.count,
                    "starships": page.results.iter().map(|ship| json!({
                        "name": ship.name,
                        "model": ship.model,
                        "manufacturer": ship.manufacturer,
                        "class": ship.starship_class,
                        "cost": ship.cost_in_credits,
                        "speed": ship.max_atmosphering_speed,
                        "hyperdriveRating": ship.hyperdrive_rating,
                        "id": extract_id(&ship.url),
                    })).collect::<Vec<_>>(),
                }))
            })
        }),
    }
}

fn get_starship_details(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "getStarshipDetails",
        description: "Get detailed information about a specific starship by id. Use this \
                      after a search to get full details.",
        input_schema: schema_of::<DetailArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: DetailArgs = parse_args("getStarshipDetails", arguments)?;
                let ship = services.starships.get_by_id(&args.id).await?;
                Ok(json!({
                    "name": ship.name,
                    "model": ship.model,
                    "manufacturer": ship.manufacturer,
                    "cost": format!("{} credits", ship.cost_in_credits),
                    "length": format!("{} meters", ship.length),
                    "maxSpeed": ship.max_atmosphering_speed,
                    "crew": ship.crew,
                    "passengers": ship.passengers,
                    "cargoCapacity": ship.cargo_capacity,
                    "consumables": ship.consumables,
                    "hyperdriveRating": ship.hyperdrive_rating,
                    "MGLT": ship.mglt,
                    "starshipClass": ship.starship_class,
                    "pilots": ship.pilots,
                    "films": ship.films,
                }))
            })
        }),
    }
}

fn search_vehicles(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "searchVehicles",
        description: "Search for ground and atmospheric vehicles by name or model.",
        input_schema: schema_of::<SearchArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: SearchArgs = parse_args("searchVehicles", arguments)?;
                let page = services.vehicles.search(&args.query).await?;
                Ok(json!({
                    "count": page.count,
                    "vehicles": page.results.iter().map(|vehicle| json!({
                        "name": vehicle.name,
                        "model": vehicle.model,
                        "manufacturer": vehicle.manufacturer,
                        "class": vehicle.vehicle_class,
                        "cost": vehicle.cost_in_credits,
                        "speed": vehicle.max_atmosphering_speed,
                        "id": extract_id(&vehicle.url),
                    })).collect::<Vec<_>>(),
                }))
            })
        }),
    }
}

fn get_vehicle_details(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "getVehicleDetails",
        description: "Get detailed information about a specific vehicle by id. Use this \
                      after a search to get full details.",
        input_schema: schema_of::<DetailArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: DetailArgs = parse_args("getVehicleDetails", arguments)?;
                let vehicle = services.vehicles.get_by_id(&args.id).await?;
                Ok(json!({
                    "name": vehicle.name,
                    "model": vehicle.model,
                    "manufacturer": vehicle.manufacturer,
                    "cost": format!("{} credits", vehicle.cost_in_credits),
                    "length": format!("{} meters", vehicle.length),
                    "maxSpeed": vehicle.max_atmosphering_speed,
                    "crew": vehicle.crew,
                    "passengers": vehicle.passengers,
                    "cargoCapacity": vehicle.cargo_capacity,
                    "consumables": vehicle.consumables,
                    "vehicleClass": vehicle.vehicle_class,
                    "pilots": vehicle.pilots,
                    "films": vehicle.films,
                }))
            })
        }),
    }
}

fn search_films(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "searchFilms",
        description: "Search for Star Wars films by title. Use this when the user asks \
                      about a specific movie.",
        input_schema: schema_of::<SearchArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: SearchArgs = parse_args("searchFilms", arguments)?;
                let page = services.films.search(&args.query).await?;
                Ok(json!({
                    "count": page.count,
                    "films": page.results.iter().map(|film| json!({
                        "title": film.title,
                        "episodeId": film.episode_id,
                        "director": film.director,
                        "producer": film.producer,
                        "releaseDate": film.release_date,
                        "id": extract_id(&film.url),
                    })).collect::<Vec<_>>(),
                }))
            })
        }),
    }
}

fn get_film_details(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "getFilmDetails",
        description: "Get detailed information about a specific film by id, including the \
                      opening crawl and everything that appears in it.",
        input_schema: schema_of::<DetailArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: DetailArgs = parse_args("getFilmDetails", arguments)?;
                let film = services.films.get_by_id(&args.id).await?;
                Ok(json!({
                    "title": film.title,
                    "episodeId": film.episode_id,
                    "openingCrawl": film.opening_crawl,
                    "director": film.director,
                    "producer": film.producer,
                    "releaseDate": film.release_date,
                    "characters": film.characters,
                    "planets": film.planets,
                    "starships": film.starships,
                    "vehicles": film.vehicles,
                    "species": film.species,
                }))
            })
        }),
    }
}

fn search_species(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "searchSpecies",
        description: "Search for species by name. Use this when the user asks about the \
                      different species of the galaxy.",
        input_schema: schema_of::<SearchArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: SearchArgs = parse_args("searchSpecies", arguments)?;
                let page = services.species.search(&args.query).await?;
                Ok(json!({
                    "count": page.count,
                    "species": page.results.iter().map(|species| json!({
                        "name": species.name,
                        "classification": species.classification,
                        "designation": species.designation,
                        "averageHeight": species.average_height,
                        "language": species.language,
                        "id": extract_id(&species.url),
                    })).collect::<Vec<_>>(),
                }))
            })
        }),
    }
}

fn get_species_details(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "getSpeciesDetails",
        description: "Get detailed information about a specific species by id. Use this \
                      after a search to get full details.",
        input_schema: schema_of::<DetailArgs>(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let args: DetailArgs = parse_args("getSpeciesDetails", arguments)?;
                let species = services.species.get_by_id(&args.id).await?;
                Ok(json!({
                    "name": species.name,
                    "classification": species.classification,
                    "designation": species.designation,
                    "averageHeight": format!("{} cm", species.average_height),
                    "skinColors": species.skin_colors,
                    "hairColors": species.hair_colors,
                    "eyeColors": species.eye_colors,
                    "averageLifespan": format!("{} years", species.average_lifespan),
                    "homeworld": species.homeworld,
                    "language": species.language,
                    "people": species.people,
                    "films": species.films,
                }))
            })
        }),
    }
}

fn galaxy_statistics(services: Arc<GalaxyServices>) -> Tool {
    Tool {
        name: "getGalaxyStatistics",
        description: "Get statistics about the galaxy: total counts for characters, planets, \
                      starships, vehicles, films and species, plus the top-rated craft. Use \
                      this for 'how many' and ranking questions.",
        input_schema: empty_schema(),
        handler: Arc::new(move |arguments| {
            let services = services.clone();
            Box::pin(async move {
                let _ = arguments; // takes no arguments
                let (people, planets, starships, vehicles, films, species) = tokio::try_join!(
                    services.people.get_all(),
                    services.planets.get_all(),
                    services.starships.get_all(),
                    services.vehicles.get_all(),
                    services.films.get_all(),
                    services.species.get_all(),
                )?;
                let top_craft = rank_top_craft(&starships, &vehicles);
                let summary = format!(
                    "The Star Wars galaxy contains {} characters, {} planets, {} starships, \
                     {} vehicles, {} films, and {} species.",
                    people.len(),
                    planets.len(),
                    starships.len(),
                    vehicles.len(),
                    films.len(),
                    species.len(),
                );
                Ok(json!({
                    "totalCharacters": people.len(),
                    "totalPlanets": planets.len(),
                    "totalStarships": starships.len(),
                    "totalVehicles": vehicles.len(),
                    "totalFilms": films.len(),
                    "totalSpecies": species.len(),
                    "topCraft": top_craft,
                    "summary": summary,
                }))
            })
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogClient, CatalogConfig};

    fn registry() -> ToolRegistry {
        let client = Arc::new(CatalogClient::new(CatalogConfig::default()).unwrap());
        ToolRegistry::for_services(Arc::new(GalaxyServices::new(client)))
    }

    #[test]
    fn test_registry_has_all_tools() {
        let registry = registry();
        assert_eq!(registry.len(), 13);
        let names = registry.names();
        assert!(names.contains(&"searchCharacters"));
        assert!(names.contains(&"getGalaxyStatistics"));
    }

    #[test]
    fn test_definitions_carry_schemas() {
        let definitions = registry().definitions();
        let search = definitions
            .iter()
            .find(|def| def.name == "searchCharacters")
            .unwrap();
        assert!(search.input_schema["properties"]["query"].is_object());
    }

    #[tokio::test]
    async fn test_unknown_tool_rejected() {
        let err = registry()
            .execute("openBlastDoors", json!({}))
            .await
            .unwrap_err();
        assert!(matches!(err, HolocronError::ToolValidation(_)));
    }

    #[tokio::test]
    async fn test_invalid_arguments_rejected_before_execution() {
        // wrong field name fails validation without touching the network
        let err = registry()
            .execute("searchCharacters", json!({ "name": "luke" }))
            .await
            .unwrap_err();
        assert!(matches!(err, HolocronError::ToolValidation(_)));

        let err = registry()
            .execute("getCharacterDetails", json!({ "id": 42 }))
            .await
            .unwrap_err();
        assert!(matches!(err, HolocronError::ToolValidation(_)));
    }
}
