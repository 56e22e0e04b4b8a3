//! CLI interface for Holocron.

pub mod output;

use std::io::Write;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use tokio_stream::StreamExt;

use crate::agent::{validate_configuration, AnswerEvent, ChatTurn};
use crate::catalog::CatalogKind;
use crate::init::AppContext;
use crate::HolocronError;

/// Holocron — browse the galaxy catalog and ask questions about it
#[derive(Parser)]
#[command(name = "holocron", version, about, long_about = None)]
pub struct Cli {
    /// Output as JSON instead of human-readable format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the agent a question about the galaxy
    Ask {
        /// The question to ask
        question: String,
        /// What the user is currently viewing, forwarded to the agent
        #[arg(long)]
        context: Option<String>,
    },

    /// Aggregated galaxy statistics and the top-rated craft
    Dashboard,

    /// Fetch one entity by kind and id
    Get { kind: CatalogKind, id: String },

    /// Search a kind by name, model or title
    Search { kind: CatalogKind, query: String },

    /// List every entity of a kind
    List { kind: CatalogKind },

    /// Check that the agent's model credentials are configured
    Doctor,
}

pub async fn execute(command: &Commands, ctx: &AppContext, json: bool) -> Result<(), HolocronError> {
    match command {
        Commands::Ask { question, context } => ask(ctx, question, context.as_deref()).await,
        Commands::Dashboard => dashboard(ctx, json).await,
        Commands::Get { kind, id } => get(ctx, *kind, id).await,
        Commands::Search { kind, query } => search(ctx, *kind, query, json).await,
        Commands::List { kind } => list(ctx, *kind, json).await,
        Commands::Doctor => doctor(ctx),
    }
}

async fn ask(ctx: &AppContext, question: &str, context: Option<&str>) -> Result<(), HolocronError> {
    let orchestrator = ctx.orchestrator()?;
    let reply = orchestrator.ask_agent(vec![ChatTurn::user(question)], context);

    if !reply.success {
        let message = reply.error.unwrap_or_else(|| "unknown error".to_string());
        eprintln!("{} {message}", "error:".red().bold());
        return Ok(());
    }
    let Some(mut stream) = reply.output else {
        return Ok(());
    };

    while let Some(event) = stream.next().await {
        match event {
            AnswerEvent::Fragment(text) => {
                print!("{text}");
                let _ = std::io::stdout().flush();
            }
            AnswerEvent::Done => {
                println!();
                break;
            }
            AnswerEvent::Failed(message) => {
                println!();
                eprintln!("{} {message}", "error:".red().bold());
                break;
            }
        }
    }
    Ok(())
}

async fn dashboard(ctx: &AppContext, json: bool) -> Result<(), HolocronError> {
    let stats = ctx.dashboard().galaxy_stats().await?;
    if json {
        output::print_json(&serde_json::to_value(&stats).unwrap_or_default());
    } else {
        output::print_stats(&stats);
    }
    Ok(())
}

async fn get(ctx: &AppContext, kind: CatalogKind, id: &str) -> Result<(), HolocronError> {
    let entity: Value = ctx.client.get_by_id(kind, id).await?;
    output::print_json(&entity);
    Ok(())
}

async fn search(
    ctx: &AppContext,
    kind: CatalogKind,
    query: &str,
    json: bool,
) -> Result<(), HolocronError> {
    let page: crate::models::Page<Value> = ctx.client.fetch_search(kind.endpoint(), query).await?;
    if json {
        output::print_json(&serde_json::json!({
            "count": page.count,
            "results": page.results,
        }));
    } else {
        output::print_listing(&format!("{kind} matching '{query}'"), &page.results);
    }
    Ok(())
}

async fn list(ctx: &AppContext, kind: CatalogKind, json: bool) -> Result<(), HolocronError> {
    let entities: Vec<Value> = ctx.client.fetch_all(kind.endpoint()).await?;
    if json {
        output::print_json(&Value::Array(entities));
    } else {
        output::print_listing(&kind.to_string(), &entities);
    }
    Ok(())
}

fn doctor(ctx: &AppContext) -> Result<(), HolocronError> {
    let status = validate_configuration(&ctx.agent_config);
    if status.is_valid {
        println!("{} model access is configured", "ok:".green().bold());
    } else {
        let message = status.error.unwrap_or_else(|| "invalid configuration".to_string());
        eprintln!("{} {message}", "error:".red().bold());
    }
    Ok(())
}
