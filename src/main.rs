//! Holocron — galaxy catalog intelligence
//!
//! Usage:
//!   holocron ask "Who is Luke Skywalker?"   Ask the agent a question
//!   holocron dashboard                      Galaxy totals + top craft
//!   holocron get people 1                   Fetch one entity
//!   holocron search starships "wing"        Search a kind
//!   holocron list planets                   List every entity of a kind
//!   holocron --help                         Show all commands

use anyhow::Result;
use clap::Parser;

use holocron::cli::{execute, Cli};
use holocron::init::AppContext;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Logs go to stderr so piped stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("holocron=info".parse()?),
        )
        .init();

    let ctx = AppContext::new()?;
    execute(&cli.command, &ctx, cli.json).await?;

    Ok(())
}
