mod analytics;
mod cli;
mod config;
mod error;
mod insights;
mod models;
mod reports;
mod source;
mod stats;
mod time_utils;
mod transform;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    info!("Starting DeliveryLens - delivery analytics from status reports");
    cli.execute().await?;

    Ok(())
}
