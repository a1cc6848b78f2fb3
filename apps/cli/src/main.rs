mod commands;
mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::Coordinator;
use storage::SqliteStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

#[derive(Parser, Debug)]
#[command(name = "mesto", about = "Command-line client for the Mesto photo gallery")]
struct Args {
    /// Path to a toml settings file (defaults to ./mesto.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = config::load_settings(args.config.as_deref())?;
    info!(
        api_url = %settings.api_url,
        auth_url = %settings.auth_url,
        store_url = %settings.store_url,
        startup = %settings.startup_policy,
        "loaded settings"
    );

    let store = SqliteStore::open(&settings.store_url)
        .await
        .with_context(|| format!("failed to open session store at '{}'", settings.store_url))?;
    let mut coordinator = Coordinator::from_config(&settings.client_config(), Arc::new(store))
        .context("failed to build api clients")?;

    coordinator.start().await;
    let outcome = commands::run(&mut coordinator, &args.command).await;
    print!("{}", commands::render(&coordinator, &args.command));

    if let Err(err) = outcome {
        error!(command = args.command.name(), error = %err, "command failed");
        return Err(err.into());
    }
    Ok(())
}
