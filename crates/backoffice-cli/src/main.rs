//! backoffice - terminal client for the sewa rental back-office API.
//!
//! This is a thin wrapper over the `sewa` libraries, intended for
//! operating a rental business back-office from the terminal and for
//! poking at an API instance while developing against it.

mod cli;
mod commands;
mod output;
mod session;
mod store;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, inventory, orders, prebookings, suppliers};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.json_logs);

    match cli.command {
        Commands::Auth(cmd) => auth::handle(cmd).await,
        Commands::Inventory(cmd) => inventory::handle(cmd).await,
        Commands::Suppliers(cmd) => suppliers::handle(cmd).await,
        Commands::Orders(cmd) => orders::handle(cmd).await,
        Commands::Prebookings(cmd) => prebookings::handle(cmd).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false))
            .init();
    }
}
