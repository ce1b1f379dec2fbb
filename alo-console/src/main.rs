//! alo - restaurant dashboard console
//!
//! Terminal front end for the restaurant service: branch selection, booking
//! board (one-shot or polling), status changes, customer search and floors.

mod cli;
mod commands;
mod logger;

use alo_client::ClientConfig;
use clap::Parser;

use cli::{Cli, Command};
use commands::App;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(cli.log_level.as_deref(), cli.log_dir.as_deref());

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(token) = cli.token {
        config = config.with_token(token);
    }
    tracing::debug!(base_url = %config.base_url, "Configuration loaded");

    let app = App::new(config)?;
    let result = match cli.command {
        Command::Branches => app.branches().await,
        Command::UseBranch { id } => app.use_branch(id).await,
        Command::Bookings(filters) => app.bookings(cli.branch, filters).await,
        Command::Watch(filters) => app.watch(cli.branch, filters).await,
        Command::Booking { id } => app.booking(id).await,
        Command::SetStatus { id, status } => app.set_status(id, status).await,
        Command::Customers { text } => app.customers(text).await,
        Command::Floors(command) => app.floors(cli.branch, command).await,
    };

    if let Err(e) = &result {
        tracing::error!("Command failed: {:#}", e);
    }
    result
}
