//! Rocket Shoes CLI - Inspect and edit a cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart and its totals
//! rs-cart show
//!
//! # Add one unit of a product (checks stock)
//! rs-cart add 3
//!
//! # Set the amount of a product in the cart (checks stock)
//! rs-cart update 3 2
//!
//! # Remove a product
//! rs-cart remove 3
//! ```
//!
//! Configuration comes from the environment (see `rocketshoes_cart::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use rocketshoes_cart::CartConfig;
use rocketshoes_core::ProductId;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::cart::CartSession;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "Rocket Shoes cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the amount of a product already in the cart
    Update {
        /// Product ID
        product_id: ProductId,

        /// New amount (values <= 0 are ignored)
        #[arg(allow_negative_numbers = true)]
        amount: i32,
    },
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &CartConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

/// Log a failed command and map the outcome to the process exit status.
fn exit_status(result: &Result<(), Box<dyn std::error::Error>>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Command failed: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Configuration is needed before tracing so Sentry can hook into it
    let config = CartConfig::from_env();
    let sentry_guard = config.as_ref().ok().and_then(init_sentry);

    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "rocketshoes_cart=info,rs_cart=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let result: Result<(), Box<dyn std::error::Error>> = match config {
        Ok(config) => run(cli, &config).await,
        Err(e) => Err(e.into()),
    };

    let status = exit_status(&result);

    // Flushes pending Sentry events before the process exits
    drop(sentry_guard);
    status
}

async fn run(cli: Cli, config: &CartConfig) -> Result<(), Box<dyn std::error::Error>> {
    let session = CartSession::open(config)?;

    match cli.command {
        Commands::Show => commands::cart::show(&session),
        Commands::Add { product_id } => commands::cart::add(&session, product_id).await?,
        Commands::Remove { product_id } => commands::cart::remove(&session, product_id).await?,
        Commands::Update { product_id, amount } => {
            commands::cart::update(&session, product_id, amount).await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_with_negative_amount() {
        let cli = Cli::try_parse_from(["rs-cart", "update", "3", "-1"]);
        assert!(matches!(
            cli.map(|c| c.command),
            Ok(Commands::Update { product_id, amount: -1 }) if product_id == ProductId::new(3)
        ));
    }

    #[test]
    fn test_exit_status() {
        assert_eq!(exit_status(&Ok(())), ExitCode::SUCCESS);
        assert_eq!(exit_status(&Err("boom".into())), ExitCode::FAILURE);
    }

    #[test]
    fn test_parse_rejects_non_numeric_id() {
        assert!(Cli::try_parse_from(["rs-cart", "add", "sneaker"]).is_err());
    }
}
