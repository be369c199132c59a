//! Chatfront - terminal client for the chat and flight reservation backend
//!
#![doc = "Main entry point for the Chatfront application."]

use anyhow::Result;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatfront::cli::{Cli, Commands, ReservationCommand};
use chatfront::commands;
use chatfront::config::Config;
use chatfront::models::CancellationRequest;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize tracing
    init_tracing(cli.verbose, cli.json_logs);

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Validate configuration
    config.validate()?;

    // Execute command
    match cli.command {
        Commands::Chat => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Memory { chat_id } => {
            if let Some(id) = &chat_id {
                tracing::debug!("Opening conversation: {}", id);
            }
            commands::memory::run_memory_chat(config, chat_id).await?;
            Ok(())
        }
        Commands::Concierge { reservation } => {
            commands::concierge::run_concierge(config, reservation).await?;
            Ok(())
        }
        Commands::Reservations { command } => {
            tracing::info!("Starting reservation command");
            match command {
                ReservationCommand::List { json } => {
                    commands::reservations::list_reservations(&config, json).await?;
                    Ok(())
                }
                ReservationCommand::Cancel {
                    number,
                    first_name,
                    last_name,
                    reason,
                } => {
                    let request = CancellationRequest {
                        reservation_number: number,
                        first_name,
                        last_name,
                        reason,
                    };
                    commands::reservations::cancel_reservation(&config, request).await?;
                    Ok(())
                }
            }
        }
    }
}

/// Initialize tracing subscriber with environment filter
///
/// `RUST_LOG` wins; otherwise `chatfront=info`, or `chatfront=debug` with
/// `--verbose`. Logs go to stderr so they do not interleave with the
/// transcript.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "chatfront=debug"
    } else {
        "chatfront=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
