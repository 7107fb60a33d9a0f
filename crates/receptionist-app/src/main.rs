//! Receptionist server entry point.
//!
//! Startup sequence:
//! 1. Load `.env`, parse CLI arguments and the config file
//! 2. Layer env vars and CLI flags over the file
//! 3. Initialize logging (console, plus daily files when configured)
//! 4. Open the record store and wire chat, notifications and reminders
//! 5. Serve the REST API until Ctrl-C

mod cli;

use clap::Parser;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use receptionist_api::{start_server, AppState};
use receptionist_core::config::{LoggingConfig, ReceptionistConfig};
use receptionist_storage::Database;

use crate::cli::{expand_home, CliArgs};

const DATABASE_FILE: &str = "receptionist.db";

/// Install the global subscriber. The returned guard must live as long as
/// the process or buffered file output is lost.
fn init_logging(config: &LoggingConfig, level_from_cli: bool) -> Option<WorkerGuard> {
    let filter = if level_from_cli {
        EnvFilter::new(&config.level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level))
    };

    let (file_layer, guard) = match config.log_dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(expand_home(dir), "receptionist.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .with(file_layer)
        .init();

    guard
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for Ctrl-C; running until killed");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[receptionist] .env not loaded: {} (using system environment)", e);
    }

    let args = CliArgs::parse();
    let config_path = args.resolve_config_path();
    let mut config = ReceptionistConfig::load_or_default(&config_path);
    config.apply_env_overrides();
    args.apply_to(&mut config);

    let _log_guard = init_logging(&config.logging, args.log_level.is_some());

    tracing::info!("Starting receptionist v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(config = %config_path.display(), "Configuration resolved");
    tracing::info!(
        company = %config.company.name,
        model = %config.llm.model,
        ai_enabled = config.llm.usable_api_key().is_some(),
        "Receptionist settings"
    );

    let db_path = expand_home(&config.storage.data_dir).join(DATABASE_FILE);
    let database = Database::new(&db_path)?;

    let state = AppState::from_config(config, database);
    start_server(state, shutdown_signal()).await?;

    Ok(())
}
