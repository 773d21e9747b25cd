//! # taskboard
//!
//! Task-tracking REST service binary: loads settings, builds the pooled
//! store, ensures the schema, and serves the HTTP API until Ctrl-C/SIGTERM.

#![deny(unsafe_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use taskboard_logging::{LogFormat, init_subscriber};
use taskboard_server::{ServerConfig, TaskboardServer, shutdown_signal};
use taskboard_settings::{Settings, load_settings};
use taskboard_store::{
    ConnectionConfig, SchemaInitializer, SchemaPolicy, SqliteTaskStore, TaskService, TaskStore,
    connection,
};
use tracing::info;

/// How long in-flight requests get to finish after a shutdown signal.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Task-tracking REST service.
#[derive(Parser, Debug)]
#[command(name = "taskboard", about = "Task-tracking REST service")]
struct Cli {
    /// JSON settings file, merged over the defaults.
    #[arg(long, env = "TASKBOARD_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Serve the HTTP API (default).
    Serve,
    /// Create the schema and exit.
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (settings, warnings) =
        load_settings(cli.config.as_deref()).context("failed to load settings")?;
    init_subscriber(
        &settings.logging.level,
        LogFormat::from_json_flag(settings.logging.json),
    );
    for warning in &warnings {
        warning.log();
    }

    let store = build_store(&settings)?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::InitDb => init_db(store).await,
        Command::Serve => serve(&settings, store).await,
    }
}

/// Build the pooled store from `database` settings. Does not connect.
fn build_store(settings: &Settings) -> Result<Arc<dyn TaskStore>> {
    let pool = connection::open_url(
        &settings.database.url,
        &ConnectionConfig::from(&settings.database),
    )
    .with_context(|| format!("invalid database url: {}", settings.database.url))?;
    Ok(Arc::new(SqliteTaskStore::new(pool)))
}

async fn init_db(store: Arc<dyn TaskStore>) -> Result<()> {
    SchemaInitializer::new(store)
        .ensure()
        .await
        .context("failed to ensure schema")?;
    Ok(())
}

async fn serve(settings: &Settings, store: Arc<dyn TaskStore>) -> Result<()> {
    let policy = SchemaPolicy::from_fail_fast(settings.schema.fail_fast);
    let _schema = SchemaInitializer::new(Arc::clone(&store))
        .start(policy)
        .await
        .context("failed to ensure schema")?;

    let server = TaskboardServer::new(ServerConfig::from(settings), TaskService::new(store));
    let (addr, handle) = server
        .listen()
        .await
        .context("failed to start server")?;
    info!(%addr, "taskboard ready");

    shutdown_signal().await;
    info!("shutting down");
    server
        .shutdown()
        .graceful_shutdown(vec![handle], Some(DRAIN_TIMEOUT))
        .await;
    Ok(())
}
