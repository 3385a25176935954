//! CLI command implementations
//!
//! Each command loads the configuration, installs logging, then runs to
//! completion. `serve` owns a tokio runtime; `console` is fully blocking.

use std::io;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::auth::ApiKey;
use crate::client::{ConsoleAgent, HttpTransport};
use crate::config::{Config, StoreBackend};
use crate::observability;
use crate::rest_api::{CourseService, RestServer};
use crate::store::{CourseStore, InMemoryCourseStore, SqliteCourseStore};

use super::args::Command;
use super::errors::{CliError, CliResult};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, store } => serve(&config, store),
        Command::Console { config } => console(&config),
        Command::InitDb { config } => init_db(&config),
    }
}

/// Open the datastore for `backend`
pub fn open_store(config: &Config, backend: StoreBackend) -> CliResult<Arc<dyn CourseStore>> {
    match backend {
        StoreBackend::Memory => Ok(Arc::new(InMemoryCourseStore::new())),
        StoreBackend::Sqlite => Ok(Arc::new(SqliteCourseStore::open(&config.store.path)?)),
    }
}

/// Run the REST API until the listener fails.
///
/// `store_override` replaces the configured backend.
pub fn serve(config_path: &Path, store_override: Option<StoreBackend>) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let _log_guard = observability::init(&config.logging);

    let addr: SocketAddr = config.server.socket_addr().parse().map_err(|e| {
        CliError::config_error(format!(
            "Invalid listen address {}: {}",
            config.server.socket_addr(),
            e
        ))
    })?;

    let backend = store_override.unwrap_or(config.store.backend);
    let store = open_store(&config, backend)?;
    info!(?backend, "Datastore opened");

    let service = CourseService::new(store, ApiKey::new(config.api_key.clone()));
    let server = RestServer::new(service);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start(addr)
            .await
            .map_err(|e| CliError::serve_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Interactive lecturer console on stdin/stdout
pub fn console(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let _log_guard = observability::init(&config.logging);

    let transport = match &config.client.ca_cert {
        Some(cert) => HttpTransport::with_ca_cert(&config.client.base_url, &config.api_key, cert)?,
        None => HttpTransport::new(&config.client.base_url, &config.api_key)?,
    };

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut agent = ConsoleAgent::new(transport, stdin.lock(), stdout.lock());
    agent.run()?;

    Ok(())
}

/// Create the course table in the configured SQLite file.
///
/// Safe to repeat; existing rows are kept.
pub fn init_db(config_path: &Path) -> CliResult<()> {
    let config = Config::load(config_path)?;
    let _log_guard = observability::init(&config.logging);

    if config.store.backend != StoreBackend::Sqlite {
        return Err(CliError::config_error(
            "init-db requires the sqlite store backend",
        ));
    }

    SqliteCourseStore::open(&config.store.path)?;
    info!(path = %config.store.path.display(), "Course table ready");
    println!("Course table ready at {}", config.store.path.display());

    Ok(())
}
