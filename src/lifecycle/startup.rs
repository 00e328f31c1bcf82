//! Startup orchestration.
//!
//! # Responsibilities
//! - Load and validate settings
//! - Initialize logging, metrics and the product store in order
//! - Bind the listener and serve until a termination signal
//! - Bound the drain period after the signal
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Listener binds last (traffic only when ready)

use std::fs;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::{load_settings, ConfigError, Settings, StoreRequirement};
use crate::http::ApiServer;
use crate::lifecycle::{signals, Shutdown};
use crate::models::Product;
use crate::observability::{logging, metrics};
use crate::store::{MemoryProductStore, MongoProductStore, ProductStore, StoreError};

/// Where products are read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChoice {
    /// The MongoDB collection named in settings.
    Mongo,
    /// An in-memory map, optionally seeded from a JSON array of products.
    Memory { seed: Option<PathBuf> },
}

/// Options collected from the command line.
#[derive(Debug, Clone)]
pub struct StartupOptions {
    pub config_path: Option<PathBuf>,
    pub store: StoreChoice,
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid product seed file: {0}")]
    Seed(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run the service until a termination signal and the drain that follows.
pub async fn run(options: StartupOptions) -> Result<(), StartupError> {
    let requirement = match options.store {
        StoreChoice::Mongo => StoreRequirement::Mongo,
        StoreChoice::Memory { .. } => StoreRequirement::Memory,
    };
    let settings = load_settings(options.config_path.as_deref(), requirement)?;

    logging::init_logging(&settings);
    tracing::info!(
        app_name = %settings.app_name,
        environment = %settings.environment,
        debug = settings.debug,
        bind_address = %settings.listener.bind_address,
        request_timeout_secs = settings.timeouts.request_secs,
        "Configuration loaded"
    );

    if settings.observability.metrics_enabled {
        match settings.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %settings.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let products = open_store(&settings, &options.store).await?;

    let listener = TcpListener::bind(&settings.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let drain = Duration::from_secs(settings.timeouts.shutdown_secs);
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    let mut signalled = shutdown.subscribe();
    tokio::spawn(signals::trigger_on_signal(shutdown.clone()));

    let server = ApiServer::new(settings, products);
    let mut server_task = tokio::spawn(server.run(listener, server_shutdown));

    tokio::select! {
        result = &mut server_task => return Ok(result??),
        _ = signalled.recv() => {}
    }

    match tokio::time::timeout(drain, &mut server_task).await {
        Ok(result) => Ok(result??),
        Err(_) => {
            tracing::warn!(drain_secs = drain.as_secs(), "Drain deadline passed, aborting open connections");
            server_task.abort();
            Ok(())
        }
    }
}

/// Build the configured product store.
pub async fn open_store(
    settings: &Settings,
    choice: &StoreChoice,
) -> Result<Arc<dyn ProductStore>, StartupError> {
    match choice {
        StoreChoice::Mongo => {
            let store = MongoProductStore::connect(
                &settings.mongodb_url,
                &settings.mongodb_database,
                &settings.products_collection,
            )
            .await?;
            if let Err(e) = store.ping().await {
                tracing::warn!(error = %e, "Document store not reachable yet; lookups will retry per request");
            }
            Ok(Arc::new(store))
        }
        StoreChoice::Memory { seed } => {
            let products: Vec<Product> = match seed {
                Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
                None => Vec::new(),
            };
            let store = MemoryProductStore::with_products(products);
            tracing::info!(products = store.len(), "Using in-memory product store");
            Ok(Arc::new(store))
        }
    }
}
