//! Differetmix API (v1)
//!
//! # Architecture Overview
//!
//! ```text
//!                       ┌──────────────────────────────────────────────────┐
//!                       │                  DIFFERETMIX API                  │
//!                       │                                                   │
//!   Client Request      │  ┌──────────┐   ┌──────────────┐   ┌──────────┐  │
//!   ────────────────────┼─▶│   http   │──▶│    routes    │──▶│  store   │──┼──▶ MongoDB
//!                       │  │  server  │   │  (handlers)  │   │ products │  │
//!                       │  └──────────┘   └──────────────┘   └──────────┘  │
//!                       │                                                   │
//!                       │  ┌─────────┐ ┌──────────────┐ ┌──────────┐       │
//!                       │  │ config  │ │observability │ │ security │       │
//!                       │  └─────────┘ └──────────────┘ └──────────┘       │
//!                       │  ┌──────────────────────────────────────┐        │
//!                       │  │    lifecycle: startup / shutdown     │        │
//!                       │  └──────────────────────────────────────┘        │
//!                       └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use clap::Parser;

use differetmix_api::lifecycle::startup::{self, StartupOptions, StoreChoice};
use differetmix_api::observability::logging;
use differetmix_api::Settings;

#[derive(Parser)]
#[command(name = "differetmix-api", version, about = "Differetmix HTTP API")]
struct Args {
    /// Path to a TOML settings file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Serve products from memory instead of MongoDB.
    #[arg(long)]
    memory_store: bool,

    /// JSON array of products loaded into the in-memory store.
    #[arg(long, requires = "memory_store")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let store = if args.memory_store {
        StoreChoice::Memory { seed: args.seed }
    } else {
        StoreChoice::Mongo
    };

    let result = startup::run(StartupOptions {
        config_path: args.config,
        store,
    })
    .await;

    match result {
        Ok(()) => tracing::info!("Shutdown complete"),
        Err(e) => {
            // Settings may have failed before logging was set up.
            logging::init_logging(&Settings::default());
            tracing::error!(error = %e, "Startup failed");
            std::process::exit(1);
        }
    }
}
