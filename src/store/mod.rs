//! Storage subsystem.
//!
//! # Data Flow
//! ```text
//! products handler
//!     → ProductStore (trait object shared through AppState)
//!         → mongo.rs  (document collection, equality query on `ean`)
//!         → memory.rs (concurrent map, tests and database-less runs)
//!
//! item handlers
//!     → items.rs (in-process item records)
//! ```
//!
//! # Design Decisions
//! - The product store is read-only; records are owned by the database
//! - A missing record is `Ok(None)`, never an error
//! - Connection construction happens once at startup

pub mod items;
pub mod memory;
pub mod mongo;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::Product;

pub use items::ItemStore;
pub use memory::MemoryProductStore;
pub use mongo::MongoProductStore;

/// Errors raised by a product store backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("document store unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the product collection.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Return the first product whose `ean` equals `ean`, if any.
    async fn find_by_ean(&self, ean: &str) -> Result<Option<Product>, StoreError>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
