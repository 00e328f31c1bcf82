//! MongoDB-backed product store.

use async_trait::async_trait;
use mongodb::bson::doc;
use mongodb::{Client, Collection, Database};

use crate::models::Product;
use crate::store::{ProductStore, StoreError};

/// Product store reading from a MongoDB collection.
#[derive(Clone)]
pub struct MongoProductStore {
    database: Database,
    products: Collection<Product>,
}

impl MongoProductStore {
    /// Build a client from `url` and scope it to `database.collection`.
    ///
    /// The driver connects lazily; the first query or [`ProductStore::ping`]
    /// opens the connection pool.
    pub async fn connect(url: &str, database: &str, collection: &str) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(url).await?;
        let database = client.database(database);
        let products = database.collection::<Product>(collection);

        tracing::info!(
            database = %database.name(),
            collection = %products.name(),
            "Document store client created"
        );

        Ok(Self { database, products })
    }
}

#[async_trait]
impl ProductStore for MongoProductStore {
    async fn find_by_ean(&self, ean: &str) -> Result<Option<Product>, StoreError> {
        let product = self.products.find_one(doc! { "ean": ean }).await?;
        Ok(product)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
