//! In-memory product store.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use async_trait::async_trait;
use dashmap::DashMap;

use crate::models::Product;
use crate::store::{ProductStore, StoreError};

/// A thread-safe product map keyed by EAN.
#[derive(Clone, Default)]
pub struct MemoryProductStore {
    inner: Arc<DashMap<String, Product>>,
    offline: Arc<AtomicBool>,
}

impl MemoryProductStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products`. Later duplicates of an EAN win.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let store = Self::new();
        for product in products {
            store.insert(product);
        }
        store
    }

    /// Insert or replace a product.
    pub fn insert(&self, product: Product) {
        self.inner.insert(product.ean.clone(), product);
    }

    /// Number of stored products.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Simulate an unreachable backend: every call fails until reset.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::Relaxed);
    }

    fn check_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::Relaxed) {
            Err(StoreError::Unavailable("memory store is offline".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn find_by_ean(&self, ean: &str) -> Result<Option<Product>, StoreError> {
        self.check_online()?;
        Ok(self.inner.get(ean).map(|r| r.value().clone()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_online()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn product(ean: &str, title: &str) -> Product {
        Product {
            ean: ean.to_string(),
            title: title.to_string(),
            price: 4.99,
            quantity: None,
            images: vec![],
            url: format!("https://shop.example/{}", ean),
            ingredients: BTreeMap::new(),
            pigments: BTreeMap::new(),
            safety_classifications: BTreeMap::new(),
        }
    }

    #[tokio::test]
    async fn test_lookup() {
        let store = MemoryProductStore::with_products([product("123", "Soap")]);

        let hit = store.find_by_ean("123").await.unwrap();
        assert_eq!(hit.map(|p| p.title), Some("Soap".to_string()));

        assert!(store.find_by_ean("999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_ean_replaces() {
        let store = MemoryProductStore::with_products([product("1", "Old"), product("1", "New")]);
        assert_eq!(store.len(), 1);
        assert_eq!(store.find_by_ean("1").await.unwrap().unwrap().title, "New");
    }

    #[tokio::test]
    async fn test_offline() {
        let store = MemoryProductStore::new();
        store.set_offline(true);
        assert!(store.ping().await.is_err());
        assert!(matches!(
            store.find_by_ean("1").await,
            Err(StoreError::Unavailable(_))
        ));

        store.set_offline(false);
        assert!(store.ping().await.is_ok());
    }
}
