//! Shared utilities for integration testing.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use tokio::net::TcpListener;

use differetmix_api::lifecycle::Shutdown;
use differetmix_api::models::Product;
use differetmix_api::store::{MemoryProductStore, ProductStore, StoreError};
use differetmix_api::{ApiServer, Settings};

/// A running server bound to an ephemeral local port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the API with `store` and test-friendly settings.
pub async fn start_server(store: Arc<dyn ProductStore>) -> TestServer {
    let mut settings = Settings::default();
    settings.listener.bind_address = "127.0.0.1:0".to_string();
    start_server_with(settings, store).await
}

#[allow(dead_code)]
pub async fn start_server_with(settings: Settings, store: Arc<dyn ProductStore>) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = ApiServer::new(settings, store);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    TestServer {
        addr,
        client,
        shutdown,
    }
}

#[allow(dead_code)]
pub fn sample_product() -> Product {
    Product {
        ean: "3600523614455".to_string(),
        title: "Velvet Lipstick".to_string(),
        price: 14.9,
        quantity: Some("3.9 g".to_string()),
        images: vec!["https://cdn.example/lipstick-1.jpg".to_string()],
        url: "https://shop.example/velvet-lipstick".to_string(),
        ingredients: BTreeMap::from([("ricinus communis seed oil".to_string(), "35%".to_string())]),
        pigments: BTreeMap::from([("CI 15850".to_string(), "4%".to_string())]),
        safety_classifications: BTreeMap::from([("lips".to_string(), "approved".to_string())]),
    }
}

/// Memory store preloaded with [`sample_product`].
#[allow(dead_code)]
pub fn sample_store() -> MemoryProductStore {
    MemoryProductStore::with_products([sample_product()])
}

/// Product store that sleeps before every lookup and records how many
/// lookups overlapped.
#[allow(dead_code)]
#[derive(Clone)]
pub struct SlowStore {
    inner: MemoryProductStore,
    delay: Duration,
    active: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl SlowStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: sample_store(),
            delay,
            active: Arc::new(AtomicUsize::new(0)),
            peak: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Highest number of lookups seen in flight at once.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProductStore for SlowStore {
    async fn find_by_ean(&self, ean: &str) -> Result<Option<Product>, StoreError> {
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        self.active.fetch_sub(1, Ordering::SeqCst);
        self.inner.find_by_ean(ean).await
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.inner.ping().await
    }
}
