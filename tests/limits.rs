//! In-flight bound, request timeout and graceful drain.

use std::sync::Arc;
use std::time::{Duration, Instant};
use reqwest::StatusCode;
use tokio::net::TcpListener;

use differetmix_api::lifecycle::Shutdown;
use differetmix_api::models::Product;
use differetmix_api::{ApiServer, Settings};

mod common;

const PRODUCT_PATH: &str = "/products/3600523614455";

async fn concurrent_lookups(server: &common::TestServer, count: usize) -> Vec<StatusCode> {
    let requests = (0..count).map(|_| {
        let request = server.client.get(server.url(PRODUCT_PATH)).send();
        tokio::spawn(request)
    });
    let mut statuses = Vec::new();
    for handle in requests.collect::<Vec<_>>() {
        statuses.push(handle.await.unwrap().unwrap().status());
    }
    statuses
}

#[tokio::test]
async fn test_in_flight_requests_wait_for_a_slot() {
    let delay = Duration::from_millis(300);
    let store = common::SlowStore::new(delay);

    let mut settings = Settings::default();
    settings.listener.max_connections = 1;
    let server = common::start_server_with(settings, Arc::new(store.clone())).await;

    let started = Instant::now();
    let statuses = concurrent_lookups(&server, 3).await;

    assert!(statuses.iter().all(|s| *s == StatusCode::OK), "{:?}", statuses);
    assert_eq!(store.peak(), 1);
    // Each request waited for the one before it.
    assert!(started.elapsed() >= delay * 3 - Duration::from_millis(50));
}

#[tokio::test]
async fn test_requests_overlap_below_the_bound() {
    let store = common::SlowStore::new(Duration::from_millis(300));
    let server = common::start_server(Arc::new(store.clone())).await;

    let statuses = concurrent_lookups(&server, 3).await;

    assert!(statuses.iter().all(|s| *s == StatusCode::OK), "{:?}", statuses);
    assert!(store.peak() > 1);
}

#[tokio::test]
async fn test_slow_request_times_out() {
    let mut settings = Settings::default();
    settings.timeouts.request_secs = 1;
    let store = common::SlowStore::new(Duration::from_secs(5));
    let server = common::start_server_with(settings, Arc::new(store)).await;

    let started = Instant::now();
    let res = server.client.get(server.url(PRODUCT_PATH)).send().await.unwrap();

    assert_eq!(res.status(), StatusCode::REQUEST_TIMEOUT);
    assert!(started.elapsed() < Duration::from_secs(4));

    // Routes that answer in time are unaffected.
    let res = server.client.get(server.url("/")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_shutdown_drains_in_flight_request() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}{}", listener.local_addr().unwrap(), PRODUCT_PATH);

    let shutdown = Shutdown::new();
    let store = common::SlowStore::new(Duration::from_millis(500));
    let server = ApiServer::new(Settings::default(), Arc::new(store));
    let server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    let request = tokio::spawn(client.get(url).send());

    // Let the request reach the store before signalling.
    tokio::time::sleep(Duration::from_millis(150)).await;
    shutdown.trigger();

    let res = request.await.unwrap().unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let product: Product = res.json().await.unwrap();
    assert_eq!(product, common::sample_product());

    let stopped = tokio::time::timeout(Duration::from_secs(5), server_task).await;
    assert!(matches!(stopped, Ok(Ok(Ok(())))), "server did not stop after draining");
}
