//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, timeout, limits, metrics)
//! - Bind server to listener
//! - Stop accepting and drain on shutdown

use std::sync::Arc;
use std::time::Duration;
use axum::body::Body;
use axum::{middleware, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::http::request::{request_span, MakeRequestUuidV4};
use crate::observability::metrics;
use crate::routes::api_routes;
use crate::security::{headers::with_security_headers, limits::with_limits};
use crate::store::{ItemStore, ProductStore};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub products: Arc<dyn ProductStore>,
    pub items: ItemStore,
}

impl AppState {
    pub fn new(settings: Settings, products: Arc<dyn ProductStore>) -> Self {
        Self {
            settings: Arc::new(settings),
            products,
            items: ItemStore::seeded(),
        }
    }
}

/// HTTP server for the API.
pub struct ApiServer {
    router: Router,
    settings: Arc<Settings>,
}

impl ApiServer {
    /// Create a new HTTP server with the given settings and product store.
    pub fn new(settings: Settings, products: Arc<dyn ProductStore>) -> Self {
        let state = AppState::new(settings, products);
        let settings = state.settings.clone();
        let router = Self::build_router(&settings, state);
        Self { router, settings }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(settings: &Settings, state: AppState) -> Router {
        let router = api_routes()
            .with_state(state)
            .layer(middleware::from_fn(metrics::track_requests));

        let router = if settings.security.enable_headers {
            with_security_headers(router)
        } else {
            router
        };

        with_limits(router, settings)
            .layer(TimeoutLayer::new(Duration::from_secs(settings.timeouts.request_secs)))
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(request_span::<Body>))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            app_name = %self.settings.app_name,
            environment = %self.settings.environment,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Get a reference to the settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
