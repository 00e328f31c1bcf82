//! Request limits.
//!
//! # Responsibilities
//! - Enforce maximum request body size
//! - Bound the number of in-flight requests
//!
//! # Design Decisions
//! - Body limit applies to extractors (JSON, multipart) and raw bodies alike
//! - Oversized bodies are answered with 413 Payload Too Large
//! - Requests over the concurrency bound wait for a slot (backpressure)

use std::sync::Arc;
use axum::extract::{DefaultBodyLimit, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::sync::Semaphore;
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::Settings;

/// Apply body-size and concurrency limits from settings.
pub fn with_limits(router: Router, settings: &Settings) -> Router {
    let max_body = settings.security.max_body_size;
    let slots = Arc::new(Semaphore::new(settings.listener.max_connections));
    router
        .layer(DefaultBodyLimit::max(max_body))
        .layer(RequestBodyLimitLayer::new(max_body))
        .layer(middleware::from_fn_with_state(slots, limit_in_flight))
}

/// Hold a semaphore permit for the lifetime of the request.
async fn limit_in_flight(
    State(slots): State<Arc<Semaphore>>,
    request: Request,
    next: Next,
) -> Response {
    let Ok(_permit) = slots.clone().acquire_owned().await else {
        return StatusCode::SERVICE_UNAVAILABLE.into_response();
    };

    tracing::trace!(available = slots.available_permits(), "Request slot acquired");
    next.run(request).await
}
