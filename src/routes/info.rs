use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

use crate::http::server::AppState;

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub app_name: String,
    pub environment: String,
    pub debug: bool,
}

/// `GET /info`
pub async fn info(State(state): State<AppState>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        app_name: state.settings.app_name.clone(),
        environment: state.settings.environment.clone(),
        debug: state.settings.debug,
    })
}

/// `GET /health`: 200 while the product store answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.products.ping().await {
        Ok(()) => (StatusCode::OK, Json(json!({ "status": "ok" }))),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "degraded" })))
        }
    }
}
