//! Product lookup backed by the document store.

use axum::extract::{Path, State};
use axum::Json;

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::models::Product;
use crate::observability::metrics;

/// `GET /products/{ean}`: single equality lookup on `ean`.
pub async fn get_product(
    State(state): State<AppState>,
    Path(ean): Path<String>,
) -> Result<Json<Product>, ApiError> {
    match state.products.find_by_ean(&ean).await {
        Ok(Some(product)) => {
            metrics::record_product_lookup("hit");
            Ok(Json(product))
        }
        Ok(None) => {
            metrics::record_product_lookup("miss");
            tracing::debug!(ean = %ean, "Product not found");
            Err(ApiError::NotFound("Product not found"))
        }
        Err(e) => {
            metrics::record_product_lookup("error");
            Err(e.into())
        }
    }
}
