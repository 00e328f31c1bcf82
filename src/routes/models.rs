use axum::extract::Path;
use axum::Json;
use serde::Serialize;

use crate::http::error::{ApiError, Location};
use crate::models::{ModelName, UnknownModel};

#[derive(Debug, Serialize)]
pub struct ModelResponse {
    pub model_name: ModelName,
    pub message: &'static str,
}

/// `GET /models/{model_name}`
pub async fn get_model(Path(raw): Path<String>) -> Result<Json<ModelResponse>, ApiError> {
    let model_name: ModelName = raw
        .parse()
        .map_err(|e: UnknownModel| {
            ApiError::invalid(Location::Path, Some("model_name"), e.to_string(), "enum")
        })?;

    Ok(Json(ModelResponse {
        model_name,
        message: model_name.message(),
    }))
}
