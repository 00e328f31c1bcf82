use axum::extract::Path;
use axum::Json;
use serde_json::{json, Value};

use crate::http::error::ApiError;

/// The one name that makes unicorns misbehave.
pub const CURSED_NAME: &str = "yolo";

/// `GET /unicorns/{name}`
pub async fn read_unicorn(Path(name): Path<String>) -> Result<Json<Value>, ApiError> {
    if name == CURSED_NAME {
        return Err(ApiError::Unicorn { name });
    }
    Ok(Json(json!({ "unicorn_name": name })))
}
