use axum::http::{HeaderName, HeaderValue};
use axum::Json;
use serde_json::{json, Value};

const DESCRIPTION: &str = "This is a cool description.";

/// `GET /cool/description`
pub async fn cool_description() -> Json<Value> {
    Json(json!({ "description": DESCRIPTION }))
}

/// `GET /cool/description_deprecated`. Same body, flagged with a
/// `Deprecation` header.
pub async fn cool_description_deprecated() -> ([(HeaderName, HeaderValue); 1], Json<Value>) {
    (
        [(HeaderName::from_static("deprecation"), HeaderValue::from_static("true"))],
        Json(json!({ "description": DESCRIPTION })),
    )
}
