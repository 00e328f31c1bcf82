use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::Json;
use serde_json::{json, Value};

use crate::http::error::{ApiError, Location};

/// The only content type accepted by the upload route.
pub const ACCEPTED_CONTENT_TYPE: &str = "image/jpeg";

/// `POST /uploadfile/`. Expects a multipart `file` part holding a JPEG.
pub async fn create_upload_file(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<Value>, ApiError> {
    let mut multipart = multipart?;
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_owned);
        if content_type.as_deref() != Some(ACCEPTED_CONTENT_TYPE) {
            tracing::info!(
                filename = %filename,
                content_type = ?content_type,
                "Rejected non-JPEG upload"
            );
            return Err(ApiError::Http {
                status: StatusCode::BAD_REQUEST,
                detail: "Only JPEG allowed".to_string(),
                headers: vec![(
                    HeaderName::from_static("x-error"),
                    HeaderValue::from_static("There goes my error"),
                )],
            });
        }

        let size = field.bytes().await?.len();
        tracing::debug!(filename = %filename, size, "Upload accepted");
        return Ok(Json(json!({ "filename": filename })));
    }

    Err(ApiError::invalid(Location::Body, Some("file"), "Field required", "missing"))
}
