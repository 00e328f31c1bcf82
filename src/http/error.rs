//! Handler errors and their HTTP mapping.
//!
//! Every handler returns `Result<_, ApiError>`; this is the single place
//! where failures become status codes and JSON bodies.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::{BytesRejection, JsonRejection, PathRejection, QueryRejection};
use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use validator::ValidationErrors;

use crate::store::StoreError;

/// Where a rejected value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Location {
    Body,
    Query,
    Path,
}

/// One entry of a 422 `detail` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub loc: Vec<serde_json::Value>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl FieldViolation {
    pub fn new(location: Location, field: Option<&str>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        let mut loc = vec![json!(location)];
        if let Some(field) = field {
            loc.push(json!(field));
        }
        Self {
            loc,
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request validation failed")]
    Validation(Vec<FieldViolation>),

    #[error("{0}")]
    NotFound(&'static str),

    #[error("{detail}")]
    Http {
        status: StatusCode,
        detail: String,
        headers: Vec<(HeaderName, HeaderValue)>,
    },

    #[error("unicorn {name} misbehaved")]
    Unicorn { name: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ApiError {
    /// A validation error with a single violation.
    pub fn invalid(location: Location, field: Option<&str>, msg: impl Into<String>, kind: impl Into<String>) -> Self {
        ApiError::Validation(vec![FieldViolation::new(location, field, msg, kind)])
    }

    /// Convert `validator` output into a validation error.
    pub fn from_validation(location: Location, errors: &ValidationErrors) -> Self {
        let mut violations = Vec::new();
        collect_violations(location, &mut Vec::new(), errors, &mut violations);
        ApiError::Validation(violations)
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Http { status, .. } => *status,
            ApiError::Unicorn { .. } => StatusCode::IM_A_TEAPOT,
            ApiError::Store(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

fn collect_violations(
    location: Location,
    path: &mut Vec<String>,
    errors: &ValidationErrors,
    out: &mut Vec<FieldViolation>,
) {
    use validator::ValidationErrorsKind;

    // Sort for stable output; the underlying map is unordered.
    let mut fields: Vec<_> = errors.errors().iter().collect();
    fields.sort_by(|a, b| a.0.cmp(b.0));

    for (field, kind) in fields {
        path.push(field.to_string());
        match kind {
            ValidationErrorsKind::Field(list) => {
                for error in list {
                    let mut loc = vec![json!(location)];
                    loc.extend(path.iter().map(|p| json!(p)));
                    out.push(FieldViolation {
                        loc,
                        msg: error
                            .message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| describe(error)),
                        kind: error.code.to_string(),
                    });
                }
            }
            ValidationErrorsKind::Struct(inner) => collect_violations(location, path, inner, out),
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    path.push(index.to_string());
                    collect_violations(location, path, inner, out);
                    path.pop();
                }
            }
        }
        path.pop();
    }
}

fn describe(error: &validator::ValidationError) -> String {
    let param = |name: &str| error.params.get(name).map(|v| v.to_string());
    match &*error.code {
        "length" => match (param("min"), param("max")) {
            (Some(min), Some(max)) => format!("Length should be between {} and {}", min, max),
            (Some(min), None) => format!("Length should be at least {}", min),
            (None, Some(max)) => format!("Length should be at most {}", max),
            (None, None) => "Invalid length".to_string(),
        },
        code => format!("Validation failed: {}", code),
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let kind = match rejection {
            JsonRejection::JsonDataError(_) => "json_data",
            JsonRejection::JsonSyntaxError(_) => "json_invalid",
            JsonRejection::MissingJsonContentType(_) => "content_type",
            _ => "body",
        };
        ApiError::invalid(Location::Body, None, rejection.body_text(), kind)
    }
}

impl From<BytesRejection> for ApiError {
    fn from(rejection: BytesRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::Http {
                status: StatusCode::PAYLOAD_TOO_LARGE,
                detail: rejection.body_text(),
                headers: Vec::new(),
            };
        }
        ApiError::invalid(Location::Body, None, rejection.body_text(), "body")
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid(Location::Query, None, rejection.body_text(), "query_parse")
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid(Location::Path, None, rejection.body_text(), "path_parse")
    }
}

impl From<MultipartError> for ApiError {
    fn from(error: MultipartError) -> Self {
        ApiError::invalid(Location::Body, None, error.body_text(), "multipart")
    }
}

impl From<MultipartRejection> for ApiError {
    fn from(rejection: MultipartRejection) -> Self {
        ApiError::invalid(Location::Body, None, rejection.body_text(), "multipart")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            ApiError::Validation(detail) => {
                tracing::debug!(violations = detail.len(), "Request rejected by validation");
                (status, Json(json!({ "detail": detail }))).into_response()
            }
            ApiError::NotFound(detail) => (status, Json(json!({ "detail": detail }))).into_response(),
            ApiError::Http { detail, headers, .. } => {
                let mut response = (status, Json(json!({ "detail": detail }))).into_response();
                response.headers_mut().extend(headers);
                response
            }
            ApiError::Unicorn { name } => (
                status,
                Json(json!({
                    "message": format!("Oops! {} did something. There goes a rainbow...", name)
                })),
            )
                .into_response(),
            ApiError::Store(e) => {
                tracing::error!(error = %e, "Document store failure");
                (status, Json(json!({ "detail": "Document store unavailable" }))).into_response()
            }
        }
    }
}
