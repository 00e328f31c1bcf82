//! Request extractors that reject with [`ApiError`].

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Json, Query, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::http::error::{ApiError, Location};

/// JSON body deserialized into `T` and checked with [`Validate`].
///
/// A body without a `Content-Type` header is parsed as JSON; any other
/// non-JSON content type is rejected.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = if req.headers().contains_key(CONTENT_TYPE) {
            Json::<T>::from_request(req, state).await?
        } else {
            let body = Bytes::from_request(req, state).await?;
            Json::<T>::from_bytes(&body)?
        };
        value
            .validate()
            .map_err(|e| ApiError::from_validation(Location::Body, &e))?;
        Ok(Self(value))
    }
}

/// Query string deserialized into `T` and checked with [`Validate`].
#[derive(Debug, Clone)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        value
            .validate()
            .map_err(|e| ApiError::from_validation(Location::Query, &e))?;
        Ok(Self(value))
    }
}

/// Common `q` / `skip` / `limit` query parameters.
///
/// `skip` and `limit` are signed and passed through untouched; consumers
/// decide what a negative value means.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    100
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            q: None,
            skip: 0,
            limit: default_limit(),
        }
    }
}

impl Pagination {
    /// `q` when present and non-empty.
    pub fn query(&self) -> Option<&str> {
        self.q.as_deref().filter(|q| !q.is_empty())
    }
}

impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(pagination) = Query::<Pagination>::from_request_parts(parts, state).await?;
        Ok(pagination)
    }
}
