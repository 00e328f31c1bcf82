//! Settings validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, addresses parse)
//! - Check the document store URL
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: Settings → Result<(), Vec<ValidationError>>
//! - Runs before settings are accepted into the system

use std::net::SocketAddr;
use thiserror::Error;
use url::Url;

use crate::config::schema::Settings;

/// A single semantic problem found in the settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("mongodb_url is required")]
    MissingMongoUrl,

    #[error("mongodb_url is invalid: {0}")]
    InvalidMongoUrl(String),

    #[error("listener.bind_address '{0}' is not a socket address")]
    InvalidBindAddress(String),

    #[error("observability.metrics_address '{0}' is not a socket address")]
    InvalidMetricsAddress(String),

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

/// Whether the document store URL must be present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreRequirement {
    Mongo,
    Memory,
}

/// Validate settings, collecting every error.
pub fn validate_settings(
    settings: &Settings,
    store: StoreRequirement,
) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if store == StoreRequirement::Mongo {
        if settings.mongodb_url.trim().is_empty() {
            errors.push(ValidationError::MissingMongoUrl);
        } else if let Err(e) = check_mongo_url(&settings.mongodb_url) {
            errors.push(e);
        }
        if settings.mongodb_database.trim().is_empty() {
            errors.push(ValidationError::Empty("mongodb_database"));
        }
        if settings.products_collection.trim().is_empty() {
            errors.push(ValidationError::Empty("products_collection"));
        }
    }

    if settings.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            settings.listener.bind_address.clone(),
        ));
    }
    if settings.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }
    if settings.timeouts.request_secs == 0 {
        errors.push(ValidationError::Zero("timeouts.request_secs"));
    }
    if settings.security.max_body_size == 0 {
        errors.push(ValidationError::Zero("security.max_body_size"));
    }
    if settings.observability.metrics_enabled
        && settings
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            settings.observability.metrics_address.clone(),
        ));
    }
    if settings.app_name.trim().is_empty() {
        errors.push(ValidationError::Empty("app_name"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_mongo_url(raw: &str) -> Result<(), ValidationError> {
    let url = Url::parse(&first_seed(raw))
        .map_err(|e| ValidationError::InvalidMongoUrl(e.to_string()))?;
    match url.scheme() {
        "mongodb" | "mongodb+srv" => {}
        other => {
            return Err(ValidationError::InvalidMongoUrl(format!(
                "unsupported scheme '{}'",
                other
            )))
        }
    }
    if url.host_str().map_or(true, str::is_empty) {
        return Err(ValidationError::InvalidMongoUrl("missing host".to_string()));
    }
    Ok(())
}

/// Reduce a replica-set seed list (`host1:27017,host2:27017`) to its first
/// host so the URL parses as a single authority.
fn first_seed(raw: &str) -> String {
    let Some(scheme_end) = raw.find("://") else {
        return raw.to_string();
    };
    let rest = &raw[scheme_end + 3..];
    let authority_end = rest.find(['/', '?']).unwrap_or(rest.len());
    let authority = &rest[..authority_end];
    let first = authority.split(',').next().unwrap_or(authority);
    format!("{}{}{}", &raw[..scheme_end + 3], first, &rest[authority_end..])
}
