//! Settings loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{LogFormat, Settings};
use crate::config::validation::{validate_settings, StoreRequirement, ValidationError};

/// Error type for settings loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid .env file: {0}")]
    DotEnv(#[from] dotenvy::Error),

    #[error("Invalid value for {key}: '{value}'")]
    Env { key: &'static str, value: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load settings: `.env` file, then the optional TOML file, then environment
/// overrides, then validation.
pub fn load_settings(
    path: Option<&Path>,
    store: StoreRequirement,
) -> Result<Settings, ConfigError> {
    load_env_file(Path::new(".env"))?;

    let mut settings = match path {
        Some(path) => parse_settings(&fs::read_to_string(path)?)?,
        None => Settings::default(),
    };

    apply_env_overrides(&mut settings, |key| std::env::var(key).ok())?;
    validate_settings(&settings, store).map_err(ConfigError::Validation)?;

    Ok(settings)
}

/// Export the variables in the env file at `path` that are not already
/// set. Returns `false` when there is no such file.
pub fn load_env_file(path: &Path) -> Result<bool, ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(true),
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(e.into()),
    }
}

/// Parse settings from TOML text without validating them.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Overlay environment variables onto `settings`.
///
/// `lookup` abstracts the process environment so overrides can be tested.
pub fn apply_env_overrides<F>(settings: &mut Settings, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(v) = lookup("APP_NAME") {
        settings.app_name = v;
    }
    if let Some(v) = lookup("DEBUG") {
        settings.debug = parse_bool("DEBUG", v)?;
    }
    if let Some(v) = lookup("ENVIRONMENT").or_else(|| lookup("ENVIROMENT")) {
        settings.environment = v;
    }
    if let Some(v) = lookup("MONGODB_URL") {
        settings.mongodb_url = v;
    }
    if let Some(v) = lookup("MONGODB_DATABASE") {
        settings.mongodb_database = v;
    }
    if let Some(v) = lookup("PRODUCTS_COLLECTION") {
        settings.products_collection = v;
    }
    if let Some(v) = lookup("BIND_ADDRESS") {
        settings.listener.bind_address = v;
    }
    if let Some(v) = lookup("LOG_LEVEL") {
        settings.observability.log_level = v;
    }
    if let Some(v) = lookup("LOG_FORMAT") {
        settings.observability.log_format = Some(match v.to_ascii_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            "json" => LogFormat::Json,
            _ => return Err(ConfigError::Env { key: "LOG_FORMAT", value: v }),
        });
    }
    Ok(())
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Env { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.app_name, "Differetmix API");
        assert!(settings.debug);
        assert_eq!(settings.environment, "development");
        assert_eq!(settings.listener.bind_address, "0.0.0.0:8000");
    }

    #[test]
    fn test_parse_partial_file() {
        let settings = parse_settings(
            r#"
            mongodb_url = "mongodb://db:27017"
            enviroment = "staging"

            [listener]
            bind_address = "127.0.0.1:9000"
            "#,
        )
        .unwrap();

        assert_eq!(settings.mongodb_url, "mongodb://db:27017");
        assert_eq!(settings.environment, "staging");
        assert_eq!(settings.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(settings.listener.max_connections, 10_000);
        assert_eq!(settings.app_name, "Differetmix API");
    }

    #[test]
    fn test_parse_error() {
        assert!(matches!(
            parse_settings("debug = \"sometimes\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_env_file_is_skipped() {
        let path = std::env::temp_dir().join(format!("absent-{}.env", std::process::id()));
        assert!(!load_env_file(&path).unwrap());
    }

    #[test]
    fn test_malformed_env_file_is_an_error() {
        let dir = std::env::temp_dir().join(format!("dotenv-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(".env");
        fs::write(&path, "this line is not an assignment\n").unwrap();

        let err = load_env_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::DotEnv(_)));
        assert!(err.to_string().starts_with("Invalid .env file"));

        fs::remove_dir_all(dir).unwrap_or_default();
    }

    #[test]
    fn test_env_overrides() {
        let mut settings = Settings::default();
        apply_env_overrides(
            &mut settings,
            env(&[
                ("APP_NAME", "Other API"),
                ("DEBUG", "false"),
                ("ENVIROMENT", "production"),
                ("MONGODB_URL", "mongodb://mongo:27017"),
                ("LOG_FORMAT", "JSON"),
            ]),
        )
        .unwrap();

        assert_eq!(settings.app_name, "Other API");
        assert!(!settings.debug);
        assert!(settings.is_production());
        assert_eq!(settings.mongodb_url, "mongodb://mongo:27017");
        assert_eq!(settings.observability.log_format, Some(LogFormat::Json));
    }

    #[test]
    fn test_current_spelling_wins() {
        let mut settings = Settings::default();
        apply_env_overrides(
            &mut settings,
            env(&[("ENVIRONMENT", "staging"), ("ENVIROMENT", "production")]),
        )
        .unwrap();
        assert_eq!(settings.environment, "staging");
    }

    #[test]
    fn test_bad_env_value() {
        let mut settings = Settings::default();
        let err = apply_env_overrides(&mut settings, env(&[("DEBUG", "maybe")])).unwrap_err();
        assert!(matches!(err, ConfigError::Env { key: "DEBUG", .. }));
    }
}
