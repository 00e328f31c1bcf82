//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! .env file (optional, never overrides the real environment)
//!     → config file (TOML, optional)
//!     → loader.rs (parse, deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → Settings (validated, immutable)
//!     → shared via Arc with every handler
//! ```
//!
//! # Design Decisions
//! - Settings are immutable once loaded
//! - All fields have defaults except the document store URL
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_env_file, load_settings, ConfigError};
pub use schema::{
    ListenerConfig, LogFormat, ObservabilityConfig, SecurityConfig, Settings, TimeoutConfig,
};
pub use validation::{StoreRequirement, ValidationError};
