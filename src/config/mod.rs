//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ServerConfig (validated, immutable)
//!     → I18nConfig shared via Arc with the routing middleware
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{
    BuildFormat, ContentConfig, I18nConfig, ListenerConfig, Locale, ObservabilityConfig,
    RoutingStrategy, ServerConfig, TimeoutConfig, TrailingSlash,
};
pub use validation::{log_warnings, ValidationError, ValidationWarning};
