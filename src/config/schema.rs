//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the server.
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Root configuration for the locale router.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Locale routing policy.
    pub i18n: I18nConfig,

    /// Pages served by the bundled page handler.
    pub content: ContentConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// A configured locale.
///
/// Either a bare code (`"en"`) used verbatim as the URL segment, or a mapping of
/// one or more codes onto a single URL segment:
///
/// ```toml
/// locales = ["en", { path = "spanish", codes = ["es", "es-ES"] }]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Locale {
    Code(String),
    Mapped { path: String, codes: Vec<String> },
}

impl Locale {
    /// The string that identifies this locale in a URL.
    pub fn path(&self) -> &str {
        match self {
            Locale::Code(code) => code,
            Locale::Mapped { path, .. } => path,
        }
    }

    /// Language codes this locale answers to.
    pub fn codes(&self) -> &[String] {
        match self {
            Locale::Code(code) => std::slice::from_ref(code),
            Locale::Mapped { codes, .. } => codes,
        }
    }
}

impl From<&str> for Locale {
    fn from(code: &str) -> Self {
        Locale::Code(code.to_string())
    }
}

/// How locales appear as URL path prefixes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum RoutingStrategy {
    /// Every locale but the default is prefixed; the default never is.
    #[default]
    #[serde(rename = "pathname-prefix-other-locales")]
    PrefixOtherLocales,
    /// Every route is prefixed; the root redirects to the default locale.
    #[serde(rename = "pathname-prefix-always")]
    PrefixAlways,
    /// Every route is prefixed; nothing redirects.
    #[serde(rename = "pathname-prefix-always-no-redirect")]
    PrefixAlwaysNoRedirect,
}

/// Trailing slash policy for generated URLs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TrailingSlash {
    Always,
    Never,
    #[default]
    Ignore,
}

/// Output layout of built pages; decides the slash when the policy is `ignore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildFormat {
    #[default]
    Directory,
    File,
}

/// Internationalization routing policy.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Supported locales, in priority order.
    pub locales: Vec<Locale>,

    /// Locale treated as the canonical baseline.
    pub default_locale: String,

    /// Prefix strategy.
    pub routing: RoutingStrategy,

    /// Source locale code → fallback locale code.
    pub fallback: BTreeMap<String, String>,

    /// Base path every route lives under (e.g., "/docs"). Empty for the root.
    pub base: String,

    pub trailing_slash: TrailingSlash,

    pub build_format: BuildFormat,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locales: vec![Locale::from("en")],
            default_locale: "en".to_string(),
            routing: RoutingStrategy::default(),
            fallback: BTreeMap::new(),
            base: String::new(),
            trailing_slash: TrailingSlash::default(),
            build_format: BuildFormat::default(),
        }
    }
}

/// Pages the bundled handler knows how to serve.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContentConfig {
    /// Request paths that exist (e.g., "/fr/about").
    pub pages: Vec<String>,
}
