//! Locale routing for HTTP servers.
//!
//! Decides, after the page handler has answered, whether a response passes
//! through, becomes a 404, redirects to a locale-prefixed URL, or redirects a
//! missing translation to its fallback locale.

pub mod config;
pub mod http;
pub mod i18n;
pub mod observability;
pub mod routing;

pub use config::schema::{I18nConfig, ServerConfig};
pub use http::HttpServer;
pub use i18n::{Decision, RoutingPolicy};
