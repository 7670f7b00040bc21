//! Locale routing subsystem.
//!
//! # Data Flow
//! ```text
//! RouteContext (path, classification)
//!     → middleware.rs (axum adapter, current locale)
//!     → downstream handler
//!     → policy.rs (strategy dispatch, fallback rewrite)
//!         ↳ locale.rs (segment matching)
//!         ↳ paths.rs (segment edits, slash policy)
//!     → final response
//! ```
//!
//! # Design Decisions
//! - Configuration is shared read-only via Arc; no per-request state survives
//! - Strategies are a closed enum matched exhaustively

pub mod locale;
pub mod middleware;
pub mod paths;
pub mod policy;

pub use locale::{
    find_locale_in_path, get_locale_by_path, normalize_locale, path_has_locale,
    resolve_fallback_path, to_codes, to_paths,
};
pub use middleware::{current_locale, i18n_middleware, CurrentLocale};
pub use paths::locale_relative_url;
pub use policy::{decide, Decision, FoundRedirector, Redirector, RoutingPolicy};
