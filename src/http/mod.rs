//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → routing::classify_middleware (RouteContext)
//!     → i18n::i18n_middleware (locale policy)
//!     → pages.rs (content lookup)
//!     → Send to client
//! ```

pub mod pages;
pub mod server;

pub use server::{build_router, HttpServer};
