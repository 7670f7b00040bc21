//! Route classification subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (path)
//!     → classifier.rs (page, fallback page or other)
//!     → RouteContext inserted into request extensions
//!     → i18n middleware reads the context explicitly
//! ```
//!
//! # Design Decisions
//! - Classification happens once per request, before the handler runs
//! - The result travels as a typed value, never as ad-hoc request annotations
//! - No regex in hot path (segment and suffix checks only)

pub mod classifier;

pub use classifier::{
    classify_middleware, Classifier, RouteClassification, RouteClassifier, RouteContext,
};
