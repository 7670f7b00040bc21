//! Route classification.
//!
//! # Responsibilities
//! - Tag each request as a page, a fallback page, or something else (assets)
//! - Attach the tag to the request as a [`RouteContext`]
//!
//! # Design Decisions
//! - A last segment with a file extension is an asset
//! - A page whose locale has a configured fallback is a fallback page
//! - Everything else is a page

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::config::schema::I18nConfig;
use crate::i18n::locale::find_locale_segment;

/// Kind of route a request resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClassification {
    Page,
    FallbackPage,
    Other,
}

impl RouteClassification {
    /// Page routes are the only ones the locale policy governs.
    pub fn is_page(self) -> bool {
        matches!(self, RouteClassification::Page | RouteClassification::FallbackPage)
    }
}

/// Per-request routing context, created by [`classify_middleware`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteContext {
    pub path: String,
    pub classification: RouteClassification,
}

impl RouteContext {
    pub fn new(path: impl Into<String>, classification: RouteClassification) -> Self {
        Self {
            path: path.into(),
            classification,
        }
    }
}

/// Trait for classifying request paths.
pub trait Classifier: Send + Sync + std::fmt::Debug {
    fn classify(&self, path: &str) -> RouteClassification;
}

/// Default classifier driven by the i18n configuration.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    config: Arc<I18nConfig>,
}

impl RouteClassifier {
    pub fn new(config: Arc<I18nConfig>) -> Self {
        Self { config }
    }
}

impl Classifier for RouteClassifier {
    fn classify(&self, path: &str) -> RouteClassification {
        let last = path.rsplit('/').next().unwrap_or_default();
        if last.contains('.') {
            return RouteClassification::Other;
        }

        let has_fallback = find_locale_segment(path, &self.config.locales).is_some_and(
            |(_, locale)| {
                self.config.fallback.contains_key(locale.path())
                    || locale
                        .codes()
                        .iter()
                        .any(|code| self.config.fallback.contains_key(code))
            },
        );

        if has_fallback {
            RouteClassification::FallbackPage
        } else {
            RouteClassification::Page
        }
    }
}

/// Middleware that classifies the request and attaches a [`RouteContext`].
pub async fn classify_middleware(
    State(classifier): State<Arc<dyn Classifier>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    let classification = classifier.classify(&path);

    tracing::trace!(path = %path, classification = ?classification, "Route classified");

    request
        .extensions_mut()
        .insert(RouteContext::new(path, classification));
    next.run(request).await
}
