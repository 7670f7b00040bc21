//! Page handler serving the configured content set.
//!
//! # Responsibilities
//! - Answer 200 for known pages, 404 otherwise
//! - Report the current locale resolved by the i18n middleware
//!
//! # Design Decisions
//! - A trailing slash is insignificant for lookups
//! - Missing localized pages answer 404, which the i18n middleware turns into
//!   a fallback redirect when one is configured

use std::collections::HashSet;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::schema::ContentConfig;
use crate::i18n::CurrentLocale;

/// Known page paths, normalized without a trailing slash.
#[derive(Debug, Clone, Default)]
pub struct PageSet {
    pages: Arc<HashSet<String>>,
}

impl PageSet {
    pub fn from_config(content: &ContentConfig) -> Self {
        Self {
            pages: Arc::new(content.pages.iter().map(|p| normalize(p).to_string()).collect()),
        }
    }

    pub fn contains(&self, path: &str) -> bool {
        self.pages.contains(normalize(path))
    }
}

fn normalize(path: &str) -> &str {
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}

pub async fn page_handler(State(pages): State<PageSet>, request: Request<Body>) -> Response {
    let path = request.uri().path();
    let locale = request
        .extensions()
        .get::<CurrentLocale>()
        .map(|CurrentLocale(code)| code.as_str())
        .unwrap_or("unknown");

    if pages.contains(path) {
        tracing::debug!(path = %path, locale = %locale, "Serving page");
        (StatusCode::OK, format!("{path} [{locale}]")).into_response()
    } else {
        (StatusCode::NOT_FOUND, "Page not found").into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_set_ignores_trailing_slash() {
        let pages = PageSet::from_config(&ContentConfig {
            pages: vec!["/".into(), "/fr/about/".into(), "/blog".into()],
        });
        assert!(pages.contains("/"));
        assert!(pages.contains("/fr/about"));
        assert!(pages.contains("/blog/"));
        assert!(!pages.contains("/de/about"));
    }
}
