//! Locale routing policy.
//!
//! # Responsibilities
//! - Let non-page routes through untouched
//! - Enforce the configured prefix strategy on the downstream response
//! - Redirect failed localized pages to their fallback locale
//!
//! # Design Decisions
//! - The decision is a pure function of config, path and status ([`decide`])
//! - The downstream handler is awaited exactly once per request
//! - Synthesized responses are returned directly, never re-inspected
//! - Redirect responses come from an injected [`Redirector`]

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, HeaderValue, StatusCode},
    response::Response,
};

use crate::config::schema::{I18nConfig, RoutingStrategy};
use crate::i18n::locale::{find_locale_segment, path_has_locale, resolve_fallback_path};
use crate::i18n::paths::{
    append_forward_slash, is_root, join_paths, remove_segment, replace_segment, segment_index,
    should_append_forward_slash,
};
use crate::observability::metrics;
use crate::routing::RouteContext;

/// Outcome of the routing policy for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Return the downstream response unchanged.
    PassThrough,
    /// Replace the response with a 404, keeping its headers. `location` is the
    /// canonical URL hint set as the `Location` header.
    NotFound { location: Option<String> },
    /// Redirect to a locale-prefixed location.
    Redirect(String),
    /// Redirect a failed locale's path to its fallback locale's path.
    RedirectWithPathRewrite(String),
}

impl Decision {
    pub fn label(&self) -> &'static str {
        match self {
            Decision::PassThrough => "pass_through",
            Decision::NotFound { .. } => "not_found",
            Decision::Redirect(_) => "redirect",
            Decision::RedirectWithPathRewrite(_) => "fallback_redirect",
        }
    }
}

/// Builds redirect responses.
pub trait Redirector: Send + Sync {
    fn redirect(&self, location: &str) -> Response;
}

/// Plain `302 Found` redirect.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoundRedirector;

impl Redirector for FoundRedirector {
    fn redirect(&self, location: &str) -> Response {
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::FOUND;
        match HeaderValue::from_str(location) {
            Ok(value) => {
                response.headers_mut().insert(header::LOCATION, value);
            }
            Err(_) => {
                tracing::warn!(location = %location, "Redirect location is not a valid header value");
            }
        }
        response
    }
}

/// Decide what to do with a page response for `path` that came back with `status`.
pub fn decide(config: &I18nConfig, path: &str, status: StatusCode) -> Decision {
    match config.routing {
        RoutingStrategy::PrefixOtherLocales => {
            if let Some(index) = segment_index(path, &config.default_locale) {
                return Decision::NotFound {
                    location: Some(remove_segment(path, index)),
                };
            }
        }
        RoutingStrategy::PrefixAlwaysNoRedirect => {
            if !is_root(path, &config.base) && !path_has_locale(path, &config.locales) {
                return Decision::NotFound { location: None };
            }
        }
        RoutingStrategy::PrefixAlways => {
            if is_root(path, &config.base) {
                return Decision::Redirect(default_locale_root(config));
            }
            if !path_has_locale(path, &config.locales) {
                return Decision::NotFound { location: None };
            }
        }
    }

    if status.as_u16() >= 300 && !config.fallback.is_empty() {
        if let Some(rewritten) = fallback_path(config, path) {
            return Decision::RedirectWithPathRewrite(rewritten);
        }
    }

    Decision::PassThrough
}

/// `base/<default locale>`, with the slash policy applied.
fn default_locale_root(config: &I18nConfig) -> String {
    let location = join_paths(&config.base, &config.default_locale);
    if should_append_forward_slash(config.trailing_slash, config.build_format) {
        append_forward_slash(&location)
    } else {
        location
    }
}

/// Rewrite `path` from its locale to that locale's fallback, if one resolves.
fn fallback_path(config: &I18nConfig, path: &str) -> Option<String> {
    let (index, locale) = find_locale_segment(path, &config.locales)?;
    let target = config.fallback.get(locale.path()).or_else(|| {
        locale
            .codes()
            .iter()
            .find_map(|code| config.fallback.get(code))
    })?;
    let target_path = resolve_fallback_path(target, &config.locales)?;

    if target_path == config.default_locale
        && config.routing == RoutingStrategy::PrefixOtherLocales
    {
        Some(remove_segment(path, index))
    } else {
        Some(replace_segment(path, index, target_path))
    }
}

/// The locale routing stage: shared, immutable, safe to clone per request.
#[derive(Clone)]
pub struct RoutingPolicy {
    config: Arc<I18nConfig>,
    redirector: Arc<dyn Redirector>,
}

impl RoutingPolicy {
    pub fn new(config: Arc<I18nConfig>) -> Self {
        Self {
            config,
            redirector: Arc::new(FoundRedirector),
        }
    }

    /// Replace the redirect constructor.
    pub fn with_redirector(mut self, redirector: impl Redirector + 'static) -> Self {
        self.redirector = Arc::new(redirector);
        self
    }

    pub fn config(&self) -> &I18nConfig {
        &self.config
    }

    /// Run `next` and apply the policy to its response.
    pub async fn handle<F, Fut>(&self, ctx: &RouteContext, next: F) -> Response
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Response>,
    {
        if !ctx.classification.is_page() {
            return next().await;
        }

        let response = next().await;
        let decision = decide(&self.config, &ctx.path, response.status());

        metrics::record_decision(decision.label());
        if decision != Decision::PassThrough {
            tracing::debug!(
                path = %ctx.path,
                status = %response.status(),
                decision = ?decision,
                "Locale routing rewrote response"
            );
        }

        self.apply(decision, response)
    }

    /// Turn a decision into the final response.
    pub fn apply(&self, decision: Decision, response: Response) -> Response {
        match decision {
            Decision::PassThrough => response,
            Decision::NotFound { location } => not_found(response, location.as_deref()),
            Decision::Redirect(location) | Decision::RedirectWithPathRewrite(location) => {
                self.redirector.redirect(&location)
            }
        }
    }
}

/// Empty 404 carrying the original headers, plus `Location` when given.
fn not_found(response: Response, location: Option<&str>) -> Response {
    let (mut parts, _) = response.into_parts();
    parts.status = StatusCode::NOT_FOUND;
    parts.headers.remove(header::CONTENT_LENGTH);

    if let Some(location) = location {
        match HeaderValue::from_str(location) {
            Ok(value) => {
                parts.headers.insert(header::LOCATION, value);
            }
            Err(_) => {
                tracing::warn!(location = %location, "Canonical location is not a valid header value");
            }
        }
    }

    Response::from_parts(parts, Body::empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{BuildFormat, Locale, TrailingSlash};
    use crate::routing::RouteClassification;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config(routing: RoutingStrategy) -> I18nConfig {
        I18nConfig {
            locales: vec![Locale::from("en"), Locale::from("fr"), Locale::from("de")],
            default_locale: "en".into(),
            routing,
            ..I18nConfig::default()
        }
    }

    fn respond(status: StatusCode) -> Response {
        let mut response = Response::new(Body::from("downstream"));
        *response.status_mut() = status;
        response
            .headers_mut()
            .insert("x-downstream", HeaderValue::from_static("yes"));
        response
    }

    fn page(path: &str) -> RouteContext {
        RouteContext::new(path, RouteClassification::Page)
    }

    #[test]
    fn test_other_locales_strips_default() {
        let config = config(RoutingStrategy::PrefixOtherLocales);
        assert_eq!(
            decide(&config, "/en/foo", StatusCode::OK),
            Decision::NotFound {
                location: Some("/foo".into())
            }
        );
        assert_eq!(
            decide(&config, "/en", StatusCode::OK),
            Decision::NotFound {
                location: Some("/".into())
            }
        );
    }

    #[test]
    fn test_other_locales_ignores_substring() {
        let config = config(RoutingStrategy::PrefixOtherLocales);
        assert_eq!(decide(&config, "/enigma", StatusCode::OK), Decision::PassThrough);
        assert_eq!(decide(&config, "/fr/page", StatusCode::OK), Decision::PassThrough);
        assert_eq!(decide(&config, "/page", StatusCode::OK), Decision::PassThrough);
    }

    #[test]
    fn test_no_redirect_strategy() {
        let mut config = config(RoutingStrategy::PrefixAlwaysNoRedirect);
        config.base = "/base".into();

        assert_eq!(decide(&config, "/base/", StatusCode::OK), Decision::PassThrough);
        assert_eq!(decide(&config, "/base", StatusCode::OK), Decision::PassThrough);
        assert_eq!(
            decide(&config, "/base/xx/page", StatusCode::OK),
            Decision::NotFound { location: None }
        );
        assert_eq!(decide(&config, "/base/fr/page", StatusCode::OK), Decision::PassThrough);
    }

    #[test]
    fn test_always_strategy_redirects_root() {
        let mut config = config(RoutingStrategy::PrefixAlways);
        config.base = "/base".into();
        config.trailing_slash = TrailingSlash::Always;
        assert_eq!(
            decide(&config, "/base/", StatusCode::OK),
            Decision::Redirect("/base/en/".into())
        );

        config.trailing_slash = TrailingSlash::Never;
        assert_eq!(
            decide(&config, "/base", StatusCode::OK),
            Decision::Redirect("/base/en".into())
        );

        config.trailing_slash = TrailingSlash::Ignore;
        config.build_format = BuildFormat::File;
        assert_eq!(
            decide(&config, "/base", StatusCode::OK),
            Decision::Redirect("/base/en".into())
        );
    }

    #[test]
    fn test_root_matches_base_with_trailing_slash() {
        let mut config = config(RoutingStrategy::PrefixAlways);
        config.base = "/docs/".into();
        for path in ["/docs", "/docs/"] {
            assert_eq!(
                decide(&config, path, StatusCode::OK),
                Decision::Redirect("/docs/en/".into()),
                "{path}"
            );
        }

        config.routing = RoutingStrategy::PrefixAlwaysNoRedirect;
        assert_eq!(decide(&config, "/docs", StatusCode::OK), Decision::PassThrough);
    }

    #[test]
    fn test_always_strategy_requires_prefix() {
        let config = config(RoutingStrategy::PrefixAlways);
        assert_eq!(
            decide(&config, "/about", StatusCode::OK),
            Decision::NotFound { location: None }
        );
        assert_eq!(decide(&config, "/en/about", StatusCode::OK), Decision::PassThrough);
    }

    #[test]
    fn test_fallback_to_unprefixed_default() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.fallback.insert("fr".into(), "en".into());
        assert_eq!(
            decide(&config, "/fr/page", StatusCode::FOUND),
            Decision::RedirectWithPathRewrite("/page".into())
        );
    }

    #[test]
    fn test_fallback_to_other_locale() {
        for routing in [
            RoutingStrategy::PrefixOtherLocales,
            RoutingStrategy::PrefixAlways,
            RoutingStrategy::PrefixAlwaysNoRedirect,
        ] {
            let mut config = config(routing);
            config.fallback.insert("fr".into(), "de".into());
            assert_eq!(
                decide(&config, "/fr/page", StatusCode::FOUND),
                Decision::RedirectWithPathRewrite("/de/page".into()),
                "{routing:?}"
            );
        }
    }

    #[test]
    fn test_fallback_to_default_keeps_prefix_when_always() {
        let mut config = config(RoutingStrategy::PrefixAlways);
        config.fallback.insert("fr".into(), "en".into());
        assert_eq!(
            decide(&config, "/fr/page", StatusCode::NOT_FOUND),
            Decision::RedirectWithPathRewrite("/en/page".into())
        );
    }

    #[test]
    fn test_fallback_to_mapped_locale() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.locales.push(Locale::Mapped {
            path: "spanish".into(),
            codes: vec!["es".into()],
        });
        config.fallback.insert("fr".into(), "es".into());
        assert_eq!(
            decide(&config, "/fr/page", StatusCode::NOT_FOUND),
            Decision::RedirectWithPathRewrite("/spanish/page".into())
        );
    }

    #[test]
    fn test_fallback_keyed_by_mapped_code() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.locales.push(Locale::Mapped {
            path: "spanish".into(),
            codes: vec!["es".into()],
        });
        config.fallback.insert("es".into(), "fr".into());
        assert_eq!(
            decide(&config, "/spanish/page", StatusCode::NOT_FOUND),
            Decision::RedirectWithPathRewrite("/fr/page".into())
        );
    }

    #[test]
    fn test_fallback_keyed_by_mapped_path() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.locales.push(Locale::Mapped {
            path: "spanish".into(),
            codes: vec!["es".into()],
        });
        config.fallback.insert("spanish".into(), "en".into());
        assert_eq!(
            decide(&config, "/spanish/page", StatusCode::NOT_FOUND),
            Decision::RedirectWithPathRewrite("/page".into())
        );
    }

    #[test]
    fn test_fallback_skipped() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.fallback.insert("fr".into(), "xx".into());

        // Unresolvable target.
        assert_eq!(decide(&config, "/fr/page", StatusCode::FOUND), Decision::PassThrough);
        // Success status.
        config.fallback.insert("fr".into(), "de".into());
        assert_eq!(decide(&config, "/fr/page", StatusCode::OK), Decision::PassThrough);
        // No fallback for this locale.
        assert_eq!(decide(&config, "/de/page", StatusCode::FOUND), Decision::PassThrough);
    }

    #[tokio::test]
    async fn test_non_page_passes_through() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.fallback.insert("fr".into(), "de".into());
        let policy = RoutingPolicy::new(Arc::new(config));

        let ctx = RouteContext::new("/en/logo.png", RouteClassification::Other);
        let response = policy
            .handle(&ctx, || async { respond(StatusCode::OK) })
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let ctx = RouteContext::new("/fr/logo.png", RouteClassification::Other);
        let response = policy
            .handle(&ctx, || async { respond(StatusCode::FOUND) })
            .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert!(response.headers().get(header::LOCATION).is_none());
    }

    #[tokio::test]
    async fn test_not_found_keeps_headers() {
        let policy = RoutingPolicy::new(Arc::new(config(RoutingStrategy::PrefixOtherLocales)));
        let response = policy
            .handle(&page("/en/foo"), || async { respond(StatusCode::OK) })
            .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/foo");
        assert_eq!(response.headers()["x-downstream"], "yes");
    }

    #[tokio::test]
    async fn test_fallback_page_is_governed() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.fallback.insert("fr".into(), "en".into());
        let policy = RoutingPolicy::new(Arc::new(config));

        let ctx = RouteContext::new("/fr/page", RouteClassification::FallbackPage);
        let response = policy
            .handle(&ctx, || async { respond(StatusCode::NOT_FOUND) })
            .await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/page");
    }

    #[tokio::test]
    async fn test_custom_redirector() {
        struct Permanent;
        impl Redirector for Permanent {
            fn redirect(&self, location: &str) -> Response {
                let mut response = FoundRedirector.redirect(location);
                *response.status_mut() = StatusCode::PERMANENT_REDIRECT;
                response
            }
        }

        let policy = RoutingPolicy::new(Arc::new(config(RoutingStrategy::PrefixAlways)))
            .with_redirector(Permanent);
        let response = policy
            .handle(&page("/"), || async { respond(StatusCode::OK) })
            .await;
        assert_eq!(response.status(), StatusCode::PERMANENT_REDIRECT);
        assert_eq!(response.headers()[header::LOCATION], "/en/");
    }

    #[tokio::test]
    async fn test_downstream_runs_once_and_output_is_final() {
        let mut config = config(RoutingStrategy::PrefixOtherLocales);
        config.fallback.insert("fr".into(), "de".into());
        let policy = RoutingPolicy::new(Arc::new(config));
        let counter = AtomicUsize::new(0);
        let calls = &counter;

        let first = policy
            .handle(&page("/fr/page"), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                respond(StatusCode::FOUND)
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(first.status(), StatusCode::FOUND);
        assert_eq!(first.headers()[header::LOCATION], "/de/page");

        // Feeding the synthesized redirect back in is a fresh, bounded invocation.
        let second = policy
            .handle(&page("/de/page"), move || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                first
            })
            .await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(second.status(), StatusCode::FOUND);
        assert_eq!(second.headers()[header::LOCATION], "/de/page");
    }
}
