//! Axum adapter for the locale routing policy.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::config::schema::I18nConfig;
use crate::i18n::locale::find_locale_segment;
use crate::i18n::policy::RoutingPolicy;
use crate::routing::{RouteClassification, RouteContext};

/// Locale code of the current request, available to handlers as a request extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentLocale(pub String);

/// Code of the locale named in `path`, or the default locale.
pub fn current_locale(path: &str, config: &I18nConfig) -> String {
    find_locale_segment(path, &config.locales)
        .and_then(|(_, locale)| locale.codes().first())
        .unwrap_or(&config.default_locale)
        .clone()
}

/// Applies [`RoutingPolicy`] to every request.
///
/// Expects a [`RouteContext`] from the classification layer; requests without one
/// are treated as non-page routes.
pub async fn i18n_middleware(
    State(policy): State<RoutingPolicy>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let ctx = match request.extensions().get::<RouteContext>() {
        Some(ctx) => ctx.clone(),
        None => {
            tracing::trace!(path = %request.uri().path(), "No route context, skipping locale routing");
            RouteContext::new(request.uri().path(), RouteClassification::Other)
        }
    };

    let locale = current_locale(&ctx.path, policy.config());
    request.extensions_mut().insert(CurrentLocale(locale));

    policy.handle(&ctx, || next.run(request)).await
}
