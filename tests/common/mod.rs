//! Shared utilities for integration tests.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;

use locale_router::config::{I18nConfig, Locale, RoutingStrategy};
use locale_router::i18n::{i18n_middleware, RoutingPolicy};
use locale_router::routing::{classify_middleware, Classifier, RouteClassifier};

/// i18n config with `en` (default), `fr` and `de`.
pub fn i18n(routing: RoutingStrategy) -> I18nConfig {
    I18nConfig {
        locales: vec![Locale::from("en"), Locale::from("fr"), Locale::from("de")],
        default_locale: "en".into(),
        routing,
        ..I18nConfig::default()
    }
}

/// Router whose page handler always answers `status`, behind the locale layers.
pub fn app_with_status(config: I18nConfig, status: StatusCode) -> Router {
    let config = Arc::new(config);
    let classifier: Arc<dyn Classifier> = Arc::new(RouteClassifier::new(config.clone()));

    let handler = move || async move {
        let mut response = (status, "downstream").into_response();
        response
            .headers_mut()
            .insert("x-downstream", "yes".parse().unwrap());
        response
    };

    Router::new()
        .route("/", get(handler.clone()))
        .route("/{*path}", get(handler))
        .layer(middleware::from_fn_with_state(
            RoutingPolicy::new(config),
            i18n_middleware,
        ))
        .layer(middleware::from_fn_with_state(classifier, classify_middleware))
}

/// Send a GET for `path` through `app`.
pub async fn get_path(app: Router, path: &str) -> Response {
    app.oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// The `Location` header, if any.
pub fn location(response: &Response) -> Option<&str> {
    response
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
}
