use axum::{
    http::{header, HeaderName, HeaderValue, StatusCode},
    Router,
};
use tower_http::set_header::SetResponseHeaderLayer;

/// Body of every successful POST.
pub const RECEIVED: &str = "Messages Received.";

/// Sent on every response so browser clients served from another origin can
/// call the API.
pub const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, PUT, DELETE, OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "content-type, accept"),
    (header::ACCESS_CONTROL_MAX_AGE, "10"),
];

pub fn with_cors<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    CORS_HEADERS.into_iter().fold(router, |router, (name, value)| {
        router.layer(SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value)))
    })
}

pub fn received() -> (StatusCode, &'static str) {
    (StatusCode::CREATED, RECEIVED)
}
