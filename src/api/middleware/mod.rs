//! HTTP middleware

mod logging;
mod metrics;

use axum::{body::Body, extract::MatchedPath, http::Request};

pub use self::logging::logging_middleware;
pub use self::metrics::metrics_middleware;

/// Route pattern when matched, raw path otherwise
fn matched_path(request: &Request<Body>) -> String {
    request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string())
        .unwrap_or_else(|| request.uri().path().to_string())
}
