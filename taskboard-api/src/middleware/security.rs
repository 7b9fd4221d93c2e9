//! Security headers middleware
//!
//! Adds response headers that keep browsers from reinterpreting API
//! responses:
//!
//! - `X-Content-Type-Options: nosniff`
//! - `X-Frame-Options: DENY`
//! - `Referrer-Policy: no-referrer`
//! - `Cache-Control: no-store` on `/api` responses, whose bodies always
//!   reflect the store at request time
//! - `Strict-Transport-Security` when running in production
//!
//! # Example
//!
//! ```no_run
//! use axum::{middleware, Router};
//! use taskboard_api::middleware::security::security_headers;
//!
//! let app: Router = Router::new()
//!     .layer(middleware::from_fn_with_state(true, security_headers));
//! ```

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Applies security headers to every response
///
/// The state flag enables HSTS and should only be set when the service is
/// reached over HTTPS.
pub async fn security_headers(
    State(enable_hsts): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let is_api = request.uri().path().starts_with("/api/") || request.uri().path() == "/api";

    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static("no-referrer"),
    );

    if is_api {
        headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    }

    if enable_hsts {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=31536000; includeSubDomains"),
        );
    }

    response
}
