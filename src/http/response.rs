//! Gateway-generated responses.
//!
//! # Responsibilities
//! - Build the permanent redirect answered for docs paths that moved
//! - Map gateway-side failures to status codes
//!
//! # Design Decisions
//! - Redirects are 301 with a long-lived immutable cache directive, so
//!   browsers and shared caches stop asking
//! - An unrepresentable `Location` is a 500, never a malformed header

use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

/// Cache directive attached to every permanent redirect.
pub const PERMANENT_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// `301 Moved Permanently` to `location`.
pub fn permanent_redirect(location: &str) -> Response {
    match HeaderValue::from_str(location) {
        Ok(value) => (
            StatusCode::MOVED_PERMANENTLY,
            [
                (header::LOCATION, value),
                (
                    header::CACHE_CONTROL,
                    HeaderValue::from_static(PERMANENT_CACHE_CONTROL),
                ),
            ],
        )
            .into_response(),
        Err(_) => {
            tracing::error!(location = %location, "Redirect destination is not a valid header value");
            (StatusCode::INTERNAL_SERVER_ERROR, "Invalid redirect destination").into_response()
        }
    }
}

pub fn bad_gateway() -> Response {
    (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permanent_redirect_headers() {
        let res = permanent_redirect("https://docs.example.com/docs/2-usage/yolo-mode");

        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            res.headers()[header::LOCATION],
            "https://docs.example.com/docs/2-usage/yolo-mode"
        );
        assert_eq!(res.headers()[header::CACHE_CONTROL], PERMANENT_CACHE_CONTROL);
    }

    #[test]
    fn test_invalid_location() {
        let res = permanent_redirect("https://docs.example.com/\nevil");
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(res.headers().get(header::LOCATION).is_none());
    }
}
