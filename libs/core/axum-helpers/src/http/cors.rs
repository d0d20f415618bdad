use axum::http::{HeaderValue, Method, header, header::InvalidHeaderValue};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Parses a comma-separated origin list such as
/// `http://localhost:3000, https://shop.example.com`.
///
/// Blank entries are skipped.
pub fn parse_allowed_origins(origins: &str) -> Result<Vec<HeaderValue>, InvalidHeaderValue> {
    origins
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(HeaderValue::from_str)
        .collect()
}

/// CORS layer for the JSON API.
///
/// Allows the given origins with the methods the API serves, the
/// `Content-Type` and `Accept` headers and a 1 hour preflight cache.
pub fn create_cors_layer(allowed_origins: Vec<HeaderValue>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed_origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_allowed_origins() {
        let origins =
            parse_allowed_origins("http://localhost:3000, ,https://shop.example.com").unwrap();
        assert_eq!(origins, vec!["http://localhost:3000", "https://shop.example.com"]);
    }

    #[test]
    fn test_parse_allowed_origins_rejects_control_characters() {
        assert!(parse_allowed_origins("http://bad\norigin").is_err());
    }
}
