//! Shared request helpers.

use axum::http::{HeaderMap, header::AUTHORIZATION};

use crate::jwt::AuthError;

/// Extract client IP address and user-agent from request headers.
///
/// Tries `x-forwarded-for` first (for proxied requests), then `x-real-ip`.
pub fn extract_request_info(headers: &HeaderMap) -> (Option<String>, Option<String>) {
    let ip = headers
        .get("x-forwarded-for")
        .or_else(|| headers.get("x-real-ip"))
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    (ip, user_agent)
}

/// Raw `Authorization` header value, if present.
///
/// A header that is present but not visible ASCII is malformed rather than
/// missing.
pub fn authorization_header(headers: &HeaderMap) -> Result<Option<&str>, AuthError> {
    headers
        .get(AUTHORIZATION)
        .map(|v| {
            v.to_str()
                .map_err(|_| AuthError::invalid_header("Authorization malformed."))
        })
        .transpose()
}
