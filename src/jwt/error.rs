use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use strum::{AsRefStr, Display};
use thiserror::Error;

use crate::error::error_response;

/// Machine-readable reason an authorization attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum AuthErrorCode {
    MissingHeader,
    InvalidHeader,
    TokenExpired,
    InvalidClaims,
    Unauthorized,
}

/// Rejection raised by the token verifier or the permission gate.
///
/// Carries its own status so that the same code can map to 400 or 401
/// depending on where it was raised.
#[derive(Debug, Clone, Error)]
#[error("{code}: {description}")]
pub struct AuthError {
    pub code: AuthErrorCode,
    pub description: String,
    pub status: StatusCode,
}

impl AuthError {
    pub fn new(code: AuthErrorCode, description: impl Into<String>, status: StatusCode) -> Self {
        Self {
            code,
            description: description.into(),
            status,
        }
    }

    pub fn missing_header() -> Self {
        Self::new(
            AuthErrorCode::MissingHeader,
            "Authorization header is expected.",
            StatusCode::UNAUTHORIZED,
        )
    }

    pub fn invalid_header(description: impl Into<String>) -> Self {
        Self::new(AuthErrorCode::InvalidHeader, description, StatusCode::UNAUTHORIZED)
    }

    pub fn unparseable_token() -> Self {
        Self::new(
            AuthErrorCode::InvalidHeader,
            "Unable to parse authentication token.",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn token_expired() -> Self {
        Self::new(AuthErrorCode::TokenExpired, "Token expired.", StatusCode::UNAUTHORIZED)
    }

    pub fn incorrect_claims() -> Self {
        Self::new(
            AuthErrorCode::InvalidClaims,
            "Incorrect claims. Please, check the audience and issuer.",
            StatusCode::UNAUTHORIZED,
        )
    }

    pub fn permissions_missing() -> Self {
        Self::new(
            AuthErrorCode::InvalidClaims,
            "Permissions not included in JWT.",
            StatusCode::BAD_REQUEST,
        )
    }

    pub fn unauthorized() -> Self {
        Self::new(
            AuthErrorCode::Unauthorized,
            "Doesnt have valid permission to access.",
            StatusCode::UNAUTHORIZED,
        )
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        error_response(self.status, &self.description)
    }
}
