use std::collections::HashSet;
use std::time::Duration;

use jwt_simple::JWTError;
use jwt_simple::prelude::{RSAPublicKeyLike, Token, VerificationOptions};

use super::{AuthClaims, AuthError, ClaimsSet, JwksCache};

const MALFORMED: &str = "Authorization malformed.";

/// Split an `Authorization` value into its bearer token.
///
/// The scheme keyword is matched case-insensitively; exactly two
/// whitespace-separated parts are accepted.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or_else(AuthError::missing_header)?;
    let parts: Vec<&str> = header.split_whitespace().collect();

    match parts.as_slice() {
        [scheme, ..] if !scheme.eq_ignore_ascii_case("bearer") => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
        )),
        [] => Err(AuthError::invalid_header(
            "Authorization header must start with \"Bearer\".",
        )),
        [_] => Err(AuthError::invalid_header("Token not found.")),
        [_, token] => Ok(*token),
        _ => Err(AuthError::invalid_header(
            "Authorization header must be bearer token.",
        )),
    }
}

/// Verifies RS256 bearer tokens issued by the identity provider.
pub struct TokenVerifier {
    keys: JwksCache,
    issuer: String,
    audience: String,
    leeway: Duration,
}

impl TokenVerifier {
    pub fn new(keys: JwksCache, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            keys,
            issuer: issuer.into(),
            audience: audience.into(),
            leeway: Duration::ZERO,
        }
    }

    pub fn with_leeway(mut self, leeway: Duration) -> Self {
        self.leeway = leeway;
        self
    }

    /// Verify the raw `Authorization` header value and return its claims.
    pub async fn verify(&self, header: Option<&str>) -> Result<ClaimsSet, AuthError> {
        let token = bearer_token(header)?;
        self.verify_token(token).await
    }

    pub async fn verify_token(&self, token: &str) -> Result<ClaimsSet, AuthError> {
        let metadata =
            Token::decode_metadata(token).map_err(|_| AuthError::invalid_header(MALFORMED))?;
        let kid = metadata
            .key_id()
            .ok_or_else(|| AuthError::invalid_header(MALFORMED))?;

        let key = self
            .keys
            .key(kid)
            .await
            .map_err(|e| {
                tracing::error!("Signing key lookup failed: {}", e);
                AuthError::invalid_header("Unable to verify token signing keys.")
            })?
            .ok_or_else(|| AuthError::invalid_header("Unable to find the appropriate key."))?;

        // `iat` is informational; only `exp` and `nbf` gate validity.
        let options = VerificationOptions {
            accept_future: true,
            allowed_issuers: Some(HashSet::from([self.issuer.clone()])),
            allowed_audiences: Some(HashSet::from([self.audience.clone()])),
            time_tolerance: Some(jwt_simple::prelude::Duration::from_secs(self.leeway.as_secs())),
            ..Default::default()
        };

        let claims = key
            .verify_token::<AuthClaims>(token, Some(options))
            .map_err(classify)?;

        ClaimsSet::try_from(claims)
    }
}

fn classify(err: jwt_simple::Error) -> AuthError {
    match err.downcast_ref::<JWTError>() {
        Some(JWTError::TokenHasExpired) => AuthError::token_expired(),
        Some(
            JWTError::RequiredIssuerMismatch
            | JWTError::RequiredIssuerMissing
            | JWTError::RequiredAudienceMismatch
            | JWTError::RequiredAudienceMissing
            | JWTError::TokenNotValidYet,
        ) => AuthError::incorrect_claims(),
        Some(JWTError::InvalidSignature) => {
            AuthError::invalid_header("Token signature is invalid.")
        }
        _ => {
            tracing::debug!("Token rejected: {}", err);
            AuthError::unparseable_token()
        }
    }
}
