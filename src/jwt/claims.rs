use jwt_simple::prelude::{Audiences, JWTClaims};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Provider-specific claims carried next to the registered ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
}

/// Verified token payload handed to protected handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClaimsSet {
    pub issuer: String,
    pub audience: Vec<String>,
    /// Unix seconds
    pub expires_at: i64,
    pub subject: String,
    /// `None` when the token carried no `permissions` claim at all
    pub permissions: Option<Vec<String>>,
}

impl TryFrom<JWTClaims<AuthClaims>> for ClaimsSet {
    type Error = AuthError;

    fn try_from(claims: JWTClaims<AuthClaims>) -> Result<Self, Self::Error> {
        let issuer = claims.issuer.ok_or_else(AuthError::incorrect_claims)?;
        let subject = claims.subject.ok_or_else(AuthError::incorrect_claims)?;
        let expires_at = claims
            .expires_at
            .ok_or_else(AuthError::incorrect_claims)?
            .as_secs() as i64;

        let mut audience: Vec<String> = match claims.audiences {
            Some(Audiences::AsString(aud)) => vec![aud],
            Some(Audiences::AsSet(set)) => set.into_iter().collect(),
            None => Vec::new(),
        };
        audience.sort();

        Ok(Self {
            issuer,
            audience,
            expires_at,
            subject,
            permissions: claims.custom.permissions,
        })
    }
}
