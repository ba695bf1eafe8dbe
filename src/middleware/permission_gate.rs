use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::db::AppState;
use crate::jwt::{AuthError, ClaimsSet};
use crate::models::Permission;
use crate::util::{authorization_header, extract_request_info};

/// Middleware state for a route protected by a single permission.
#[derive(Clone)]
pub struct PermissionGate {
    state: AppState,
    permission: Permission,
}

impl PermissionGate {
    pub fn new(state: AppState, permission: Permission) -> Self {
        Self { state, permission }
    }
}

/// Decide whether `claims` grant `required`.
pub fn authorize(required: Permission, claims: &ClaimsSet) -> Result<(), AuthError> {
    let permissions = claims
        .permissions
        .as_deref()
        .ok_or_else(AuthError::permissions_missing)?;

    if required.is_granted_by(permissions) {
        Ok(())
    } else {
        Err(AuthError::unauthorized())
    }
}

/// Verify the caller's token, check the route's permission, and hand the
/// claims to the handler through request extensions.
pub async fn require_permission(
    State(gate): State<PermissionGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    // Owned so the header borrow ends before the request is mutated below.
    let header = authorization_header(request.headers()).map(|h| h.map(str::to_owned));
    let verified = match header {
        Ok(header) => verify_and_authorize(&gate, header.as_deref()).await,
        Err(e) => Err(e),
    };

    let claims = match verified {
        Ok(claims) => claims,
        Err(e) => {
            let (ip, user_agent) = extract_request_info(request.headers());
            tracing::warn!(
                "Rejected {} {} ({}, {}): {}",
                request.method(),
                request.uri().path(),
                ip.as_deref().unwrap_or("unknown"),
                user_agent.as_deref().unwrap_or("no user-agent"),
                e
            );
            return Err(e);
        }
    };

    tracing::debug!("{} granted {} to {}", gate.permission, request.uri().path(), claims.subject);
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

async fn verify_and_authorize(
    gate: &PermissionGate,
    header: Option<&str>,
) -> Result<ClaimsSet, AuthError> {
    let claims = gate.state.verifier.verify(header).await?;
    authorize(gate.permission, &claims)?;
    Ok(claims)
}
