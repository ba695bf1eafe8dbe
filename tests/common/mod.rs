//! Shared fixtures: a temp SQLite database, a static signing key set, and
//! tokens minted for the three casting roles.
#![allow(dead_code)]

use std::sync::{Arc, OnceLock};

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use jwt_simple::prelude::*;
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use casting_agency::db::{self, AppState};
use casting_agency::jwt::{AuthClaims, Jwk, JwkSet, JwksCache, TokenVerifier};
use casting_agency::models::Permission;

pub const ISSUER: &str = "https://casting-agency.test/";
pub const AUDIENCE: &str = "casting";
pub const KID: &str = "test-key-1";

pub const CASTING_ASSISTANT: &[Permission] = &[Permission::GetActors, Permission::GetMovies];

pub const CASTING_DIRECTOR: &[Permission] = &[
    Permission::GetActors,
    Permission::GetMovies,
    Permission::PostActors,
    Permission::DeleteActors,
    Permission::PatchActors,
    Permission::PatchMovies,
];

pub const EXECUTIVE_PRODUCER: &[Permission] = &[
    Permission::GetActors,
    Permission::GetMovies,
    Permission::PostActors,
    Permission::PostMovies,
    Permission::PatchActors,
    Permission::PatchMovies,
    Permission::DeleteActors,
    Permission::DeleteMovies,
];

/// RSA generation is slow; one trusted key pair per test binary.
pub fn signing_key() -> &'static RS256KeyPair {
    static KEY: OnceLock<RS256KeyPair> = OnceLock::new();
    KEY.get_or_init(|| RS256KeyPair::generate(2048).unwrap().with_key_id(KID))
}

/// A key pair the verifier does not trust.
pub fn foreign_key(kid: &str) -> RS256KeyPair {
    RS256KeyPair::generate(2048).unwrap().with_key_id(kid)
}

pub fn test_verifier() -> TokenVerifier {
    let set = JwkSet {
        keys: vec![Jwk::rsa(KID, &signing_key().public_key())],
    };
    TokenVerifier::new(JwksCache::from_static(&set), ISSUER, AUDIENCE)
}

pub fn permission_strings(permissions: &[Permission]) -> Vec<String> {
    permissions.iter().map(|p| p.to_string()).collect()
}

/// Claims as the provider would issue them, valid for an hour.
pub fn claims_for(permissions: &[Permission]) -> JWTClaims<AuthClaims> {
    Claims::with_custom_claims(
        AuthClaims {
            permissions: Some(permission_strings(permissions)),
        },
        Duration::from_hours(1),
    )
    .with_issuer(ISSUER)
    .with_audience(AUDIENCE)
    .with_subject("auth0|test-user")
}

pub fn sign(claims: JWTClaims<AuthClaims>) -> String {
    signing_key().sign(claims).unwrap()
}

pub fn token_for(permissions: &[Permission]) -> String {
    sign(claims_for(permissions))
}

pub fn expired_token_for(permissions: &[Permission]) -> String {
    let now = Clock::now_since_epoch();
    let mut claims = claims_for(permissions);
    claims.issued_at = Some(now - Duration::from_hours(2));
    claims.expires_at = Some(now - Duration::from_hours(1));
    sign(claims)
}

pub struct TestApp {
    pub state: AppState,
    pub router: Router,
    _dir: TempDir,
}

pub fn create_test_app_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("casting.db");
    let pool = db::create_pool(path.to_str().unwrap()).unwrap();
    let state = AppState {
        db: pool,
        verifier: Arc::new(test_verifier()),
    };
    (state, dir)
}

pub fn test_app() -> TestApp {
    let (state, dir) = create_test_app_state();
    TestApp {
        router: casting_agency::app(state.clone()),
        state,
        _dir: dir,
    }
}

impl TestApp {
    /// Send a request and decode the JSON body (`Value::Null` if empty).
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("response should be JSON")
        };
        (status, json)
    }
}
