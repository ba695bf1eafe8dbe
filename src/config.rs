use std::env;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_path: String,
    /// Identity provider tenant, e.g. `casting.eu.auth0.com`
    pub auth_domain: String,
    /// Expected `aud` claim
    pub api_audience: String,
    /// Where the provider publishes its signing keys
    pub jwks_url: String,
    /// How long fetched signing keys are trusted before refetching
    pub jwks_cache_ttl: Duration,
    /// Upper bound on a single JWKS fetch
    pub jwks_timeout: Duration,
    /// Clock skew accepted on `exp`
    pub jwt_leeway: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port: u16 = env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(5000);

        let auth_domain =
            env::var("AUTH0_DOMAIN").map_err(|_| ConfigError::Missing("AUTH0_DOMAIN"))?;
        let api_audience =
            env::var("API_AUDIENCE").map_err(|_| ConfigError::Missing("API_AUDIENCE"))?;

        let jwks_url = env::var("JWKS_URL")
            .unwrap_or_else(|_| format!("https://{}/.well-known/jwks.json", auth_domain));

        Ok(Self {
            host,
            port,
            database_path: env::var("DATABASE_PATH").unwrap_or_else(|_| "casting.db".to_string()),
            auth_domain,
            api_audience,
            jwks_url,
            jwks_cache_ttl: secs_from_env("JWKS_CACHE_TTL_SECS", 600),
            jwks_timeout: secs_from_env("JWKS_TIMEOUT_SECS", 5),
            jwt_leeway: secs_from_env("JWT_LEEWAY_SECS", 0),
        })
    }

    /// Issuer the provider stamps on its tokens (trailing slash included).
    pub fn issuer(&self) -> String {
        format!("https://{}/", self.auth_domain)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn secs_from_env(key: &str, default: u64) -> Duration {
    let secs = env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default);
    Duration::from_secs(secs)
}
