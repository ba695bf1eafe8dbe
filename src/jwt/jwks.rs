//! Identity provider signing keys.
//!
//! Keys are published as a JWKS document and looked up by the `kid` in a
//! token's header. The table is cached for a fixed TTL and replaced as a
//! whole on refresh, so readers never observe a partially updated set.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use jwt_simple::prelude::RS256PublicKey;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum JwksError {
    #[error("failed to fetch signing keys: {0}")]
    Fetch(#[from] reqwest::Error),
}

/// One entry of a JWKS document. Only the RSA members are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Jwk {
    pub kty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alg: Option<String>,
    #[serde(rename = "use", default, skip_serializing_if = "Option::is_none")]
    pub key_use: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e: Option<String>,
}

impl Jwk {
    /// Describe an RS256 public key the way a provider would publish it.
    pub fn rsa(kid: &str, key: &RS256PublicKey) -> Self {
        let components = key.to_components();
        Self {
            kty: "RSA".to_string(),
            kid: Some(kid.to_string()),
            alg: Some("RS256".to_string()),
            key_use: Some("sig".to_string()),
            n: Some(URL_SAFE_NO_PAD.encode(&components.n)),
            e: Some(URL_SAFE_NO_PAD.encode(&components.e)),
        }
    }

    fn to_rs256(&self) -> Option<RS256PublicKey> {
        if self.kty != "RSA" {
            return None;
        }
        let n = URL_SAFE_NO_PAD.decode(self.n.as_deref()?).ok()?;
        let e = URL_SAFE_NO_PAD.decode(self.e.as_deref()?).ok()?;
        RS256PublicKey::from_components(&n, &e).ok()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JwkSet {
    pub keys: Vec<Jwk>,
}

type KeyTable = HashMap<String, RS256PublicKey>;

enum KeySource {
    Remote { url: String, client: reqwest::Client },
    Static,
}

struct CachedKeys {
    keys: Arc<KeyTable>,
    fetched_at: Instant,
}

pub struct JwksCache {
    source: KeySource,
    ttl: Duration,
    cached: RwLock<Option<CachedKeys>>,
}

impl JwksCache {
    /// Fetch keys from `url`, trusting each fetch for `ttl`.
    ///
    /// Every fetch is bounded by `timeout`. A failed fetch is not retried
    /// and no stale table is served in its place.
    pub fn remote(
        url: impl Into<String>,
        timeout: Duration,
        ttl: Duration,
    ) -> Result<Self, JwksError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            source: KeySource::Remote {
                url: url.into(),
                client,
            },
            ttl,
            cached: RwLock::new(None),
        })
    }

    /// Fixed key set that never expires.
    pub fn from_static(set: &JwkSet) -> Self {
        Self {
            source: KeySource::Static,
            ttl: Duration::MAX,
            cached: RwLock::new(Some(CachedKeys {
                keys: Arc::new(key_table(set)),
                fetched_at: Instant::now(),
            })),
        }
    }

    /// Look up the signing key for `kid`, refreshing the table if it has expired.
    pub async fn key(&self, kid: &str) -> Result<Option<RS256PublicKey>, JwksError> {
        let keys = self.current().await?;
        Ok(keys.get(kid).cloned())
    }

    async fn current(&self) -> Result<Arc<KeyTable>, JwksError> {
        {
            let cached = self.cached.read().await;
            if let Some(entry) = cached.as_ref().filter(|c| self.is_fresh(c)) {
                return Ok(entry.keys.clone());
            }
        }

        let mut cached = self.cached.write().await;
        // Another request may have refreshed while we waited for the lock.
        if let Some(entry) = cached.as_ref().filter(|c| self.is_fresh(c)) {
            return Ok(entry.keys.clone());
        }

        let keys = Arc::new(self.fetch().await?);
        *cached = Some(CachedKeys {
            keys: keys.clone(),
            fetched_at: Instant::now(),
        });
        Ok(keys)
    }

    fn is_fresh(&self, entry: &CachedKeys) -> bool {
        match self.source {
            KeySource::Static => true,
            KeySource::Remote { .. } => entry.fetched_at.elapsed() < self.ttl,
        }
    }

    async fn fetch(&self) -> Result<KeyTable, JwksError> {
        let KeySource::Remote { url, client } = &self.source else {
            return Ok(KeyTable::new());
        };

        tracing::debug!("Fetching signing keys from {}", url);
        let set: JwkSet = client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let keys = key_table(&set);
        tracing::info!("Loaded {} signing key(s) from {}", keys.len(), url);
        Ok(keys)
    }
}

/// RSA keys with a `kid`, indexed by it. Anything else is skipped.
fn key_table(set: &JwkSet) -> KeyTable {
    set.keys
        .iter()
        .filter_map(|jwk| {
            let kid = jwk.kid.clone()?;
            match jwk.to_rs256() {
                Some(key) => Some((kid, key)),
                None => {
                    tracing::warn!("Skipping unusable signing key {} ({})", kid, jwk.kty);
                    None
                }
            }
        })
        .collect()
}
