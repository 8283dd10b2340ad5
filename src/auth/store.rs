//! Credential store
//!
//! Scoped key-value storage for brokered access tokens. The store is an
//! explicit dependency injected into the [`CredentialBroker`]: its lifecycle
//! belongs to the hosting process and it is passed by reference into every
//! broker call, never reached through ambient globals.
//!
//! [`CredentialBroker`]: super::CredentialBroker

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::core::AgentResult;

/// Namespace segment separating credentials from other per-principal data
pub const TOKEN_NAMESPACE: &str = "tokens";

/// Key a credential is cached under.
///
/// Scoped by principal AND session: sessions of one user never share a
/// brokered token, so an expired or revoked session cannot poison its
/// siblings. The cost is one extra exchange per new session.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CredentialKey {
    pub principal_id: String,
    pub scope_key: String,
}

impl CredentialKey {
    pub fn new(principal_id: impl Into<String>, scope_key: impl Into<String>) -> Self {
        Self {
            principal_id: principal_id.into(),
            scope_key: scope_key.into(),
        }
    }

    /// Flat storage key: `{principal}/tokens/{scope}`
    pub fn storage_key(&self) -> String {
        format!("{}/{}/{}", self.principal_id, TOKEN_NAMESPACE, self.scope_key)
    }
}

/// Token payload returned by the authorization server.
///
/// Only `access_token` and `expires_in` are interpreted; any other
/// provider-specific fields ride along opaquely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenPayload {
    pub access_token: String,
    /// Seconds until the access token expires (delta from `created_at`,
    /// which the store assigns at write time)
    pub expires_in: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenPayload {
    pub fn new(access_token: impl Into<String>, expires_in: i64) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in,
            extra: Map::new(),
        }
    }
}

/// A credential at rest: the exchanged payload plus the timestamp the store
/// assigned when it was written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredCredential {
    pub payload: TokenPayload,
    /// Assigned by the store at write time, not by the broker. The broker
    /// must not assume this is continuous with its own wall clock.
    pub created_at: DateTime<Utc>,
}

impl StoredCredential {
    /// A record is valid strictly before `created_at + expires_in`; the
    /// exact boundary counts as expired. Expiring one instant early can at
    /// worst trigger a redundant exchange, never the use of a dead token.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.created_at + Duration::seconds(self.payload.expires_in)
    }
}

/// Scoped key-value store for credentials
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Read the credential cached under `key`, if any
    async fn get(&self, key: &CredentialKey) -> AgentResult<Option<StoredCredential>>;

    /// Write `payload` under `key`, stamping `created_at` with the store's
    /// current time. Replaces any existing record (upsert, never a partial
    /// update).
    async fn put(&self, key: &CredentialKey, payload: TokenPayload) -> AgentResult<()>;

    /// Remove the credential cached under `key`, if any
    async fn delete(&self, key: &CredentialKey) -> AgentResult<()>;
}

/// In-memory credential store
pub struct MemoryCredentialStore {
    records: RwLock<HashMap<CredentialKey, StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &CredentialKey) -> AgentResult<Option<StoredCredential>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn put(&self, key: &CredentialKey, payload: TokenPayload) -> AgentResult<()> {
        let record = StoredCredential {
            payload,
            created_at: Utc::now(),
        };
        self.records.write().await.insert(key.clone(), record);
        tracing::debug!("Stored credential for {}", key.storage_key());
        Ok(())
    }

    async fn delete(&self, key: &CredentialKey) -> AgentResult<()> {
        if self.records.write().await.remove(key).is_some() {
            tracing::debug!("Deleted credential for {}", key.storage_key());
        }
        Ok(())
    }
}
