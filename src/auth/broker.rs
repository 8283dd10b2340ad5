//! Credential broker
//!
//! The central state machine between the credential store and the token
//! exchange: look up the cached credential for this (principal, session),
//! check expiry, delete stale records, re-exchange when needed, and cache
//! the result. Every "can't" outcome short of an infrastructure failure is
//! `Ok(None)` - a missing credential means the agent assembles with fewer
//! tools, never that assembly fails.

use std::sync::Arc;

use chrono::Utc;

use crate::core::{AgentResult, SessionContext};

use super::exchange::TokenExchange;
use super::store::{CredentialKey, CredentialStore, TokenPayload};

/// Brokers (principal, session)-scoped access tokens
pub struct CredentialBroker {
    store: Arc<dyn CredentialStore>,
    exchanger: Arc<dyn TokenExchange>,
}

impl CredentialBroker {
    pub fn new(store: Arc<dyn CredentialStore>, exchanger: Arc<dyn TokenExchange>) -> Self {
        Self { store, exchanger }
    }

    /// Return a valid access-token payload for this context, exchanging and
    /// caching a fresh one if needed.
    ///
    /// Returns `Ok(None)` when the capability is simply not available:
    /// missing principal/session, missing identity token or resource URL,
    /// or a failed exchange (already logged by the exchanger). Only store
    /// I/O failures surface as errors.
    ///
    /// The read-check-exchange-write sequence is not atomic: two concurrent
    /// callers for the same key may both exchange, with last-write-wins on
    /// the store. Exchanges are idempotent upstream, so this is accepted.
    pub async fn ensure_valid_credential(
        &self,
        ctx: &SessionContext,
        resource_base_url: Option<&str>,
    ) -> AgentResult<Option<TokenPayload>> {
        // Missing correlation identifiers: not an error, just no capability.
        // Bail before touching the store or the network.
        let (Some(principal_id), Some(session_id)) = (&ctx.principal_id, &ctx.session_id) else {
            tracing::debug!("No principal or session in context, skipping credential broker");
            return Ok(None);
        };

        let key = CredentialKey::new(principal_id.as_str(), session_id.as_str());

        if let Some(record) = self.store.get(&key).await? {
            if record.is_valid_at(Utc::now()) {
                tracing::debug!("Credential cache hit for {}", key.storage_key());
                return Ok(Some(record.payload));
            }

            // No stale record may coexist with the one we are about to mint
            tracing::debug!("Credential expired for {}, deleting", key.storage_key());
            self.store.delete(&key).await?;
        }

        let Some(identity_token) = &ctx.identity_token else {
            tracing::debug!("No identity token in context, cannot exchange");
            return Ok(None);
        };
        let Some(base_url) = resource_base_url else {
            tracing::debug!("No resource base URL configured, cannot exchange");
            return Ok(None);
        };

        match self.exchanger.exchange(identity_token, base_url).await {
            Ok(payload) => {
                self.store.put(&key, payload.clone()).await?;
                tracing::info!("Exchanged and cached credential for {}", key.storage_key());
                Ok(Some(payload))
            }
            // Already logged by the exchanger; the capability is unavailable
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::exchange::ExchangeError;
    use crate::auth::store::StoredCredential;
    use async_trait::async_trait;
    use chrono::Duration;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::RwLock;

    /// Store that counts every operation
    struct CountingStore {
        record: RwLock<Option<StoredCredential>>,
        gets: AtomicUsize,
        puts: AtomicUsize,
        deletes: AtomicUsize,
    }

    impl CountingStore {
        fn empty() -> Self {
            Self {
                record: RwLock::new(None),
                gets: AtomicUsize::new(0),
                puts: AtomicUsize::new(0),
                deletes: AtomicUsize::new(0),
            }
        }

        fn seeded(record: StoredCredential) -> Self {
            let store = Self::empty();
            *store.record.try_write().unwrap() = Some(record);
            store
        }
    }

    #[async_trait]
    impl CredentialStore for CountingStore {
        async fn get(&self, _key: &CredentialKey) -> AgentResult<Option<StoredCredential>> {
            self.gets.fetch_add(1, Ordering::SeqCst);
            Ok(self.record.read().await.clone())
        }

        async fn put(&self, _key: &CredentialKey, payload: TokenPayload) -> AgentResult<()> {
            self.puts.fetch_add(1, Ordering::SeqCst);
            *self.record.write().await = Some(StoredCredential {
                payload,
                created_at: Utc::now(),
            });
            Ok(())
        }

        async fn delete(&self, _key: &CredentialKey) -> AgentResult<()> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            *self.record.write().await = None;
            Ok(())
        }
    }

    /// Exchanger that counts calls and returns a fixed outcome
    struct CountingExchanger {
        calls: AtomicUsize,
        fail: bool,
    }

    impl CountingExchanger {
        fn succeeding() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                fail: true,
            }
        }
    }

    #[async_trait]
    impl TokenExchange for CountingExchanger {
        async fn exchange(
            &self,
            _identity_token: &str,
            _resource_base_url: &str,
        ) -> Result<TokenPayload, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(ExchangeError::Status {
                    status: 401,
                    body: "invalid subject token".into(),
                })
            } else {
                Ok(TokenPayload::new("fresh-token", 3600))
            }
        }
    }

    fn full_context() -> SessionContext {
        SessionContext::new()
            .with_principal("user-1")
            .with_session("thread-9")
            .with_identity_token("upstream-token")
    }

    #[tokio::test]
    async fn test_missing_session_skips_store_and_network() {
        let store = Arc::new(CountingStore::empty());
        let exchanger = Arc::new(CountingExchanger::succeeding());
        let broker = CredentialBroker::new(store.clone(), exchanger.clone());

        let ctx = SessionContext::new()
            .with_principal("user-1")
            .with_identity_token("upstream-token");

        let result = broker
            .ensure_valid_credential(&ctx, Some("https://mcp.example.com"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(store.gets.load(Ordering::SeqCst), 0);
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cache_miss_exchanges_then_second_call_hits_cache() {
        let store = Arc::new(CountingStore::empty());
        let exchanger = Arc::new(CountingExchanger::succeeding());
        let broker = CredentialBroker::new(store.clone(), exchanger.clone());
        let ctx = full_context();

        let first = broker
            .ensure_valid_credential(&ctx, Some("https://mcp.example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first.access_token, "fresh-token");
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);

        // Immediate second call: one more store read, zero more exchanges
        let second = broker
            .ensure_valid_credential(&ctx, Some("https://mcp.example.com"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.access_token, "fresh-token");
        assert_eq!(store.gets.load(Ordering::SeqCst), 2);
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_expired_record_is_deleted_and_reexchanged() {
        // Created an hour ago, lived 30 minutes
        let stale = StoredCredential {
            payload: TokenPayload::new("stale-token", 1800),
            created_at: Utc::now() - Duration::hours(1),
        };
        let store = Arc::new(CountingStore::seeded(stale));
        let exchanger = Arc::new(CountingExchanger::succeeding());
        let broker = CredentialBroker::new(store.clone(), exchanger.clone());

        let result = broker
            .ensure_valid_credential(&full_context(), Some("https://mcp.example.com"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(result.access_token, "fresh-token");
        assert_eq!(store.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.puts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_exchange_failure_yields_none_and_writes_nothing() {
        let store = Arc::new(CountingStore::empty());
        let exchanger = Arc::new(CountingExchanger::failing());
        let broker = CredentialBroker::new(store.clone(), exchanger.clone());

        let result = broker
            .ensure_valid_credential(&full_context(), Some("https://mcp.example.com"))
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.puts.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_identity_token_skips_exchange() {
        let store = Arc::new(CountingStore::empty());
        let exchanger = Arc::new(CountingExchanger::succeeding());
        let broker = CredentialBroker::new(store.clone(), exchanger.clone());

        let ctx = SessionContext::new()
            .with_principal("user-1")
            .with_session("thread-9");

        let result = broker
            .ensure_valid_credential(&ctx, Some("https://mcp.example.com"))
            .await
            .unwrap();

        assert!(result.is_none());
        // Cache was consulted, exchange was not attempted
        assert_eq!(store.gets.load(Ordering::SeqCst), 1);
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_resource_url_skips_exchange() {
        let store = Arc::new(CountingStore::empty());
        let exchanger = Arc::new(CountingExchanger::succeeding());
        let broker = CredentialBroker::new(store.clone(), exchanger.clone());

        let result = broker
            .ensure_valid_credential(&full_context(), None)
            .await
            .unwrap();

        assert!(result.is_none());
        assert_eq!(exchanger.calls.load(Ordering::SeqCst), 0);
    }
}
