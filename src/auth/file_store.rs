//! File-backed credential store
//!
//! Persists the credential map as a single JSON file. All writes go through
//! an atomic temp-file + rename, and a tokio Mutex serializes writers, so a
//! crash mid-write can never corrupt the file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use crate::core::{AgentError, AgentResult};

use super::store::{CredentialKey, CredentialStore, StoredCredential, TokenPayload};

/// Credential store backed by a JSON file on disk
pub struct FileCredentialStore {
    path: PathBuf,
    state: Mutex<HashMap<String, StoredCredential>>,
}

impl FileCredentialStore {
    /// Load the store from `path`, creating an empty file if none exists
    pub async fn load(path: impl Into<PathBuf>) -> AgentResult<Self> {
        let path = path.into();

        let state = if path.exists() {
            let contents = tokio::fs::read_to_string(&path).await?;
            let records: HashMap<String, StoredCredential> = serde_json::from_str(&contents)?;
            tracing::info!(
                "Loaded {} credential(s) from {}",
                records.len(),
                path.display()
            );
            records
        } else {
            tracing::info!(
                "Credential file {} not found, starting empty",
                path.display()
            );
            let records = HashMap::new();
            write_atomic(&path, &records).await?;
            records
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Serialize `records` next to `path` and rename into place
async fn write_atomic(
    path: &Path,
    records: &HashMap<String, StoredCredential>,
) -> AgentResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(records)?;
    let tmp = path.with_extension("tmp");
    tokio::fs::write(&tmp, &json).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn get(&self, key: &CredentialKey) -> AgentResult<Option<StoredCredential>> {
        let state = self.state.lock().await;
        Ok(state.get(&key.storage_key()).cloned())
    }

    async fn put(&self, key: &CredentialKey, payload: TokenPayload) -> AgentResult<()> {
        let mut state = self.state.lock().await;
        state.insert(
            key.storage_key(),
            StoredCredential {
                payload,
                created_at: Utc::now(),
            },
        );
        write_atomic(&self.path, &state)
            .await
            .map_err(|e| AgentError::Store(format!("persisting credential file: {e}")))
    }

    async fn delete(&self, key: &CredentialKey) -> AgentResult<()> {
        let mut state = self.state.lock().await;
        if state.remove(&key.storage_key()).is_some() {
            write_atomic(&self.path, &state)
                .await
                .map_err(|e| AgentError::Store(format!("persisting credential file: {e}")))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let store = FileCredentialStore::load(&path).await.unwrap();
        let key = CredentialKey::new("user-1", "thread-9");

        assert!(store.get(&key).await.unwrap().is_none());

        store.put(&key, TokenPayload::new("at", 3600)).await.unwrap();
        let rec = store.get(&key).await.unwrap().unwrap();
        assert_eq!(rec.payload.access_token, "at");

        store.delete(&key).await.unwrap();
        assert!(store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_file_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");
        let key = CredentialKey::new("user-1", "thread-9");

        {
            let store = FileCredentialStore::load(&path).await.unwrap();
            store.put(&key, TokenPayload::new("at", 3600)).await.unwrap();
        }

        let reloaded = FileCredentialStore::load(&path).await.unwrap();
        let rec = reloaded.get(&key).await.unwrap().unwrap();
        assert_eq!(rec.payload.access_token, "at");
        assert_eq!(rec.payload.expires_in, 3600);
    }

    #[tokio::test]
    async fn test_load_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credentials.json");

        let _store = FileCredentialStore::load(&path).await.unwrap();
        assert!(path.exists());

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents.trim(), "{}");
    }
}
