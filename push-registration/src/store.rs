use std::path::{Path, PathBuf};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for persisted-state operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read state file: {0}")]
    Read(String),

    #[error("Failed to write state file: {0}")]
    Write(String),

    #[error("Failed to parse state file: {0}")]
    Parse(String),
}

/// Persisted registration state shared by the adapter's callbacks.
///
/// Writes are flushed before the call returns: a reader after an awaited
/// write always observes the new value. Reads are infallible and served
/// from the in-memory copy.
pub trait StateStore: Send + Sync {
    fn token(&self) -> Option<Vec<u8>>;
    fn set_token(&self, token: Option<&[u8]>) -> Result<(), StoreError>;

    fn tags(&self) -> Vec<String>;
    fn set_tags(&self, tags: &[String]) -> Result<(), StoreError>;

    /// True once the OS has delivered a device token
    fn is_enabled(&self) -> bool;
    fn set_enabled(&self, enabled: bool) -> Result<(), StoreError>;

    /// True only immediately after a verified successful hub registration
    fn is_registered(&self) -> bool;
    fn set_registered(&self, registered: bool) -> Result<(), StoreError>;
}

/// On-disk document. Field names are the platform's historical defaults
/// keys and must not change.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(rename = "Token")]
    token: Option<Vec<u8>>,
    #[serde(rename = "Tags", default)]
    tags: Vec<String>,
    #[serde(rename = "Enabled", default)]
    enabled: bool,
    #[serde(rename = "Registered", default)]
    registered: bool,
}

/// Ephemeral store for tests and hosts without durable preferences.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<PersistedState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn token(&self) -> Option<Vec<u8>> {
        self.state.read().expect("state lock poisoned").token.clone()
    }

    fn set_token(&self, token: Option<&[u8]>) -> Result<(), StoreError> {
        self.state.write().expect("state lock poisoned").token = token.map(|t| t.to_vec());
        Ok(())
    }

    fn tags(&self) -> Vec<String> {
        self.state.read().expect("state lock poisoned").tags.clone()
    }

    fn set_tags(&self, tags: &[String]) -> Result<(), StoreError> {
        self.state.write().expect("state lock poisoned").tags = tags.to_vec();
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.state.read().expect("state lock poisoned").enabled
    }

    fn set_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.state.write().expect("state lock poisoned").enabled = enabled;
        Ok(())
    }

    fn is_registered(&self) -> bool {
        self.state.read().expect("state lock poisoned").registered
    }

    fn set_registered(&self, registered: bool) -> Result<(), StoreError> {
        self.state.write().expect("state lock poisoned").registered = registered;
        Ok(())
    }
}

/// Durable store backed by a JSON document, synchronized on every mutation.
pub struct JsonFileStore {
    path: PathBuf,
    state: RwLock<PersistedState>,
}

impl JsonFileStore {
    /// Opens the store, loading existing state if the file is present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            Self::load(&path)?
        } else {
            PersistedState::default()
        };

        Ok(Self {
            path,
            state: RwLock::new(state),
        })
    }

    fn load(path: &Path) -> Result<PersistedState, StoreError> {
        let raw = std::fs::read_to_string(path).map_err(|e| StoreError::Read(e.to_string()))?;
        serde_json::from_str(&raw).map_err(|e| StoreError::Parse(e.to_string()))
    }

    fn mutate(&self, f: impl FnOnce(&mut PersistedState)) -> Result<(), StoreError> {
        let mut state = self.state.write().expect("state lock poisoned");
        f(&mut state);
        let raw = serde_json::to_string(&*state).map_err(|e| StoreError::Write(e.to_string()))?;
        std::fs::write(&self.path, raw).map_err(|e| StoreError::Write(e.to_string()))
    }
}

impl StateStore for JsonFileStore {
    fn token(&self) -> Option<Vec<u8>> {
        self.state.read().expect("state lock poisoned").token.clone()
    }

    fn set_token(&self, token: Option<&[u8]>) -> Result<(), StoreError> {
        self.mutate(|state| state.token = token.map(|t| t.to_vec()))
    }

    fn tags(&self) -> Vec<String> {
        self.state.read().expect("state lock poisoned").tags.clone()
    }

    fn set_tags(&self, tags: &[String]) -> Result<(), StoreError> {
        self.mutate(|state| state.tags = tags.to_vec())
    }

    fn is_enabled(&self) -> bool {
        self.state.read().expect("state lock poisoned").enabled
    }

    fn set_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        self.mutate(|state| state.enabled = enabled)
    }

    fn is_registered(&self) -> bool {
        self.state.read().expect("state lock poisoned").registered
    }

    fn set_registered(&self, registered: bool) -> Result<(), StoreError> {
        self.mutate(|state| state.registered = registered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.token().is_none());
        assert!(!store.is_enabled());

        store.set_token(Some(&[1, 2, 3])).unwrap();
        store.set_tags(&["news".to_string()]).unwrap();
        store.set_enabled(true).unwrap();
        store.set_registered(true).unwrap();

        assert_eq!(store.token(), Some(vec![1, 2, 3]));
        assert_eq!(store.tags(), vec!["news".to_string()]);
        assert!(store.is_enabled());
        assert!(store.is_registered());

        store.set_token(None).unwrap();
        assert!(store.token().is_none());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("push-state.json");

        {
            let store = JsonFileStore::open(&path).unwrap();
            store.set_token(Some(&[0x1a, 0x2b])).unwrap();
            store
                .set_tags(&["sports".to_string(), "news".to_string()])
                .unwrap();
            store.set_registered(true).unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.token(), Some(vec![0x1a, 0x2b]));
        assert_eq!(
            reopened.tags(),
            vec!["sports".to_string(), "news".to_string()]
        );
        assert!(reopened.is_registered());
        assert!(!reopened.is_enabled());
    }

    #[test]
    fn test_file_store_uses_historical_key_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("push-state.json");

        let store = JsonFileStore::open(&path).unwrap();
        store.set_enabled(true).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let doc: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(doc.get("Token").is_some());
        assert!(doc.get("Tags").is_some());
        assert_eq!(doc["Enabled"], serde_json::json!(true));
        assert_eq!(doc["Registered"], serde_json::json!(false));
    }

    #[test]
    fn test_file_store_rejects_corrupt_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("push-state.json");
        std::fs::write(&path, "{not json").unwrap();

        assert!(matches!(
            JsonFileStore::open(&path),
            Err(StoreError::Parse(_))
        ));
    }
}
