use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Fixed storage slots. Each holds one JSON-serialized value and is always
/// overwritten whole; there is no versioning or migration.
pub const COMPLIANCE_RULES_KEY: &str = "racap_compliance_rules";
pub const AUDIT_LOGS_KEY: &str = "racap_audit_logs";
pub const USER_PREFERENCES_KEY: &str = "racap_user_preferences";
pub const SESSION_DATA_KEY: &str = "racap_session_data";

pub const ALL_KEYS: [&str; 4] = [
    COMPLIANCE_RULES_KEY,
    AUDIT_LOGS_KEY,
    USER_PREFERENCES_KEY,
    SESSION_DATA_KEY,
];

/// Minimal key-value persistence seam. The toggle/audit pipelines only ever
/// talk to this trait, so tests can run against `MemStore`.
pub trait Store {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;

    fn clear_all(&mut self) -> Result<()> {
        for key in ALL_KEYS {
            self.remove(key)?;
        }
        Ok(())
    }
}

/// Load a typed value from a slot. Missing or malformed JSON falls back to
/// the supplied default; only a store-level read failure is an error.
pub fn load_json<T: DeserializeOwned>(store: &dyn Store, key: &str, default: T) -> Result<T> {
    let Some(raw) = store.get(key)? else {
        return Ok(default);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(_) => Ok(default),
    }
}

pub fn save_json<T: Serialize>(store: &mut dyn Store, key: &str, value: &T) -> Result<()> {
    let raw = serde_json::to_string(value)
        .with_context(|| format!("failed to serialize value for slot {key}"))?;
    store.set(key, &raw)
}

/// One JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Store for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read store slot: {}", path.display()))?;
        Ok(Some(raw))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create data directory: {}", self.dir.display()))?;
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("failed to write store slot: {}", path.display()))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(());
        }
        std::fs::remove_file(&path)
            .with_context(|| format!("failed to remove store slot: {}", path.display()))
    }
}

/// In-memory store for tests. `fail_writes` simulates an unavailable or
/// quota-exceeded backend.
#[derive(Debug, Default)]
pub struct MemStore {
    slots: HashMap<String, String>,
    pub fail_writes: bool,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }
}

impl Store for MemStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("store unavailable (simulated write failure)");
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.fail_writes {
            anyhow::bail!("store unavailable (simulated write failure)");
        }
        self.slots.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_json_falls_back_on_malformed_payload() {
        let mut store = MemStore::new();
        store
            .set(COMPLIANCE_RULES_KEY, "{not json")
            .expect("set slot");
        let loaded: Vec<u32> =
            load_json(&store, COMPLIANCE_RULES_KEY, vec![1, 2, 3]).expect("load");
        assert_eq!(loaded, vec![1, 2, 3]);
    }

    #[test]
    fn load_json_falls_back_on_missing_slot() {
        let store = MemStore::new();
        let loaded: Vec<u32> = load_json(&store, SESSION_DATA_KEY, Vec::new()).expect("load");
        assert!(loaded.is_empty());
    }

    #[test]
    fn file_store_round_trips_a_slot() {
        let dir = std::env::temp_dir().join(format!(
            "racap-store-test-{}-{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        ));
        let _ = std::fs::remove_dir_all(&dir);

        let mut store = FileStore::new(&dir);
        assert_eq!(store.get(USER_PREFERENCES_KEY).expect("get"), None);
        store
            .set(USER_PREFERENCES_KEY, "{\"theme\":\"dark\"}")
            .expect("set");
        assert_eq!(
            store.get(USER_PREFERENCES_KEY).expect("get"),
            Some("{\"theme\":\"dark\"}".to_string())
        );
        store.remove(USER_PREFERENCES_KEY).expect("remove");
        assert_eq!(store.get(USER_PREFERENCES_KEY).expect("get"), None);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
