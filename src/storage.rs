use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::errors::AuthError;

// --- Storage Keys ---

/// Key holding the raw access token, read directly by the HTTP collaborator.
pub const ACCESS_TOKEN_KEY: &str = "token";
/// Key holding the raw refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
/// Namespace key holding the serialized [`crate::models::PersistedSession`] snapshot.
pub const SNAPSHOT_KEY: &str = "auth-storage";

// 1. SessionStorage Contract

/// SessionStorage
///
/// Defines the abstract contract for durable client storage: string key-value
/// persistence that survives restarts. This trait allows the session service to
/// swap the concrete implementation, from the real file-backed store
/// (FileSessionStorage) to the in-memory mock (MemorySessionStorage) during
/// testing, without affecting the session logic.
///
/// Writes are deliberately infallible at the trait boundary: a storage failure
/// must never break a session operation (the identity lives in memory; storage
/// is only the reload path). Implementations log write failures instead.
pub trait SessionStorage: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Stores `value` under `key`, overwriting any previous value.
    fn set(&self, key: &str, value: &str);
    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}

/// StorageState
///
/// The concrete type used to share durable storage access across the session service.
pub type StorageState = Arc<dyn SessionStorage>;

// 2. The Real Implementation (File-Backed)

/// FileSessionStorage
///
/// The concrete implementation backed by a single JSON file under the configured
/// state directory. The file is read once at construction and rewritten on every
/// mutation; since all writes happen synchronously under one lock there is no
/// cross-write interleaving to guard against.
pub struct FileSessionStorage {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileSessionStorage {
    /// new
    ///
    /// Opens (or creates) the storage file under `storage_dir`. Existing entries
    /// are loaded eagerly so later reads never touch the filesystem.
    pub fn new(storage_dir: &std::path::Path) -> Result<Self, AuthError> {
        fs::create_dir_all(storage_dir)
            .map_err(|e| AuthError::Storage(format!("cannot create {:?}: {}", storage_dir, e)))?;

        let path = storage_dir.join("session.json");
        let entries = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                tracing::warn!("discarding unreadable session file {:?}: {}", path, e);
                HashMap::new()
            }),
            // Missing file is the normal first-run case.
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Rewrites the backing file from the in-memory map. Failures are logged and
    /// swallowed: the in-memory session stays authoritative for this process.
    fn flush(&self, entries: &HashMap<String, String>) {
        let payload = match serde_json::to_string_pretty(entries) {
            Ok(p) => p,
            Err(e) => {
                tracing::error!("session file serialize error: {:?}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, payload) {
            tracing::error!("session file write error for {:?}: {:?}", self.path, e);
        }
    }
}

impl SessionStorage for FileSessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock().expect("session storage lock poisoned");
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("session storage lock poisoned");
        if entries.remove(key).is_some() {
            self.flush(&entries);
        }
    }
}

// 3. The Mock Implementation (For Unit Tests)

/// MemorySessionStorage
///
/// An in-memory implementation of `SessionStorage` used for testing and for
/// callers that explicitly want a session scoped to the process lifetime.
/// Sharing one instance across two session stores simulates a page reload
/// against the same durable storage.
#[derive(Default)]
pub struct MemorySessionStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStorage for MemorySessionStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("session storage lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .expect("session storage lock poisoned")
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("session storage lock poisoned")
            .remove(key);
    }
}
