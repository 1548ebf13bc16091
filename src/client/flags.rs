use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Screen the auth page opens on, written by the welcome page
pub const AUTH_MODE: &str = "authMode";
/// Email prefilled on the auth page after a "remember me" login
pub const REMEMBERED_EMAIL: &str = "rememberedEmail";

/// Small string key/value storage that outlives a single screen, like a
/// browser's local storage. No schema, no versioning.
pub trait FlagStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);

    /// Reads a flag and clears it
    fn take(&self, key: &str) -> Option<String> {
        let value = self.get(key);
        self.remove(key);
        value
    }
}

/// Process-local [`FlagStore`]. Clones share the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryFlags {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryFlags {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlagStore for MemoryFlags {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}
