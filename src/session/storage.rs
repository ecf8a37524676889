//! Durable key/value mirror of the session

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::{de::DeserializeOwned, Serialize};

use crate::auth::types::{TokenBundle, User};
use crate::i18n::Language;

const USER_KEY: &str = "user";
const TOKEN_KEY: &str = "userToken";
const LANGUAGE_KEY: &str = "language";

/// Raw key/value storage behind the session mirror.
///
/// Implementations are synchronous; the portal touches storage only from
/// the thread driving the UI.
pub trait StorageBackend: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// In-memory backend; the default for native builds and tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().unwrap().remove(key);
    }
}

/// Typed wrapper over the raw backend holding the three session keys.
#[derive(Clone)]
pub struct SessionStore {
    backend: Arc<dyn StorageBackend>,
}

impl SessionStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Ok(serialized) = serde_json::to_string(value) {
            self.backend.set(key, &serialized);
        }
    }

    // Missing or corrupt data is absent, never an error.
    fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.backend.get(key)?;
        serde_json::from_str(&raw).ok()
    }

    pub fn load_user(&self) -> Option<User> {
        self.load(USER_KEY)
    }

    pub fn load_tokens(&self) -> Option<TokenBundle> {
        self.load(TOKEN_KEY)
    }

    /// The user and token blobs travel together: written on every
    /// login-establishing event, removed together on sign-out.
    pub fn save_login(&self, user: &User, tokens: &TokenBundle) {
        self.save(USER_KEY, user);
        self.save(TOKEN_KEY, tokens);
    }

    pub fn clear_login(&self) {
        self.backend.remove(USER_KEY);
        self.backend.remove(TOKEN_KEY);
    }

    /// Language is stored as the raw tag, not JSON, and survives sign-out.
    pub fn save_language(&self, language: Language) {
        self.backend.set(LANGUAGE_KEY, language.as_str());
    }

    pub fn load_language(&self) -> Option<Language> {
        self.backend.get(LANGUAGE_KEY)?.parse().ok()
    }
}
