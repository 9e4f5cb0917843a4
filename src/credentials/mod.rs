//! Read access to the platform's secure token storage.
//!
//! The pipeline only ever reads from a store. Writing, rotating and clearing
//! tokens belong to whoever owns the storage (the login flow, usually).

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;


/// Key the bearer token is stored under.
pub const TOKEN_KEY: &str = "token";

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;
}

/// In-process store, useful to embed in an app shell or to drive tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryCredentialStore {
    pub fn new() -> MemoryCredentialStore {
        MemoryCredentialStore::default()
    }

    pub fn with_token(token: &str) -> MemoryCredentialStore {
        let mut entries = HashMap::new();
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        MemoryCredentialStore {
            entries: RwLock::new(entries),
        }
    }

    pub async fn set(&self, key: &str, value: &str) {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
    }

    pub async fn remove(&self, key: &str) -> Option<String> {
        self.entries.write().await.remove(key)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }
}

/// Reads credentials from environment variables named `<PREFIX><KEY>`, with
/// the key upper-cased. `EnvCredentialStore::new("API_")` serves the token
/// from `API_TOKEN`.
#[derive(Debug, Clone)]
pub struct EnvCredentialStore {
    prefix: String,
}

impl EnvCredentialStore {
    pub fn new(prefix: &str) -> EnvCredentialStore {
        EnvCredentialStore {
            prefix: prefix.to_string(),
        }
    }

    pub(crate) fn variable(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key.to_ascii_uppercase())
    }
}

#[async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        match std::env::var(self.variable(key)) {
            Ok(value) => Ok(Some(value)),
            Err(std::env::VarError::NotPresent) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

/// Turns a stored token into an `Authorization` header value.
///
/// Empty tokens count as absent. Tokens already carrying the `Bearer ` scheme
/// pass through untouched.
pub fn bearer(token: &str) -> Option<String> {
    if token.is_empty() {
        return None;
    }
    if token.starts_with("Bearer ") {
        Some(token.to_string())
    } else {
        Some(format!("Bearer {}", token))
    }
}
