//! API key resolution.

use std::fmt;
use std::sync::{Arc, RwLock};

use super::GenAiError;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "API_KEY";

/// An API key held in memory, shared between clones.
///
/// A key entered at runtime is stored here rather than in the process
/// environment, so it can be set while requests on other threads read it.
#[derive(Clone, Default)]
pub struct SharedKey(Arc<RwLock<Option<String>>>);

impl SharedKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `key`, trimmed. A blank key clears the slot.
    pub fn set(&self, key: &str) {
        let key = key.trim();
        let mut slot = self.0.write().unwrap_or_else(|e| e.into_inner());
        *slot = (!key.is_empty()).then(|| key.to_string());
    }

    pub fn get(&self) -> Option<String> {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl fmt::Debug for SharedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.get().is_some() { "set" } else { "unset" };
        f.debug_tuple("SharedKey").field(&state).finish()
    }
}

/// Clones of the same key compare equal.
impl PartialEq for SharedKey {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Where the API key comes from.
///
/// The key is resolved on every call, so a key selected after the client
/// was built is picked up by the next request.
#[derive(Debug, Clone, PartialEq)]
pub enum KeySource {
    /// Read the named environment variable.
    Env(String),
    /// A fixed key.
    Fixed(String),
    /// A key selected at runtime, falling back to the named environment
    /// variable until one is set.
    Shared { key: SharedKey, env: String },
}

impl Default for KeySource {
    fn default() -> Self {
        KeySource::Env(API_KEY_ENV.to_string())
    }
}

impl KeySource {
    /// Resolve the key. Missing or empty keys are an error.
    pub fn resolve(&self) -> Result<String, GenAiError> {
        let key = match self {
            KeySource::Env(var) => std::env::var(var).map_err(|_| GenAiError::MissingApiKey)?,
            KeySource::Fixed(key) => key.clone(),
            KeySource::Shared { key, env } => match key.get() {
                Some(key) => key,
                None => std::env::var(env).map_err(|_| GenAiError::MissingApiKey)?,
            },
        };
        if key.trim().is_empty() {
            return Err(GenAiError::MissingApiKey);
        }
        Ok(key)
    }

    /// Whether a key is currently available.
    pub fn is_available(&self) -> bool {
        self.resolve().is_ok()
    }
}
