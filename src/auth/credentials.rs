//! Bearer credential storage for the scan API.
//!
//! Credentials are an explicit object with a defined load/save/clear
//! lifecycle tied to login and logout, not ambient global state. The
//! HTTP backend reads the store on every request; an empty store is
//! tolerated and the request goes out without an Authorization header.

use secrecy::SecretString;
use std::sync::RwLock;

/// A bearer credential for the scan API.
#[derive(Debug, Clone)]
pub struct Credentials {
    bearer_token: SecretString,
}

impl Credentials {
    /// Creates credentials from a bearer token.
    pub fn new(bearer_token: impl Into<String>) -> Self {
        Self {
            bearer_token: SecretString::new(bearer_token.into()),
        }
    }

    /// Returns the bearer token (kept secret).
    pub fn bearer_token(&self) -> &SecretString {
        &self.bearer_token
    }
}

/// Storage for the client's scan API credential.
///
/// `save` is called on login, `clear` on logout; `load` is called per
/// request and returns `None` when no credential is present.
pub trait CredentialStore: Send + Sync + std::fmt::Debug {
    /// Returns the stored credential, if any.
    fn load(&self) -> Option<Credentials>;

    /// Stores a credential, replacing any previous one.
    fn save(&self, credentials: Credentials);

    /// Removes the stored credential.
    fn clear(&self);
}

/// An in-memory credential store.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: RwLock<Option<Credentials>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-loaded with a bearer token.
    pub fn with_token(bearer_token: impl Into<String>) -> Self {
        let store = Self::new();
        store.save(Credentials::new(bearer_token));
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Option<Credentials> {
        self.slot
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn save(&self, credentials: Credentials) {
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(credentials);
    }

    fn clear(&self) {
        *self
            .slot
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_store_lifecycle() {
        let store = MemoryCredentialStore::new();
        assert!(store.load().is_none());

        store.save(Credentials::new("token-1"));
        let loaded = store.load().unwrap();
        assert_eq!(loaded.bearer_token().expose_secret(), "token-1");

        store.save(Credentials::new("token-2"));
        let loaded = store.load().unwrap();
        assert_eq!(loaded.bearer_token().expose_secret(), "token-2");

        store.clear();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_token_is_not_debug_printed() {
        let credentials = Credentials::new("super-secret");
        let debug = format!("{:?}", credentials);
        assert!(!debug.contains("super-secret"));
    }
}
