//! Per-user list of captured looks.

use crate::{
    foundation::error::{TintError, TintResult},
    frame::snapshot::CapturedLook,
    looks::store::KeyValueStore,
};

const KEY_PREFIX: &str = "saved_looks";

/// Who is using the try-on. Only signed-in users can keep looks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum AuthState {
    /// Nobody signed in.
    #[default]
    Anonymous,
    /// A signed-in user.
    SignedIn {
        /// Stable user id, used as the storage key suffix.
        user: String,
    },
}

impl AuthState {
    /// Signed in as `user`.
    pub fn signed_in(user: impl Into<String>) -> Self {
        Self::SignedIn { user: user.into() }
    }

    /// The signed-in user, if any.
    pub fn user(&self) -> Option<&str> {
        match self {
            Self::Anonymous => None,
            Self::SignedIn { user } => Some(user),
        }
    }

    /// Whether someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.user().is_some()
    }
}

/// Saved looks, newest first, without duplicates.
#[derive(Debug)]
pub struct SavedLooks<K> {
    store: K,
}

impl<K: KeyValueStore> SavedLooks<K> {
    /// Saved looks kept in `store`.
    pub fn new(store: K) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub fn store(&self) -> &K {
        &self.store
    }

    /// Give the store back.
    pub fn into_store(self) -> K {
        self.store
    }

    /// Looks for `auth`. Anonymous users have none.
    pub fn list(&self, auth: &AuthState) -> TintResult<Vec<CapturedLook>> {
        let Some(user) = auth.user() else {
            return Ok(Vec::new());
        };
        self.load(&key_for(user))
    }

    /// Prepend `look`. Returns `false` if it was already saved.
    #[tracing::instrument(skip_all, fields(user = auth.user()))]
    pub fn save(&mut self, auth: &AuthState, look: CapturedLook) -> TintResult<bool> {
        let key = require_key(auth)?;
        let mut looks = self.load(&key)?;
        if looks.contains(&look) {
            return Ok(false);
        }
        looks.insert(0, look);
        self.write(&key, &looks)?;
        tracing::info!(count = looks.len(), "look saved");
        Ok(true)
    }

    /// Remove every entry equal to `look`. Returns whether anything was removed.
    pub fn remove(&mut self, auth: &AuthState, look: &CapturedLook) -> TintResult<bool> {
        let key = require_key(auth)?;
        let mut looks = self.load(&key)?;
        let before = looks.len();
        looks.retain(|l| l != look);
        if looks.len() == before {
            return Ok(false);
        }
        self.write(&key, &looks)?;
        Ok(true)
    }

    /// Forget every look of `auth`.
    pub fn clear(&mut self, auth: &AuthState) -> TintResult<()> {
        let key = require_key(auth)?;
        self.store.remove(&key)
    }

    fn load(&self, key: &str) -> TintResult<Vec<CapturedLook>> {
        let Some(json) = self.store.get(key)? else {
            return Ok(Vec::new());
        };
        let entries = match serde_json::from_str::<Vec<String>>(&json) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(key, error = %e, "stored looks unreadable, starting empty");
                return Ok(Vec::new());
            }
        };
        Ok(entries
            .into_iter()
            .filter_map(|entry| match CapturedLook::from_data_url(entry) {
                Ok(look) => Some(look),
                Err(e) => {
                    tracing::warn!(key, error = %e, "dropping stored look");
                    None
                }
            })
            .collect())
    }

    fn write(&mut self, key: &str, looks: &[CapturedLook]) -> TintResult<()> {
        let json = serde_json::to_string(looks)?;
        self.store.set(key, &json)
    }
}

fn key_for(user: &str) -> String {
    format!("{KEY_PREFIX}:{user}")
}

fn require_key(auth: &AuthState) -> TintResult<String> {
    auth.user()
        .map(key_for)
        .ok_or_else(|| TintError::unauthenticated("sign in to save looks"))
}

#[cfg(test)]
#[path = "../../tests/unit/looks/saved.rs"]
mod tests;
