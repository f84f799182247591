// web_app/session.rs - Authenticated session state
//
// The backend hands out a bearer token with a relative lifetime
// (`expires_in` seconds). It is stored next to an absolute expiry so a
// reload can tell whether the token is still worth sending.

use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::web_app::model::{LoginResponse, User};
use crate::web_app::storage::{get_json, put_json, KeyValueStore, StorageError};

pub const TOKEN_KEY: &str = "token";
pub const EXPIRES_AT_KEY: &str = "token_expires_at";
pub const USER_KEY: &str = "user";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: String,
    /// `None` when the backend sent no usable lifetime (missing, zero or out of range)
    pub expires_at: Option<DateTime<Utc>>,
    pub user: Option<User>,
}

impl AuthSession {
    pub fn from_login(response: &LoginResponse, now: DateTime<Utc>) -> Self {
        Self {
            token: response.token.clone(),
            expires_at: response
                .expires_in
                .filter(|seconds| *seconds > 0)
                .and_then(Duration::try_seconds)
                .and_then(|lifetime| now.checked_add_signed(lifetime)),
            user: None,
        }
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|at| at <= now)
    }

    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> Option<i64> {
        self.expires_at.map(|at| (at - now).num_seconds().max(0))
    }

    pub fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(User::is_admin)
    }

    /// Restore a stored session
    ///
    /// An expired session is cleared from the store and `None` is returned.
    pub fn load(store: &dyn KeyValueStore, now: DateTime<Utc>) -> Option<Self> {
        let token = store.get(TOKEN_KEY).filter(|t| !t.trim().is_empty())?;
        let expires_at = store
            .get(EXPIRES_AT_KEY)
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single());
        let user = get_json::<User>(store, USER_KEY);

        let session = Self { token, expires_at, user };
        if session.is_expired(now) {
            tracing::info!("Stored session expired, clearing it");
            Self::forget(store);
            return None;
        }
        Some(session)
    }

    pub fn save(&self, store: &dyn KeyValueStore) -> Result<(), StorageError> {
        store.set(TOKEN_KEY, &self.token)?;
        match self.expires_at {
            Some(at) => store.set(EXPIRES_AT_KEY, &at.timestamp_millis().to_string())?,
            None => store.remove(EXPIRES_AT_KEY),
        }
        match &self.user {
            Some(user) => put_json(store, USER_KEY, user)?,
            None => store.remove(USER_KEY),
        }
        Ok(())
    }

    /// Remove the persisted session keys
    pub fn forget(store: &dyn KeyValueStore) {
        store.remove(TOKEN_KEY);
        store.remove(EXPIRES_AT_KEY);
        store.remove(USER_KEY);
    }

    /// Full logout: session keys plus everything tab-scoped (selection, caches)
    pub fn teardown(store: &dyn KeyValueStore, tab_store: &dyn KeyValueStore) {
        Self::forget(store);
        tab_store.clear();
    }
}
