//! # Session Context
//!
//! Shared view of the signed-in user, backed by the on-device key-value
//! store.
//!
//! ## Session Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  login ok ────► set_session() ────► token / user_role / user_login     │
//! │                                            │                            │
//! │  tab focus ───► evaluate() ◄───────────────┘                            │
//! │                     │                                                   │
//! │                     ├── token present ──► Authenticated                 │
//! │                     ├── token missing ──► Unauthenticated               │
//! │                     └── store error ────► Unauthenticated (logged)      │
//! │                                                                         │
//! │  logout ──────► clear_session() ──► all three keys removed together    │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use nextcar_core::{AuthState, Session};
use nextcar_store::{keys, KeyValueStore, StoreResult};
use tracing::{debug, error, info};

/// Handle to the persisted session. Cheap to clone.
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        SessionContext { store }
    }

    /// Reads all three session keys.
    pub async fn get_session(&self) -> StoreResult<Session> {
        Ok(Session {
            token: self.store.get(keys::TOKEN).await?,
            role: self.store.get(keys::USER_ROLE).await?,
            login: self.store.get(keys::USER_LOGIN).await?,
        })
    }

    /// Stored token, treating an empty value as absent.
    pub async fn token(&self) -> StoreResult<Option<String>> {
        let token = self.store.get(keys::TOKEN).await?;
        Ok(token.filter(|t| !t.is_empty()))
    }

    /// Stored login (the user's email).
    pub async fn login_identifier(&self) -> StoreResult<Option<String>> {
        self.store.get(keys::USER_LOGIN).await
    }

    /// Persists a fresh session. The three keys are written as one batch.
    pub async fn set_session(&self, token: &str, role: &str, login: &str) -> StoreResult<()> {
        self.store
            .set_many(&[
                (keys::TOKEN, token),
                (keys::USER_ROLE, role),
                (keys::USER_LOGIN, login),
            ])
            .await?;

        info!(login = %login, role = %role, "Session stored");
        Ok(())
    }

    /// Removes every session key.
    pub async fn clear_session(&self) -> StoreResult<()> {
        self.store.remove_many(&keys::SESSION).await?;
        info!("Session cleared");
        Ok(())
    }

    /// Session gate. A store failure counts as signed out.
    pub async fn evaluate(&self) -> AuthState {
        match self.get_session().await {
            Ok(session) => {
                let state = AuthState::from_session(&session);
                debug!(authenticated = state.is_authenticated(), "Session evaluated");
                state
            }
            Err(e) => {
                error!(error = %e, "Failed to read session");
                AuthState::Unauthenticated
            }
        }
    }
}

impl std::fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}
