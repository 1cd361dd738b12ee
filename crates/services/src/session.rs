//! # Session/Identity store
//!
//! Holds the current authenticated identity. Exactly one identity is
//! current at a time, or none. Reads and swaps go through a single
//! `RwLock`, so no caller ever observes a half-updated identity.
//! The non-secret identity record is mirrored to durable client storage
//! so a reload restores the session without re-authentication.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use domains::{CredentialStore, DomainError, Identity, Result, Role, SessionStorage};

pub struct SessionService {
    current: RwLock<Option<Identity>>,
    credentials: Arc<dyn CredentialStore>,
    storage: Arc<dyn SessionStorage>,
}

impl SessionService {
    pub fn new(credentials: Arc<dyn CredentialStore>, storage: Arc<dyn SessionStorage>) -> Self {
        Self {
            current: RwLock::new(None),
            credentials,
            storage,
        }
    }

    /// Restores a previously persisted session, if any. Called once at
    /// startup, before any protected view reads the session.
    pub async fn restore(&self) -> Result<Option<Identity>> {
        let stored = self.storage.load().await?;
        if let Some(identity) = &stored {
            debug!(user = %identity.id, "restored persisted session");
            *self.current.write().await = Some(identity.clone());
        }
        Ok(stored)
    }

    /// Authenticates and makes the matching identity current.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity> {
        let identity = self.credentials.verify(email, password).await?;
        self.storage.save(&identity).await?;
        *self.current.write().await = Some(identity.clone());
        info!(user = %identity.id, role = ?identity.role, "logged in");
        Ok(identity)
    }

    /// Registers a new account (always `Role::User`) and logs it in.
    pub async fn signup(&self, name: &str, email: &str, password: &str) -> Result<Identity> {
        let identity = self.credentials.register(name, email, password).await?;
        self.storage.save(&identity).await?;
        *self.current.write().await = Some(identity.clone());
        info!(user = %identity.id, "signed up");
        Ok(identity)
    }

    /// Clears the current identity. Idempotent: logging out while logged
    /// out is a no-op, not an error.
    pub async fn logout(&self) -> Result<()> {
        let mut guard = self.current.write().await;
        if let Some(identity) = guard.take() {
            info!(user = %identity.id, "logged out");
        }
        self.storage.clear().await
    }

    pub async fn current(&self) -> Option<Identity> {
        self.current.read().await.clone()
    }

    pub async fn is_admin(&self) -> bool {
        matches!(
            self.current.read().await.as_ref(),
            Some(identity) if identity.role == Role::Admin
        )
    }

    /// The gate for any authenticated action.
    pub async fn require_identity(&self) -> Result<Identity> {
        self.current
            .read()
            .await
            .clone()
            .ok_or_else(|| DomainError::Authorization("not logged in".to_string()))
    }

    /// The gate for admin-only transitions. Unauthenticated and non-admin
    /// actors fail the same way, before any state is touched.
    pub async fn require_admin(&self) -> Result<Identity> {
        let identity = self.require_identity().await?;
        if identity.role != Role::Admin {
            warn!(user = %identity.id, "non-admin attempted an admin-only action");
            return Err(DomainError::Authorization(
                "admin role required".to_string(),
            ));
        }
        Ok(identity)
    }
}
