//! # auth-adapters
//!
//! Argon2-based implementation of the `CredentialStore` port. Accounts
//! live in memory, keyed by lowercased email; passwords are stored only
//! as PHC-format argon2 hashes. Admin accounts exist solely through
//! seeding — `register` always assigns `Role::User`.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use domains::{CredentialStore, DomainError, Identity, IdentityId, Result, Role};

/// One pre-provisioned account, as produced by `cmd/seed`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAccount {
    pub identity: Identity,
    /// PHC-format argon2 hash, never the cleartext.
    pub password_hash: String,
}

struct StoredAccount {
    identity: Identity,
    password_hash: String,
}

#[derive(Default)]
pub struct ArgonCredentialStore {
    accounts: DashMap<String, StoredAccount>,
}

/// Hashes a password with a fresh salt, PHC string output.
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| DomainError::Storage(format!("password hashing failed: {e}")))
}

impl ArgonCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(accounts: impl IntoIterator<Item = SeedAccount>) -> Self {
        let store = Self::new();
        for account in accounts {
            store.accounts.insert(
                account.identity.email.to_lowercase(),
                StoredAccount {
                    identity: account.identity,
                    password_hash: account.password_hash,
                },
            );
        }
        store
    }

    fn verify_hash(password: &str, hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(hash) else {
            return false;
        };
        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[async_trait]
impl CredentialStore for ArgonCredentialStore {
    async fn verify(&self, email: &str, password: &str) -> Result<Identity> {
        let key = email.to_lowercase();
        match self.accounts.get(&key) {
            Some(account) if Self::verify_hash(password, &account.password_hash) => {
                debug!(user = %account.identity.id, "credentials verified");
                Ok(account.identity.clone())
            }
            _ => {
                warn!(email = %key, "failed login attempt");
                Err(DomainError::Authentication)
            }
        }
    }

    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Identity> {
        let key = email.to_lowercase();
        if self.accounts.contains_key(&key) {
            return Err(DomainError::Conflict(format!(
                "email {email} is already in use"
            )));
        }
        let identity = Identity {
            id: IdentityId::generate(),
            name: name.to_string(),
            email: email.to_string(),
            role: Role::User,
        };
        let password_hash = hash_password(password)?;
        self.accounts.insert(
            key,
            StoredAccount {
                identity: identity.clone(),
                password_hash,
            },
        );
        debug!(user = %identity.id, "account registered");
        Ok(identity)
    }
}
