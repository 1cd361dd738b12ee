//! # Core Ports
//!
//! The seams between the workflow core and its collaborators. Services
//! depend on these traits abstractly; adapters provide the implementations
//! (in-memory for the current client, a persistent store once a backend
//! exists).

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{Identity, OpeningVerse, Submission, SubmissionId, VerseId};

/// Persistence contract for submissions.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SubmissionRepo: Send + Sync {
    async fn get(&self, id: &SubmissionId) -> Result<Option<Submission>>;
    async fn list(&self) -> Result<Vec<Submission>>;
    /// Inserts or replaces the full record.
    async fn upsert(&self, submission: Submission) -> Result<()>;
    async fn delete(&self, id: &SubmissionId) -> Result<()>;

    /// Clears every `featured` flag and sets it on `id`, as one atomic
    /// step. Passing `None` clears the flag everywhere.
    async fn set_featured(&self, id: Option<SubmissionId>) -> Result<()>;
}

/// Persistence contract for the daily opening verses.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait VerseRepo: Send + Sync {
    async fn get(&self, id: &VerseId) -> Result<Option<OpeningVerse>>;
    async fn list(&self) -> Result<Vec<OpeningVerse>>;
    async fn upsert(&self, verse: OpeningVerse) -> Result<()>;
    async fn delete(&self, id: &VerseId) -> Result<()>;
}

/// Credential verification and account registration.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Returns the identity for a matching credential pair, or
    /// [`DomainError::Authentication`](crate::DomainError::Authentication).
    async fn verify(&self, email: &str, password: &str) -> Result<Identity>;

    /// Registers a new account with role `User`. Fails with
    /// [`DomainError::Conflict`](crate::DomainError::Conflict) when the
    /// email is already taken.
    async fn register(&self, name: &str, email: &str, password: &str) -> Result<Identity>;
}

/// Durable client-side storage for the current session record.
/// The stored record holds the non-secret identity fields only.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait SessionStorage: Send + Sync {
    async fn save(&self, identity: &Identity) -> Result<()>;
    async fn load(&self) -> Result<Option<Identity>>;
    async fn clear(&self) -> Result<()>;
}

/// Injected time source so tests can supply deterministic timestamps.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
