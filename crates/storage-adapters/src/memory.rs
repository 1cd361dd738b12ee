//! In-memory repositories.
//!
//! The submission map sits behind a single `RwLock` rather than a
//! sharded map: `set_featured` must clear every flag and set one under
//! one writer guard, or two concurrent feature calls could leave two
//! showcased submissions.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;

use domains::{
    OpeningVerse, Result, Submission, SubmissionId, SubmissionRepo, VerseId, VerseRepo,
};

#[derive(Default)]
pub struct MemorySubmissionRepo {
    items: RwLock<HashMap<SubmissionId, Submission>>,
}

impl MemorySubmissionRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-loads records, replacing any existing ones with the same id.
    pub async fn seed(&self, submissions: impl IntoIterator<Item = Submission>) {
        let mut items = self.items.write().await;
        for sub in submissions {
            items.insert(sub.id.clone(), sub);
        }
    }
}

#[async_trait]
impl SubmissionRepo for MemorySubmissionRepo {
    async fn get(&self, id: &SubmissionId) -> Result<Option<Submission>> {
        Ok(self.items.read().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<Submission>> {
        let items = self.items.read().await;
        let mut all: Vec<Submission> = items.values().cloned().collect();
        // HashMap iteration order is arbitrary; keep listings stable.
        all.sort_by(|a, b| a.entered_at.cmp(&b.entered_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn upsert(&self, submission: Submission) -> Result<()> {
        self.items
            .write()
            .await
            .insert(submission.id.clone(), submission);
        Ok(())
    }

    async fn delete(&self, id: &SubmissionId) -> Result<()> {
        self.items.write().await.remove(id);
        Ok(())
    }

    async fn set_featured(&self, id: Option<SubmissionId>) -> Result<()> {
        let mut items = self.items.write().await;
        for sub in items.values_mut() {
            sub.featured = false;
        }
        if let Some(id) = id {
            if let Some(sub) = items.get_mut(&id) {
                sub.featured = true;
            }
        }
        Ok(())
    }
}

/// Verse records are independent of each other, so a sharded map is fine.
#[derive(Default)]
pub struct MemoryVerseRepo {
    items: DashMap<VerseId, OpeningVerse>,
}

impl MemoryVerseRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, verses: impl IntoIterator<Item = OpeningVerse>) {
        for verse in verses {
            self.items.insert(verse.id.clone(), verse);
        }
    }
}

#[async_trait]
impl VerseRepo for MemoryVerseRepo {
    async fn get(&self, id: &VerseId) -> Result<Option<OpeningVerse>> {
        Ok(self.items.get(id).map(|v| v.clone()))
    }

    async fn list(&self) -> Result<Vec<OpeningVerse>> {
        let mut all: Vec<OpeningVerse> = self.items.iter().map(|v| v.clone()).collect();
        all.sort_by(|a, b| a.day.cmp(&b.day).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn upsert(&self, verse: OpeningVerse) -> Result<()> {
        self.items.insert(verse.id.clone(), verse);
        Ok(())
    }

    async fn delete(&self, id: &VerseId) -> Result<()> {
        self.items.remove(id);
        Ok(())
    }
}
