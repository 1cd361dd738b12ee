//! # Opening-verse curation
//!
//! Admin-only CRUD over the daily opening verses. A verse referenced by
//! any submission's inspiration link cannot be deleted; nulling the
//! references out would silently rewrite user submissions.

use std::sync::Arc;

use tracing::{info, instrument};

use domains::{
    Clock, DomainError, Language, OpeningVerse, Result, SubmissionRepo, VerseId, VerseRepo,
};

use crate::session::SessionService;

/// Default festival length in days.
pub const DEFAULT_FESTIVAL_DAYS: u8 = 10;

/// Input to [`VerseService::create`].
#[derive(Debug, Clone)]
pub struct NewVerse {
    pub text: String,
    pub attributed_to: String,
    pub language: Language,
    pub day: u8,
}

pub struct VerseService {
    verses: Arc<dyn VerseRepo>,
    submissions: Arc<dyn SubmissionRepo>,
    clock: Arc<dyn Clock>,
    festival_days: u8,
}

impl VerseService {
    pub fn new(
        verses: Arc<dyn VerseRepo>,
        submissions: Arc<dyn SubmissionRepo>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verses,
            submissions,
            clock,
            festival_days: DEFAULT_FESTIVAL_DAYS,
        }
    }

    pub fn with_festival_days(mut self, days: u8) -> Self {
        self.festival_days = days;
        self
    }

    fn validate(&self, text: &str, attributed_to: &str, day: u8) -> Result<()> {
        if text.trim().is_empty() {
            return Err(DomainError::Validation("verse text is required".into()));
        }
        if attributed_to.trim().is_empty() {
            return Err(DomainError::Validation(
                "verse attribution is required".into(),
            ));
        }
        if day == 0 || day > self.festival_days {
            return Err(DomainError::Validation(format!(
                "day {day} is outside the festival (1..={})",
                self.festival_days
            )));
        }
        Ok(())
    }

    #[instrument(skip_all, fields(language = ?new.language, day = new.day))]
    pub async fn create(&self, session: &SessionService, new: NewVerse) -> Result<OpeningVerse> {
        session.require_admin().await?;
        self.validate(&new.text, &new.attributed_to, new.day)?;
        let verse = OpeningVerse {
            id: VerseId::generate(),
            text: new.text,
            attributed_to: new.attributed_to,
            language: new.language,
            day: new.day,
            published_on: self.clock.now(),
        };
        self.verses.upsert(verse.clone()).await?;
        info!(id = %verse.id, "opening verse published");
        Ok(verse)
    }

    /// Replaces an existing verse in full.
    #[instrument(skip_all, fields(id = %verse.id))]
    pub async fn update(&self, session: &SessionService, verse: OpeningVerse) -> Result<()> {
        session.require_admin().await?;
        self.validate(&verse.text, &verse.attributed_to, verse.day)?;
        if self.verses.get(&verse.id).await?.is_none() {
            return Err(DomainError::NotFound("opening verse", verse.id.to_string()));
        }
        self.verses.upsert(verse).await
    }

    /// Removes a verse, unless a submission still references it.
    #[instrument(skip(self, session))]
    pub async fn delete(&self, session: &SessionService, id: &VerseId) -> Result<()> {
        session.require_admin().await?;
        if self.verses.get(id).await?.is_none() {
            return Err(DomainError::NotFound("opening verse", id.to_string()));
        }
        let referencing = self
            .submissions
            .list()
            .await?
            .into_iter()
            .filter(|s| s.inspired_by.as_ref() == Some(id))
            .count();
        if referencing > 0 {
            return Err(DomainError::Conflict(format!(
                "opening verse {id} is referenced by {referencing} submission(s)"
            )));
        }
        self.verses.delete(id).await?;
        info!(%id, "opening verse deleted");
        Ok(())
    }
}
