//! # Workflow controller
//!
//! Mutates submission state subject to the session's role and the entity
//! invariants. Every method validates before it writes; a failed call
//! leaves the collection untouched. Admin-only transitions are gated by
//! [`SessionService::require_admin`], so unauthenticated and non-admin
//! actors fail identically.

use std::sync::Arc;

use tracing::{info, instrument};

use domains::{
    ApprovalState, CheckingStatus, Clock, Comment, CommentId, DomainError, Language, Rating,
    Result, Submission, SubmissionId, SubmissionKind, SubmissionMethod, SubmissionRepo, VerseId,
    VerseRepo,
};

use crate::session::SessionService;

/// Default minimum length for manually typed entries, in characters.
pub const DEFAULT_MIN_POEM_CHARS: usize = 20;

/// Method-specific payload of a new entry. The submission method is
/// derived from the variant, so a dispatch site can never forget one.
#[derive(Debug, Clone)]
pub enum SubmissionPayload {
    Manual { text: String },
    Upload { file_ref: String },
    Recording { audio_ref: String },
}

impl SubmissionPayload {
    pub fn method(&self) -> SubmissionMethod {
        match self {
            SubmissionPayload::Manual { .. } => SubmissionMethod::Manual,
            SubmissionPayload::Upload { .. } => SubmissionMethod::Upload,
            SubmissionPayload::Recording { .. } => SubmissionMethod::Recording,
        }
    }
}

/// Input to [`WorkflowService::submit`].
#[derive(Debug, Clone)]
pub struct NewSubmission {
    pub kind: SubmissionKind,
    pub language: Language,
    pub payload: SubmissionPayload,
    pub inspired_by: Option<VerseId>,
}

/// The checked araz version an admin uploads: typed text or a reference
/// to an uploaded file.
#[derive(Debug, Clone)]
pub enum ArazPayload {
    Text(String),
    File { file_ref: String },
}

pub struct WorkflowService {
    submissions: Arc<dyn SubmissionRepo>,
    verses: Arc<dyn VerseRepo>,
    clock: Arc<dyn Clock>,
    min_poem_chars: usize,
}

impl WorkflowService {
    pub fn new(
        submissions: Arc<dyn SubmissionRepo>,
        verses: Arc<dyn VerseRepo>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            submissions,
            verses,
            clock,
            min_poem_chars: DEFAULT_MIN_POEM_CHARS,
        }
    }

    pub fn with_min_poem_chars(mut self, min: usize) -> Self {
        self.min_poem_chars = min;
        self
    }

    async fn fetch(&self, id: &SubmissionId) -> Result<Submission> {
        self.submissions
            .get(id)
            .await?
            .ok_or_else(|| DomainError::NotFound("submission", id.to_string()))
    }

    /// Creates a new entry for the current identity. Validation is
    /// fail-fast: the method-specific payload is checked before the
    /// inspiration reference, and the first violated rule is reported.
    #[instrument(skip_all, fields(kind = ?new.kind, language = ?new.language))]
    pub async fn submit(
        &self,
        session: &SessionService,
        new: NewSubmission,
    ) -> Result<Submission> {
        let author = session.require_identity().await?;

        let (content, file_ref, audio_ref) = match &new.payload {
            SubmissionPayload::Manual { text } => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return Err(DomainError::Validation("poem content is required".into()));
                }
                if trimmed.chars().count() < self.min_poem_chars {
                    return Err(DomainError::Validation(format!(
                        "poem is too short (minimum {} characters)",
                        self.min_poem_chars
                    )));
                }
                (text.clone(), None, None)
            }
            SubmissionPayload::Upload { file_ref } => {
                if file_ref.trim().is_empty() {
                    return Err(DomainError::Validation("a file must be selected".into()));
                }
                (String::new(), Some(file_ref.clone()), None)
            }
            SubmissionPayload::Recording { audio_ref } => {
                if audio_ref.trim().is_empty() {
                    return Err(DomainError::Validation("a recording is required".into()));
                }
                (String::new(), None, Some(audio_ref.clone()))
            }
        };

        if let Some(verse_id) = &new.inspired_by {
            let verse = self
                .verses
                .get(verse_id)
                .await?
                .ok_or_else(|| {
                    DomainError::Validation(format!("unknown opening verse {verse_id}"))
                })?;
            if verse.language != new.language {
                return Err(DomainError::Validation(format!(
                    "opening verse {verse_id} is in {}, not {}",
                    verse.language.label(),
                    new.language.label()
                )));
            }
        }

        let submission = Submission {
            id: SubmissionId::generate(),
            kind: new.kind,
            method: new.payload.method(),
            content,
            file_ref,
            audio_ref,
            author: author.author_ref(),
            language: new.language,
            entered_at: self.clock.now(),
            inspired_by: new.inspired_by,
            approval: ApprovalState::Pending,
            rating: Rating::NOT_RATED,
            checking: CheckingStatus::ArazPending,
            araz_content: None,
            featured: false,
            likes: 0,
            views: 0,
            comments: vec![],
        };
        self.submissions.upsert(submission.clone()).await?;
        info!(id = %submission.id, author = %submission.author.id, "submission received");
        Ok(submission)
    }

    /// `pending → approved`. Admin only; decided submissions cannot be
    /// re-approved.
    #[instrument(skip(self, session))]
    pub async fn approve(&self, session: &SessionService, id: &SubmissionId) -> Result<()> {
        session.require_admin().await?;
        let mut sub = self.fetch(id).await?;
        match sub.approval {
            ApprovalState::Pending => {}
            ApprovalState::Approved => {
                return Err(DomainError::Validation(format!("{id} is already approved")))
            }
            ApprovalState::Rejected => {
                return Err(DomainError::Validation(format!("{id} was rejected")))
            }
        }
        sub.approval = ApprovalState::Approved;
        self.submissions.upsert(sub).await?;
        info!(%id, "submission approved");
        Ok(())
    }

    /// `pending → rejected`. Admin only. Rejection applies to unreviewed
    /// work only; the record is retained but leaves every listing.
    #[instrument(skip(self, session))]
    pub async fn reject(&self, session: &SessionService, id: &SubmissionId) -> Result<()> {
        session.require_admin().await?;
        let mut sub = self.fetch(id).await?;
        if sub.approval != ApprovalState::Pending {
            return Err(DomainError::Validation(format!(
                "only pending submissions can be rejected, {id} is {:?}",
                sub.approval
            )));
        }
        sub.approval = ApprovalState::Rejected;
        sub.featured = false;
        self.submissions.upsert(sub).await?;
        info!(%id, "submission rejected");
        Ok(())
    }

    /// Assigns an admin rating. Valid at any point after creation,
    /// regardless of approval state. `stars` must sit on the half-star
    /// grid in [0.5, 5.0]; rating twice with the same value is a no-op in
    /// effect.
    #[instrument(skip(self, session))]
    pub async fn rate(&self, session: &SessionService, id: &SubmissionId, stars: f32) -> Result<()> {
        session.require_admin().await?;
        let rating = Rating::from_stars(stars)?;
        let mut sub = self.fetch(id).await?;
        sub.rating = rating;
        self.submissions.upsert(sub).await?;
        info!(%id, %rating, "submission rated");
        Ok(())
    }

    /// Marks `id` as the single showcased submission. The target must be
    /// approved; exclusivity is enforced as a side effect by the store's
    /// atomic clear-then-set.
    #[instrument(skip(self, session))]
    pub async fn feature(&self, session: &SessionService, id: &SubmissionId) -> Result<()> {
        session.require_admin().await?;
        let sub = self.fetch(id).await?;
        if !sub.is_approved() {
            return Err(DomainError::Validation(format!(
                "only approved submissions can be featured, {id} is {:?}",
                sub.approval
            )));
        }
        self.submissions.set_featured(Some(id.clone())).await?;
        info!(%id, "submission featured");
        Ok(())
    }

    /// Clears the showcase. No-op when nothing is featured.
    #[instrument(skip(self, session))]
    pub async fn unfeature(&self, session: &SessionService) -> Result<()> {
        session.require_admin().await?;
        self.submissions.set_featured(None).await?;
        info!("showcase cleared");
        Ok(())
    }

    /// Stores the checked araz version and marks checking done.
    #[instrument(skip(self, session, payload))]
    pub async fn upload_araz(
        &self,
        session: &SessionService,
        id: &SubmissionId,
        payload: ArazPayload,
    ) -> Result<()> {
        session.require_admin().await?;
        let checked = match payload {
            ArazPayload::Text(text) => {
                if text.trim().is_empty() {
                    return Err(DomainError::Validation(
                        "checked araz content is required".into(),
                    ));
                }
                text
            }
            ArazPayload::File { file_ref } => {
                if file_ref.trim().is_empty() {
                    return Err(DomainError::Validation("an araz file is required".into()));
                }
                format!("[Araz file uploaded: {file_ref}]")
            }
        };
        let mut sub = self.fetch(id).await?;
        sub.araz_content = Some(checked);
        sub.checking = CheckingStatus::ArazDone;
        self.submissions.upsert(sub).await?;
        info!(%id, "araz version uploaded");
        Ok(())
    }

    /// Moves a submission between araz states. Marking done requires a
    /// previously uploaded araz version; moving back to pending keeps the
    /// checked content for re-review.
    #[instrument(skip(self, session))]
    pub async fn set_checking_status(
        &self,
        session: &SessionService,
        id: &SubmissionId,
        status: CheckingStatus,
    ) -> Result<()> {
        session.require_admin().await?;
        let mut sub = self.fetch(id).await?;
        if status == CheckingStatus::ArazDone
            && sub.araz_content.as_deref().map_or(true, |c| c.trim().is_empty())
        {
            return Err(DomainError::Validation(format!(
                "{id} has no araz version; upload one before marking done"
            )));
        }
        sub.checking = status;
        self.submissions.upsert(sub).await?;
        info!(%id, ?status, "checking status updated");
        Ok(())
    }

    /// Appends a comment from the current identity. Comments are
    /// append-only and allowed on approved submissions.
    #[instrument(skip(self, session, text))]
    pub async fn add_comment(
        &self,
        session: &SessionService,
        id: &SubmissionId,
        text: &str,
    ) -> Result<Comment> {
        let author = session.require_identity().await?;
        if text.trim().is_empty() {
            return Err(DomainError::Validation("comment text is required".into()));
        }
        let mut sub = self.fetch(id).await?;
        if !sub.is_approved() {
            return Err(DomainError::Validation(format!(
                "{id} is not approved; comments are not open"
            )));
        }
        let comment = Comment {
            id: CommentId::generate(),
            text: text.to_string(),
            author: author.author_ref(),
            posted_at: self.clock.now(),
        };
        sub.comments.push(comment.clone());
        self.submissions.upsert(sub).await?;
        Ok(comment)
    }

    /// Records a like. Anonymous readers count too.
    pub async fn like(&self, id: &SubmissionId) -> Result<()> {
        let mut sub = self.fetch(id).await?;
        if !sub.is_approved() {
            return Err(DomainError::Validation(format!("{id} is not approved")));
        }
        sub.likes += 1;
        self.submissions.upsert(sub).await
    }

    /// Records a view of an approved submission.
    pub async fn record_view(&self, id: &SubmissionId) -> Result<()> {
        let mut sub = self.fetch(id).await?;
        if !sub.is_approved() {
            return Err(DomainError::Validation(format!("{id} is not approved")));
        }
        sub.views += 1;
        self.submissions.upsert(sub).await
    }
}
