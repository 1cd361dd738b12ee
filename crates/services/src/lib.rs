//! # services
//!
//! Domain logic for the Mushaira festival core: the session/identity
//! store, the submission workflow controller, the query/filter engine,
//! and opening-verse curation. Everything here depends on the `domains`
//! ports abstractly; the adapters crate provides concrete stores.

pub mod query;
pub mod session;
pub mod verses;
pub mod workflow;

pub use query::{BestOf, StatusFilter, SubmissionQuery};
pub use session::SessionService;
pub use verses::{NewVerse, VerseService};
pub use workflow::{ArazPayload, NewSubmission, SubmissionPayload, WorkflowService};
