//! # Domain Models
//!
//! These structs represent the core entities of the Mushaira festival:
//! identities, verse submissions, and the daily opening verses.
//! Ids are opaque strings; fresh ones are UUID v4.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, Result};

macro_rules! string_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            /// A freshly generated unique id.
            pub fn generate() -> Self {
                Self(Uuid::new_v4().to_string())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id!(
    /// Identifies an authenticated account.
    IdentityId
);
string_id!(
    /// Identifies a poem/verse submission.
    SubmissionId
);
string_id!(
    /// Identifies a daily opening verse.
    VerseId
);
string_id!(
    /// Identifies a comment on a submission.
    CommentId
);

/// Access level of an identity. Signup always produces `User`;
/// only pre-seeded accounts hold `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

/// An authenticated account. This is also the shape of the persisted
/// session record, so it must never grow a credential field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub id: IdentityId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn author_ref(&self) -> AuthorRef {
        AuthorRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Authorship snapshot embedded in a submission. The author owns this
/// metadata only, never the moderation fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: IdentityId,
    pub name: String,
}

/// The festival languages, in declared display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    English,
    Arabic,
    Urdu,
    #[serde(rename = "Lisan al-Dawah")]
    LisanAlDawah,
    French,
}

impl Language {
    /// Fixed ordering used when grouping verses and per-language listings.
    pub const DECLARED_ORDER: [Language; 5] = [
        Language::English,
        Language::Arabic,
        Language::Urdu,
        Language::LisanAlDawah,
        Language::French,
    ];

    /// Position within [`Self::DECLARED_ORDER`], for deterministic sorts.
    pub fn order_index(self) -> usize {
        Self::DECLARED_ORDER
            .iter()
            .position(|l| *l == self)
            .unwrap_or(usize::MAX)
    }

    /// Right-to-left scripts need mirrored presentation.
    pub fn is_rtl(self) -> bool {
        matches!(
            self,
            Language::Arabic | Language::Urdu | Language::LisanAlDawah
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Arabic => "Arabic",
            Language::Urdu => "Urdu",
            Language::LisanAlDawah => "Lisan al-Dawah",
            Language::French => "French",
        }
    }
}

/// Submission granularity: a short verse fragment or a complete poem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionKind {
    /// A few standalone couplets ("Individual Abyat").
    Individual,
    /// A complete poem ("Full Nazam").
    Full,
}

impl SubmissionKind {
    pub fn label(self) -> &'static str {
        match self {
            SubmissionKind::Individual => "Individual Abyat",
            SubmissionKind::Full => "Full Nazam",
        }
    }
}

/// How the entry arrived. Manual entries carry text in `content`;
/// the other two carry an opaque reference instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubmissionMethod {
    Manual,
    Upload,
    Recording,
}

/// Moderation lifecycle of a submission. `Rejected` is terminal and the
/// record is retained but excluded from every listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApprovalState {
    Pending,
    Approved,
    Rejected,
}

/// Whether the admin quality-check ("araz") pass has produced a final text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckingStatus {
    ArazPending,
    ArazDone,
}

/// An admin star rating in half-star units: 0 (not rated) through 10 (5.0).
///
/// Storing half steps instead of a float makes equality exact and leaves
/// off-grid values unrepresentable. Serialized as the star value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Rating(u8);

impl Rating {
    /// "Not yet rated" — the absence of any prior rate action.
    pub const NOT_RATED: Rating = Rating(0);

    const MAX_HALF_STEPS: u8 = 10;

    /// Parses a star value. Valid ratings are multiples of 0.5 in
    /// [0.5, 5.0]; zero is not a rating an admin can assign.
    pub fn from_stars(stars: f32) -> Result<Self> {
        let doubled = stars * 2.0;
        if doubled.fract() != 0.0 {
            return Err(DomainError::Validation(format!(
                "rating {stars} is not a multiple of 0.5"
            )));
        }
        let half_steps = doubled as i64;
        if !(1..=i64::from(Self::MAX_HALF_STEPS)).contains(&half_steps) {
            return Err(DomainError::Validation(format!(
                "rating {stars} is outside 0.5..=5.0"
            )));
        }
        Ok(Rating(half_steps as u8))
    }

    pub fn stars(self) -> f32 {
        f32::from(self.0) / 2.0
    }

    pub fn is_rated(self) -> bool {
        self.0 > 0
    }
}

impl TryFrom<f32> for Rating {
    type Error = String;

    fn try_from(stars: f32) -> std::result::Result<Self, Self::Error> {
        if stars == 0.0 {
            return Ok(Rating::NOT_RATED);
        }
        Rating::from_stars(stars).map_err(|e| e.to_string())
    }
}

impl From<Rating> for f32 {
    fn from(r: Rating) -> f32 {
        r.stars()
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.stars())
    }
}

/// A reader comment, append-only from the viewer's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub text: String,
    pub author: AuthorRef,
    pub posted_at: DateTime<Utc>,
}

/// A poetry entry: an individual abyat or a full nazam.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub id: SubmissionId,
    pub kind: SubmissionKind,
    pub method: SubmissionMethod,
    /// Original text body. Empty for upload/recording entries, which carry
    /// a reference instead.
    pub content: String,
    pub file_ref: Option<String>,
    pub audio_ref: Option<String>,
    pub author: AuthorRef,
    pub language: Language,
    pub entered_at: DateTime<Utc>,
    /// Opening verse this entry was inspired by. Must match `language`.
    pub inspired_by: Option<VerseId>,
    pub approval: ApprovalState,
    pub rating: Rating,
    pub checking: CheckingStatus,
    /// Admin-authored checked text; present whenever checking is done.
    pub araz_content: Option<String>,
    /// At most one submission in the collection carries this flag.
    pub featured: bool,
    pub likes: u32,
    pub views: u32,
    pub comments: Vec<Comment>,
}

impl Submission {
    pub fn is_approved(&self) -> bool {
        self.approval == ApprovalState::Approved
    }

    /// Whether this record may appear in public listings at all.
    pub fn is_listed(&self) -> bool {
        self.approval != ApprovalState::Rejected
    }
}

/// A daily curated inspirational line in a given language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpeningVerse {
    pub id: VerseId,
    pub text: String,
    /// Free-text attribution, distinct from any Identity.
    pub attributed_to: String,
    pub language: Language,
    /// Festival day, 1-based.
    pub day: u8,
    pub published_on: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_grid_accepts_half_steps_only() {
        assert_eq!(Rating::from_stars(3.5).unwrap().stars(), 3.5);
        assert_eq!(Rating::from_stars(0.5).unwrap().stars(), 0.5);
        assert_eq!(Rating::from_stars(5.0).unwrap().stars(), 5.0);
        assert!(Rating::from_stars(0.0).is_err());
        assert!(Rating::from_stars(5.5).is_err());
        assert!(Rating::from_stars(2.3).is_err());
        assert!(Rating::from_stars(-1.0).is_err());
    }

    #[test]
    fn rating_serializes_as_star_value() {
        let r = Rating::from_stars(4.5).unwrap();
        assert_eq!(serde_json::to_string(&r).unwrap(), "4.5");
        let back: Rating = serde_json::from_str("4.5").unwrap();
        assert_eq!(back, r);
        let unrated: Rating = serde_json::from_str("0.0").unwrap();
        assert!(!unrated.is_rated());
    }

    #[test]
    fn language_order_is_stable() {
        assert!(Language::English.order_index() < Language::Arabic.order_index());
        assert!(Language::Urdu.order_index() < Language::French.order_index());
        assert!(Language::Arabic.is_rtl());
        assert!(!Language::English.is_rtl());
    }

    #[test]
    fn checking_status_wire_names() {
        assert_eq!(
            serde_json::to_string(&CheckingStatus::ArazDone).unwrap(),
            "\"araz_done\""
        );
        assert_eq!(
            serde_json::to_string(&Language::LisanAlDawah).unwrap(),
            "\"Lisan al-Dawah\""
        );
    }
}
