//! # Query/Filter engine
//!
//! Pure functions over submission and verse collections. Predicates
//! compose by conjunction; every sort used by the views is deterministic.
//! Rejected submissions never appear in any listing.

use domains::{
    ApprovalState, CheckingStatus, IdentityId, Language, OpeningVerse, Submission, SubmissionKind,
};

/// Approval-state scope of a listing. `All` still excludes rejected
/// records; those leave every view for good.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    Pending,
    #[default]
    Approved,
    All,
}

impl StatusFilter {
    fn admits(self, state: ApprovalState) -> bool {
        match (self, state) {
            (_, ApprovalState::Rejected) => false,
            (StatusFilter::All, _) => true,
            (StatusFilter::Pending, s) => s == ApprovalState::Pending,
            (StatusFilter::Approved, s) => s == ApprovalState::Approved,
        }
    }
}

/// A conjunction of optional predicates over the submission collection.
///
/// The constructors encode the visibility defaults of each view; the
/// `with_*` methods narrow further.
#[derive(Debug, Clone, Default)]
pub struct SubmissionQuery {
    status: StatusFilter,
    kind: Option<SubmissionKind>,
    language: Option<Language>,
    checking: Option<CheckingStatus>,
    author: Option<IdentityId>,
    search: String,
}

impl SubmissionQuery {
    /// Default visibility of every non-admin view: approved only.
    pub fn public() -> Self {
        Self::default()
    }

    /// Admin review view: pending by default, widenable via
    /// [`with_status`](Self::with_status).
    pub fn admin_review() -> Self {
        Self {
            status: StatusFilter::Pending,
            ..Self::default()
        }
    }

    /// "My submissions": constrained to the author, who may see their own
    /// pending work as well.
    pub fn mine(author: IdentityId) -> Self {
        Self {
            status: StatusFilter::All,
            author: Some(author),
            ..Self::default()
        }
    }

    /// Araz-checking view: approved submissions, optionally narrowed by
    /// checking status.
    pub fn checking() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    pub fn with_kind(mut self, kind: SubmissionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_language(mut self, language: Language) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_checking(mut self, checking: CheckingStatus) -> Self {
        self.checking = Some(checking);
        self
    }

    /// Case-insensitive substring search over content and author name.
    /// An empty query matches everything.
    pub fn with_search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn matches(&self, s: &Submission) -> bool {
        if !self.status.admits(s.approval) {
            return false;
        }
        if self.kind.is_some_and(|k| k != s.kind) {
            return false;
        }
        if self.language.is_some_and(|l| l != s.language) {
            return false;
        }
        if self.checking.is_some_and(|c| c != s.checking) {
            return false;
        }
        if self.author.as_ref().is_some_and(|a| *a != s.author.id) {
            return false;
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            let in_content = s.content.to_lowercase().contains(&needle);
            let in_author = s.author.name.to_lowercase().contains(&needle);
            if !in_content && !in_author {
                return false;
            }
        }
        true
    }

    /// The visible subset, in collection order.
    pub fn apply(&self, submissions: &[Submission]) -> Vec<Submission> {
        submissions
            .iter()
            .filter(|s| self.matches(s))
            .cloned()
            .collect()
    }
}

/// Leaderboard listing: approved and rated, highest rating first, oldest
/// entry winning ties so the order is stable.
pub fn leaderboard(submissions: &[Submission], kind: Option<SubmissionKind>) -> Vec<Submission> {
    let mut ranked: Vec<Submission> = submissions
        .iter()
        .filter(|s| s.is_approved() && s.rating.is_rated())
        .filter(|s| kind.is_none_or(|k| s.kind == k))
        .cloned()
        .collect();
    ranked.sort_by(|a, b| {
        b.rating
            .cmp(&a.rating)
            .then_with(|| a.entered_at.cmp(&b.entered_at))
    });
    ranked
}

/// The showcase submission: the approved entry carrying the featured flag.
pub fn featured(submissions: &[Submission]) -> Option<Submission> {
    submissions
        .iter()
        .find(|s| s.featured && s.is_approved())
        .cloned()
}

/// Aggregated "best of" views. All categories operate over approved
/// submissions only; per-language best omits languages with no approved
/// entries rather than substituting a placeholder.
#[derive(Debug, Clone)]
pub struct BestOf {
    pub most_liked: Vec<Submission>,
    pub most_viewed: Vec<Submission>,
    pub most_discussed: Vec<Submission>,
    pub best_per_language: Vec<(Language, Submission)>,
}

const BEST_OF_TOP_N: usize = 3;

pub fn best_of(submissions: &[Submission], languages: &[Language]) -> BestOf {
    let approved: Vec<&Submission> = submissions.iter().filter(|s| s.is_approved()).collect();

    let top_by = |key: fn(&Submission) -> u64| -> Vec<Submission> {
        let mut ranked = approved.clone();
        ranked.sort_by(|a, b| {
            key(b)
                .cmp(&key(a))
                .then_with(|| a.entered_at.cmp(&b.entered_at))
        });
        ranked.into_iter().take(BEST_OF_TOP_N).cloned().collect()
    };

    let best_per_language = languages
        .iter()
        .filter_map(|lang| {
            approved
                .iter()
                .filter(|s| s.language == *lang)
                .max_by(|a, b| {
                    a.rating
                        .cmp(&b.rating)
                        .then_with(|| b.entered_at.cmp(&a.entered_at))
                })
                .map(|s| (*lang, (*s).clone()))
        })
        .collect();

    BestOf {
        most_liked: top_by(|s| u64::from(s.likes)),
        most_viewed: top_by(|s| u64::from(s.views)),
        most_discussed: top_by(|s| s.comments.len() as u64),
        best_per_language,
    }
}

/// Opening verses in display order: most recent festival day first, then
/// the fixed declared language order within a day.
pub fn verse_schedule(verses: &[OpeningVerse]) -> Vec<OpeningVerse> {
    let mut ordered = verses.to_vec();
    ordered.sort_by(|a, b| {
        b.day
            .cmp(&a.day)
            .then_with(|| a.language.order_index().cmp(&b.language.order_index()))
    });
    ordered
}

/// The inspiration list on the submit page: verses in the chosen language,
/// most recent day first.
pub fn verses_for_language(verses: &[OpeningVerse], language: Language) -> Vec<OpeningVerse> {
    let mut matching: Vec<OpeningVerse> = verses
        .iter()
        .filter(|v| v.language == language)
        .cloned()
        .collect();
    matching.sort_by(|a, b| b.day.cmp(&a.day));
    matching
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use domains::{AuthorRef, Rating, SubmissionId, SubmissionMethod, VerseId};

    fn sub(id: &str, approval: ApprovalState, language: Language) -> Submission {
        Submission {
            id: SubmissionId::from(id),
            kind: SubmissionKind::Full,
            method: SubmissionMethod::Manual,
            content: format!("poem {id}"),
            file_ref: None,
            audio_ref: None,
            author: AuthorRef {
                id: domains::IdentityId::from("a1"),
                name: "Emily Chen".to_string(),
            },
            language,
            entered_at: Utc.with_ymd_and_hms(2025, 4, 1, 8, 0, 0).unwrap(),
            inspired_by: None,
            approval,
            rating: Rating::NOT_RATED,
            checking: CheckingStatus::ArazPending,
            araz_content: None,
            featured: false,
            likes: 0,
            views: 0,
            comments: vec![],
        }
    }

    #[test]
    fn public_query_admits_approved_only() {
        let subs = vec![
            sub("1", ApprovalState::Approved, Language::English),
            sub("2", ApprovalState::Pending, Language::English),
            sub("3", ApprovalState::Rejected, Language::English),
        ];
        let visible = SubmissionQuery::public().apply(&subs);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, SubmissionId::from("1"));
    }

    #[test]
    fn rejected_excluded_even_from_all() {
        let subs = vec![
            sub("1", ApprovalState::Approved, Language::English),
            sub("2", ApprovalState::Rejected, Language::English),
        ];
        let visible = SubmissionQuery::admin_review()
            .with_status(StatusFilter::All)
            .apply(&subs);
        assert_eq!(visible.len(), 1);
    }

    #[test]
    fn predicates_commute() {
        let subs = vec![
            sub("1", ApprovalState::Approved, Language::English),
            sub("2", ApprovalState::Approved, Language::Arabic),
            sub("3", ApprovalState::Pending, Language::Arabic),
        ];
        // approved then language
        let lang_only = SubmissionQuery::public().with_language(Language::Arabic);
        let step_wise: Vec<Submission> = lang_only.apply(&SubmissionQuery::public().apply(&subs));
        // both at once
        let conjoint = lang_only.apply(&subs);
        assert_eq!(step_wise, conjoint);
        assert_eq!(conjoint.len(), 1);
        assert_eq!(conjoint[0].id, SubmissionId::from("2"));
    }

    #[test]
    fn search_is_case_insensitive_over_content_and_author() {
        let mut a = sub("1", ApprovalState::Approved, Language::English);
        a.content = "Whispers of Dawn".to_string();
        let b = sub("2", ApprovalState::Approved, Language::English);

        let by_content = SubmissionQuery::public().with_search("wHISpers");
        assert_eq!(by_content.apply(&[a.clone(), b.clone()]).len(), 1);

        let by_author = SubmissionQuery::public().with_search("emily");
        assert_eq!(by_author.apply(&[a.clone(), b.clone()]).len(), 2);

        let empty = SubmissionQuery::public().with_search("");
        assert_eq!(empty.apply(&[a, b]).len(), 2);
    }

    #[test]
    fn mine_includes_own_pending_work() {
        let mut pending = sub("1", ApprovalState::Pending, Language::English);
        pending.author.id = domains::IdentityId::from("me");
        let other = sub("2", ApprovalState::Approved, Language::English);

        let mine = SubmissionQuery::mine(domains::IdentityId::from("me"));
        let visible = mine.apply(&[pending, other]);
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].id, SubmissionId::from("1"));
    }

    #[test]
    fn leaderboard_sorts_by_rating_then_oldest() {
        let mut first = sub("1", ApprovalState::Approved, Language::English);
        first.rating = Rating::from_stars(4.5).unwrap();
        first.entered_at = Utc.with_ymd_and_hms(2025, 4, 2, 0, 0, 0).unwrap();
        let mut second = sub("2", ApprovalState::Approved, Language::English);
        second.rating = Rating::from_stars(4.5).unwrap();
        second.entered_at = Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap();
        let mut third = sub("3", ApprovalState::Approved, Language::English);
        third.rating = Rating::from_stars(5.0).unwrap();
        let unrated = sub("4", ApprovalState::Approved, Language::English);
        let pending = sub("5", ApprovalState::Pending, Language::English);

        let ranked = leaderboard(&[first, second, third, unrated, pending], None);
        let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["3", "2", "1"]);
    }

    #[test]
    fn best_per_language_omits_empty_languages() {
        let mut en = sub("1", ApprovalState::Approved, Language::English);
        en.rating = Rating::from_stars(3.0).unwrap();
        let ar_pending = sub("2", ApprovalState::Pending, Language::Arabic);

        let best = best_of(
            &[en, ar_pending],
            &[Language::English, Language::Arabic, Language::Urdu],
        );
        assert_eq!(best.best_per_language.len(), 1);
        assert_eq!(best.best_per_language[0].0, Language::English);
    }

    #[test]
    fn best_of_never_includes_pending() {
        let mut liked_but_pending = sub("1", ApprovalState::Pending, Language::English);
        liked_but_pending.likes = 99;
        let approved = sub("2", ApprovalState::Approved, Language::English);

        let best = best_of(&[liked_but_pending, approved], &Language::DECLARED_ORDER);
        assert_eq!(best.most_liked.len(), 1);
        assert_eq!(best.most_liked[0].id, SubmissionId::from("2"));
    }

    #[test]
    fn verse_schedule_day_desc_then_declared_language_order() {
        let verse = |id: &str, day: u8, language: Language| OpeningVerse {
            id: VerseId::from(id),
            text: "line".to_string(),
            attributed_to: "poet".to_string(),
            language,
            day,
            published_on: Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap(),
        };
        let ordered = verse_schedule(&[
            verse("ov1", 1, Language::English),
            verse("ov5", 2, Language::Arabic),
            verse("ov4", 2, Language::English),
            verse("ov3", 1, Language::Urdu),
        ]);
        let ids: Vec<&str> = ordered.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, ["ov4", "ov5", "ov1", "ov3"]);
    }
}
