//! Shared fixtures for the integration suites.
//!
//! Reproduces the shape of the festival's sample data: five submissions
//! (three approved and rated, two pending), six opening verses over the
//! first two festival days, and the two seeded demo accounts. Tests get
//! a fully wired [`TestEnv`] with in-memory adapters and a fixed clock.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};

use auth_adapters::{hash_password, ArgonCredentialStore, SeedAccount};
use domains::{
    ApprovalState, AuthorRef, CheckingStatus, Clock, Comment, CommentId, Identity, IdentityId,
    Language, OpeningVerse, Rating, Role, Submission, SubmissionId, SubmissionKind,
    SubmissionMethod, VerseId,
};
use services::{SessionService, VerseService, WorkflowService};
use storage_adapters::{FileSessionStorage, MemorySubmissionRepo, MemoryVerseRepo};

pub const ADMIN_EMAIL: &str = "admin@poetry.com";
pub const USER_EMAIL: &str = "user@poetry.com";
pub const DEMO_PASSWORD: &str = "password123";

/// Deterministic time source; advances only when told to.
pub struct FixedClock {
    now: Mutex<DateTime<Utc>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn start_of_festival() -> Self {
        Self::at(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap())
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

pub fn admin_identity() -> Identity {
    Identity {
        id: IdentityId::from("1"),
        name: "Admin User".to_string(),
        email: ADMIN_EMAIL.to_string(),
        role: Role::Admin,
    }
}

pub fn user_identity() -> Identity {
    Identity {
        id: IdentityId::from("2"),
        name: "Regular User".to_string(),
        email: USER_EMAIL.to_string(),
        role: Role::User,
    }
}

/// Festival day `n` maps to April `n`, 2025.
fn entered(day: u8, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 4, u32::from(day), hour, 0, 0)
        .unwrap()
}

/// A submission with the lifecycle defaults; tweak fields as needed.
pub fn submission(id: &str, author_id: &str, author_name: &str) -> Submission {
    Submission {
        id: SubmissionId::from(id),
        kind: SubmissionKind::Full,
        method: SubmissionMethod::Manual,
        content: "a poem long enough to clear the minimum".to_string(),
        file_ref: None,
        audio_ref: None,
        author: AuthorRef {
            id: IdentityId::from(author_id),
            name: author_name.to_string(),
        },
        language: Language::English,
        entered_at: entered(1, 8),
        inspired_by: None,
        approval: ApprovalState::Pending,
        rating: Rating::NOT_RATED,
        checking: CheckingStatus::ArazPending,
        araz_content: None,
        featured: false,
        likes: 0,
        views: 0,
        comments: vec![],
    }
}

fn comment(id: &str, author_id: &str, author_name: &str, text: &str) -> Comment {
    Comment {
        id: CommentId::from(id),
        text: text.to_string(),
        author: AuthorRef {
            id: IdentityId::from(author_id),
            name: author_name.to_string(),
        },
        posted_at: entered(1, 10),
    }
}

/// The five sample submissions: "1"–"3" approved and rated, "4"–"5" pending.
pub fn sample_submissions() -> Vec<Submission> {
    let mut whispers = submission("1", "3", "Emily Chen");
    whispers.content = "The morning light breaks through the clouds".to_string();
    whispers.inspired_by = Some(VerseId::from("ov1"));
    whispers.approval = ApprovalState::Approved;
    whispers.rating = Rating::from_stars(4.5).unwrap();
    whispers.likes = 42;
    whispers.views = 128;
    whispers.comments = vec![
        comment("c1", "6", "Michael Johnson", "Beautiful imagery!"),
        comment("c2", "7", "Sarah Williams", "Brings back peaceful mornings."),
    ];

    let mut night = submission("2", "4", "Ahmed Hassan");
    night.content = "في صمت الليل أجد نفسي".to_string();
    night.language = Language::Arabic;
    night.kind = SubmissionKind::Individual;
    night.entered_at = entered(2, 19);
    night.approval = ApprovalState::Approved;
    night.rating = Rating::from_stars(4.0).unwrap();
    night.likes = 38;
    night.views = 95;
    night.comments = vec![comment("c3", "8", "Layla Mahmoud", "رائع جداً")];

    let mut dusk = submission("3", "5", "Farah Khan");
    dusk.content = "شام کی روشنی میں ڈوبا ہوا منظر".to_string();
    dusk.language = Language::Urdu;
    dusk.entered_at = entered(3, 18);
    dusk.approval = ApprovalState::Approved;
    dusk.rating = Rating::from_stars(3.5).unwrap();
    dusk.likes = 27;
    dusk.views = 73;

    let mut urban = submission("4", "6", "David Wilson");
    urban.content = "Steel and glass reach for the sky".to_string();
    urban.entered_at = entered(4, 14);

    let mut digital = submission("5", "7", "Alex Rivera");
    digital.content = "In the realm of ones and zeros".to_string();
    digital.kind = SubmissionKind::Individual;
    digital.entered_at = entered(5, 9);

    vec![whispers, night, dusk, urban, digital]
}

/// Six opening verses: English/Arabic/Urdu over festival days 1 and 2.
pub fn sample_verses() -> Vec<OpeningVerse> {
    let verse = |id: &str, text: &str, poet: &str, language, day| OpeningVerse {
        id: VerseId::from(id),
        text: text.to_string(),
        attributed_to: poet.to_string(),
        language,
        day,
        published_on: entered(day, 0),
    };
    vec![
        verse(
            "ov1",
            "Time is but a river flowing in dreams",
            "Henry David Thoreau",
            Language::English,
            1,
        ),
        verse(
            "ov2",
            "الوقت كنهر يتدفق في الأحلام",
            "جبران خليل جبران",
            Language::Arabic,
            1,
        ),
        verse(
            "ov3",
            "وقت خوابوں میں بہنے والی ندی کی طرح ہے",
            "علامہ اقبال",
            Language::Urdu,
            1,
        ),
        verse(
            "ov4",
            "The stars are the street lights of eternity",
            "Emily Dickinson",
            Language::English,
            2,
        ),
        verse(
            "ov5",
            "النجوم هي مصابيح أنوار الأبدية",
            "نزار قباني",
            Language::Arabic,
            2,
        ),
        verse(
            "ov6",
            "ستارے ابدیت کی سڑک کی روشنیاں ہیں",
            "فیض احمد فیض",
            Language::Urdu,
            2,
        ),
    ]
}

/// Everything a scenario test needs, wired to in-memory adapters.
pub struct TestEnv {
    pub submissions: Arc<MemorySubmissionRepo>,
    pub verses: Arc<MemoryVerseRepo>,
    pub clock: Arc<FixedClock>,
    pub session: SessionService,
    pub workflow: WorkflowService,
    pub verse_service: VerseService,
    // Holds the session-storage directory alive for the test's duration.
    _storage_dir: tempfile::TempDir,
}

impl TestEnv {
    pub async fn seeded() -> Self {
        let submissions = Arc::new(MemorySubmissionRepo::new());
        submissions.seed(sample_submissions()).await;
        let verses = Arc::new(MemoryVerseRepo::new());
        verses.seed(sample_verses());
        let clock = Arc::new(FixedClock::start_of_festival());

        let credentials = Arc::new(ArgonCredentialStore::from_seed([
            SeedAccount {
                identity: admin_identity(),
                password_hash: hash_password(DEMO_PASSWORD).unwrap(),
            },
            SeedAccount {
                identity: user_identity(),
                password_hash: hash_password(DEMO_PASSWORD).unwrap(),
            },
        ]));
        let storage_dir = tempfile::tempdir().unwrap();
        let storage = Arc::new(FileSessionStorage::new(storage_dir.path()));

        let session = SessionService::new(credentials, storage);
        let workflow =
            WorkflowService::new(submissions.clone(), verses.clone(), clock.clone());
        let verse_service = VerseService::new(verses.clone(), submissions.clone(), clock.clone());

        Self {
            submissions,
            verses,
            clock,
            session,
            workflow,
            verse_service,
            _storage_dir: storage_dir,
        }
    }

    pub async fn login_admin(&self) -> Identity {
        self.session.login(ADMIN_EMAIL, DEMO_PASSWORD).await.unwrap()
    }

    pub async fn login_user(&self) -> Identity {
        self.session.login(USER_EMAIL, DEMO_PASSWORD).await.unwrap()
    }
}
