//! Sample festival data for the demo walkthrough. A real deployment
//! gets its collections from whatever data source backs the repository
//! ports; this stands in for it.

use anyhow::Context;
use chrono::{DateTime, TimeZone, Utc};

use domains::{
    ApprovalState, AuthorRef, CheckingStatus, IdentityId, Language, OpeningVerse, Rating,
    Submission, SubmissionId, SubmissionKind, SubmissionMethod, VerseId,
};

/// Festival day `n` maps to April `n`, 2025.
fn on_day(day: u8, hour: u32, minute: u32) -> anyhow::Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(2025, 4, u32::from(day), hour, minute, 0)
        .single()
        .with_context(|| format!("invalid festival date for day {day}"))
}

pub fn verses() -> anyhow::Result<Vec<OpeningVerse>> {
    Ok(vec![
        OpeningVerse {
            id: VerseId::from("ov1"),
            text: "Time is but a river flowing in dreams".to_string(),
            attributed_to: "Henry David Thoreau".to_string(),
            language: Language::English,
            day: 1,
            published_on: on_day(1, 0, 0)?,
        },
        OpeningVerse {
            id: VerseId::from("ov2"),
            text: "الوقت كنهر يتدفق في الأحلام".to_string(),
            attributed_to: "جبران خليل جبران".to_string(),
            language: Language::Arabic,
            day: 1,
            published_on: on_day(1, 0, 0)?,
        },
        OpeningVerse {
            id: VerseId::from("ov4"),
            text: "The stars are the street lights of eternity".to_string(),
            attributed_to: "Emily Dickinson".to_string(),
            language: Language::English,
            day: 2,
            published_on: on_day(2, 0, 0)?,
        },
    ])
}

pub fn submissions() -> anyhow::Result<Vec<Submission>> {
    let opening_day = on_day(1, 8, 30)?;
    let base = |id: &str, author_id: &str, author: &str| Submission {
        id: SubmissionId::from(id),
        kind: SubmissionKind::Full,
        method: SubmissionMethod::Manual,
        content: String::new(),
        file_ref: None,
        audio_ref: None,
        author: AuthorRef {
            id: IdentityId::from(author_id),
            name: author.to_string(),
        },
        language: Language::English,
        entered_at: opening_day,
        inspired_by: None,
        approval: ApprovalState::Pending,
        rating: Rating::NOT_RATED,
        checking: CheckingStatus::ArazPending,
        araz_content: None,
        featured: false,
        likes: 0,
        views: 0,
        comments: vec![],
    };

    let mut whispers = base("1", "3", "Emily Chen");
    whispers.content = "The morning light breaks through the clouds,\n\
                        A symphony of colors, bold and proud."
        .to_string();
    whispers.inspired_by = Some(VerseId::from("ov1"));
    whispers.approval = ApprovalState::Approved;
    whispers.rating = Rating::from_stars(4.5)?;
    whispers.likes = 42;
    whispers.views = 128;

    let mut layl = base("2", "4", "Ahmed Hassan");
    layl.content = "في صمت الليل أجد نفسي\nوحيداً مع أفكاري التي لا تنام".to_string();
    layl.language = Language::Arabic;
    layl.inspired_by = Some(VerseId::from("ov2"));
    layl.approval = ApprovalState::Approved;
    layl.kind = SubmissionKind::Individual;
    layl.entered_at = on_day(2, 19, 45)?;
    layl.likes = 38;
    layl.views = 95;

    let mut urban = base("4", "5", "David Wilson");
    urban.content = "Steel and glass reach for the sky,\n\
                     Where dreams and ambitions amplify."
        .to_string();
    urban.entered_at = on_day(4, 14, 10)?;

    Ok(vec![whispers, layl, urban])
}
