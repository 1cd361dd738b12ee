//! View-level filtering and ranking over the sample collection.

use domains::{CheckingStatus, IdentityId, Language, SubmissionId, SubmissionKind, SubmissionRepo};
use integration_tests::{sample_submissions, sample_verses, TestEnv};
use services::{query, StatusFilter, SubmissionQuery};

#[test]
fn public_view_hides_pending_work() {
    let subs = sample_submissions();
    let visible = SubmissionQuery::public().apply(&subs);
    let ids: Vec<&str> = visible.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);
}

#[test]
fn admin_review_defaults_to_pending_and_widens_to_all() {
    let subs = sample_submissions();
    let pending = SubmissionQuery::admin_review().apply(&subs);
    assert_eq!(pending.len(), 2);

    let all = SubmissionQuery::admin_review()
        .with_status(StatusFilter::All)
        .apply(&subs);
    assert_eq!(all.len(), 5);
}

#[test]
fn filters_conjoin_and_commute() {
    let subs = sample_submissions();
    let by_lang = SubmissionQuery::public().with_language(Language::Arabic);

    let conjoint = by_lang.apply(&subs);
    let sequential = by_lang.apply(&SubmissionQuery::public().apply(&subs));
    assert_eq!(conjoint, sequential);
    assert_eq!(conjoint.len(), 1);
    assert_eq!(conjoint[0].id, SubmissionId::from("2"));
}

#[test]
fn search_covers_content_and_author_name() {
    let subs = sample_submissions();

    let by_content = SubmissionQuery::public().with_search("MORNING").apply(&subs);
    assert_eq!(by_content.len(), 1);
    assert_eq!(by_content[0].id, SubmissionId::from("1"));

    let by_author = SubmissionQuery::public().with_search("ahmed").apply(&subs);
    assert_eq!(by_author.len(), 1);
    assert_eq!(by_author[0].id, SubmissionId::from("2"));

    let nothing = SubmissionQuery::public().with_search("zzzz").apply(&subs);
    assert!(nothing.is_empty());
}

#[test]
fn my_submissions_shows_own_pending_entries() {
    let subs = sample_submissions();
    let mine = SubmissionQuery::mine(IdentityId::from("6")).apply(&subs);
    let ids: Vec<&str> = mine.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["4"]);
}

#[test]
fn checking_view_narrows_by_araz_status() {
    let mut subs = sample_submissions();
    subs[0].checking = CheckingStatus::ArazDone;
    subs[0].araz_content = Some("checked text".to_string());

    let done = SubmissionQuery::checking()
        .with_checking(CheckingStatus::ArazDone)
        .apply(&subs);
    let ids: Vec<&str> = done.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1"]);

    // pending entries stay out of the checking view regardless of status
    let awaiting = SubmissionQuery::checking()
        .with_checking(CheckingStatus::ArazPending)
        .apply(&subs);
    assert!(awaiting.iter().all(|s| s.is_approved()));
}

#[test]
fn leaderboard_ranks_rated_approved_entries() {
    let subs = sample_submissions();
    let ranked = query::leaderboard(&subs, None);
    let ids: Vec<&str> = ranked.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3"]);

    let individual = query::leaderboard(&subs, Some(SubmissionKind::Individual));
    let ids: Vec<&str> = individual.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["2"]);
}

#[test]
fn best_of_is_approved_only_and_per_language_omits_gaps() {
    let subs = sample_submissions();
    let best = query::best_of(&subs, &Language::DECLARED_ORDER);

    let liked: Vec<&str> = best.most_liked.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(liked, ["1", "2", "3"]);
    let discussed: Vec<&str> = best.most_discussed.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(discussed[0], "1");

    let langs: Vec<Language> = best.best_per_language.iter().map(|(l, _)| *l).collect();
    assert_eq!(langs, [Language::English, Language::Arabic, Language::Urdu]);
    assert_eq!(best.best_per_language[0].1.id, SubmissionId::from("1"));
}

#[test]
fn verse_schedule_puts_the_latest_day_first() {
    let verses = sample_verses();
    let ordered = query::verse_schedule(&verses);
    let ids: Vec<&str> = ordered.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["ov4", "ov5", "ov6", "ov1", "ov2", "ov3"]);

    let english = query::verses_for_language(&verses, Language::English);
    let ids: Vec<&str> = english.iter().map(|v| v.id.as_str()).collect();
    assert_eq!(ids, ["ov4", "ov1"]);
}

#[tokio::test]
async fn approving_extends_the_public_view() {
    let env = TestEnv::seeded().await;
    env.login_admin().await;

    let before = SubmissionQuery::public().apply(&env.submissions.list().await.unwrap());
    env.workflow
        .approve(&env.session, &SubmissionId::from("4"))
        .await
        .unwrap();
    let after = SubmissionQuery::public().apply(&env.submissions.list().await.unwrap());
    assert_eq!(after.len(), before.len() + 1);
}

#[tokio::test]
async fn featured_lookup_ignores_unapproved_flags() {
    let env = TestEnv::seeded().await;
    env.login_admin().await;

    assert!(query::featured(&env.submissions.list().await.unwrap()).is_none());
    env.workflow
        .feature(&env.session, &SubmissionId::from("2"))
        .await
        .unwrap();
    let showcased = query::featured(&env.submissions.list().await.unwrap()).unwrap();
    assert_eq!(showcased.id, SubmissionId::from("2"));
}
