//! Wire-format checks on the domain models: the JSON shape is the read
//! contract an external data source has to satisfy.

use domains::{ApprovalState, CheckingStatus, Language, Rating, Submission};
use integration_tests::{sample_submissions, sample_verses};
use serde_json::Value;

#[test]
fn submission_json_shape() {
    let subs = sample_submissions();
    let whispers = subs.iter().find(|s| s.id.as_str() == "1").unwrap();
    let json: Value = serde_json::to_value(whispers).unwrap();

    assert_eq!(json["id"], "1");
    assert_eq!(json["kind"], "full");
    assert_eq!(json["method"], "manual");
    assert_eq!(json["language"], "English");
    assert_eq!(json["approval"], "approved");
    assert_eq!(json["checking"], "araz_pending");
    assert_eq!(json["rating"], 4.5);
    assert_eq!(json["inspired_by"], "ov1");
    assert_eq!(json["author"]["name"], "Emily Chen");
    assert_eq!(json["comments"].as_array().unwrap().len(), 2);

    let back: Submission = serde_json::from_value(json).unwrap();
    assert_eq!(&back, whispers);
}

#[test]
fn verse_json_shape() {
    let verses = sample_verses();
    let ov2 = verses.iter().find(|v| v.id.as_str() == "ov2").unwrap();
    let json: Value = serde_json::to_value(ov2).unwrap();
    assert_eq!(json["language"], "Arabic");
    assert_eq!(json["day"], 1);
    assert_eq!(json["attributed_to"], "جبران خليل جبران");
}

#[test]
fn enum_wire_names_match_the_read_contract() {
    assert_eq!(
        serde_json::to_value(ApprovalState::Pending).unwrap(),
        Value::from("pending")
    );
    assert_eq!(
        serde_json::to_value(CheckingStatus::ArazDone).unwrap(),
        Value::from("araz_done")
    );
    assert_eq!(
        serde_json::to_value(Language::LisanAlDawah).unwrap(),
        Value::from("Lisan al-Dawah")
    );
}

#[test]
fn unrated_serializes_as_zero() {
    assert_eq!(serde_json::to_value(Rating::NOT_RATED).unwrap(), 0.0);
    let parsed: Rating = serde_json::from_value(Value::from(0.0)).unwrap();
    assert!(!parsed.is_rated());
    assert!(serde_json::from_value::<Rating>(Value::from(2.3)).is_err());
}

#[test]
fn rtl_languages_are_flagged() {
    assert!(Language::Arabic.is_rtl());
    assert!(Language::Urdu.is_rtl());
    assert!(Language::LisanAlDawah.is_rtl());
    assert!(!Language::English.is_rtl());
    assert!(!Language::French.is_rtl());
}
