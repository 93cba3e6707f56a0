//! Tests for slot normalization and intent candidates.

use huginn::{IntentCandidate, Priority, Slots};

fn slots(priority: &str, due_date: Option<&str>) -> Slots {
    Slots {
        priority: priority.to_string(),
        due_date: due_date.map(str::to_string),
        ..Slots::new("buy milk")
    }
}

#[test]
fn test_priority_collapses_to_known_levels() {
    let cases = [
        ("high", "high"),
        ("HIGH", "high"),
        ("Low", "low"),
        ("normal", "normal"),
        ("urgent", "normal"),
        ("", "normal"),
        (" low ", "normal"),
    ];
    for (input, expected) in cases {
        let mut s = slots(input, None);
        s.normalize();
        assert_eq!(s.priority, expected, "input {input:?}");
    }
}

#[test]
fn test_malformed_due_date_is_cleared() {
    for bad in ["tomorrow", "2025/01/31", "25-01-31", "2025-1-31", "2025-01-31 09:00"] {
        let mut s = slots("normal", Some(bad));
        s.normalize();
        assert_eq!(s.due_date, None, "input {bad:?}");
    }
}

#[test]
fn test_well_formed_due_date_is_kept() {
    let mut s = slots("high", Some("2025-03-14"));
    s.normalize();
    assert_eq!(s.due_date.as_deref(), Some("2025-03-14"));
    assert_eq!(s.priority_level(), Priority::High);
}

#[test]
fn test_normalize_is_idempotent() {
    let mut s = slots("HiGh", Some("nope"));
    let once = s.normalize().clone();
    let twice = s.normalize().clone();
    assert_eq!(once, twice);
}

#[test]
fn test_slots_defaults_from_json() {
    let s: Slots = serde_json::from_str(r#"{"title": "call mom"}"#).unwrap();

    assert_eq!(s.title, "call mom");
    assert_eq!(s.priority, "normal");
    assert_eq!(s.locale, "zh");
    assert!(s.due_date.is_none());
    assert!(s.project_id.is_none());
}

#[test]
fn test_intent_candidate_serializes() {
    let candidate = IntentCandidate {
        intent: "create_todo".to_string(),
        confidence: 0.82,
        slots: Slots::new("buy milk"),
        raw_text: "remind me to buy milk".to_string(),
    };

    let json = serde_json::to_value(&candidate).unwrap();
    assert_eq!(json["intent"], "create_todo");
    assert_eq!(json["slots"]["title"], "buy milk");
    assert_eq!(json["slots"]["priority"], "normal");

    let back: IntentCandidate = serde_json::from_value(json).unwrap();
    assert_eq!(back, candidate);
}
