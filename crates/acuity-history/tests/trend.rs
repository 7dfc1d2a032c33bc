use acuity_core::field::FieldValue;
use acuity_core::result::EvaluationResult;
use acuity_core::rules::Band;
use acuity_history::TrendStore;
use jiff::Timestamp;

fn result(rule_set: &str, score: f64, label: &str) -> EvaluationResult {
    EvaluationResult {
        rule_set: rule_set.to_string(),
        score,
        band: Band {
            lower: 0.0,
            upper: 27.0,
            label: label.to_string(),
            guidance: String::new(),
            actions: vec![],
        },
        echoes: [("item".to_string(), FieldValue::Number(score))]
            .into_iter()
            .collect(),
    }
}

fn at(time: &str) -> Timestamp {
    time.parse().unwrap()
}

#[test]
fn record_appends_in_order() {
    let mut store = TrendStore::new();
    store.record(&result("phq9", 14.0, "Moderate"), at("2025-01-06T09:00:00Z"));
    store.record(&result("phq9", 9.0, "Mild"), at("2025-02-03T09:30:00Z"));

    let history = store.history("phq9");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].score, 14.0);
    assert_eq!(history[1].score, 9.0);
    assert_eq!(history[1].band_label, "Mild");
}

#[test]
fn entries_are_scoped_by_rule_set() {
    let mut store = TrendStore::new();
    store.record(&result("phq9", 12.0, "Moderate"), at("2025-01-06T09:00:00Z"));
    store.record(&result("meld", 18.0, "Moderate"), at("2025-01-06T09:05:00Z"));

    assert_eq!(store.history("phq9").len(), 1);
    assert_eq!(store.history("meld").len(), 1);
    assert!(store.history("gcs").is_empty());
}

#[test]
fn latest_returns_the_most_recent_record() {
    let mut store = TrendStore::new();
    assert!(store.latest("phq9").is_none());

    store.record(&result("phq9", 14.0, "Moderate"), at("2025-01-06T09:00:00Z"));
    store.record(&result("phq9", 9.0, "Mild"), at("2025-02-03T09:30:00Z"));
    assert_eq!(store.latest("phq9").unwrap().score, 9.0);
}

#[test]
fn record_ids_are_distinct() {
    let mut store = TrendStore::new();
    let first = store.record(&result("phq9", 14.0, "Moderate"), at("2025-01-06T09:00:00Z"));
    let second = store.record(&result("phq9", 14.0, "Moderate"), at("2025-01-06T09:00:00Z"));
    assert_ne!(first, second);
}

#[test]
fn clear_drops_one_rule_set_only() {
    let mut store = TrendStore::new();
    store.record(&result("phq9", 12.0, "Moderate"), at("2025-01-06T09:00:00Z"));
    store.record(&result("meld", 18.0, "Moderate"), at("2025-01-06T09:05:00Z"));

    store.clear("phq9");
    assert!(store.history("phq9").is_empty());
    assert_eq!(store.history("meld").len(), 1);
}

#[test]
fn json_round_trip_preserves_entries() {
    let mut store = TrendStore::new();
    store.record(&result("phq9", 14.0, "Moderate"), at("2025-01-06T09:00:00Z"));
    store.record(&result("phq9", 9.0, "Mild"), at("2025-02-03T09:30:00Z"));

    let json = store.to_json().unwrap();
    let restored = TrendStore::from_json(&json).unwrap();
    let history = restored.history("phq9");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].band_label, "Moderate");
    assert_eq!(history[1].recorded_at, at("2025-02-03T09:30:00Z"));
}
