use acuity_core::field::{FieldKind, FieldSpec, FieldValue, RawValues};
use acuity_core::formula::Expr;
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};
use acuity_engine::error::{EvalError, FieldError};
use acuity_engine::evaluate;
use serde_json::{Value, json};

fn finding(name: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: name.to_string(),
        kind: FieldKind::Boolean,
        required: true,
        unit: None,
        description: None,
    }
}

fn one_point(field: &str) -> PointAllocation {
    PointAllocation {
        field: field.to_string(),
        entries: vec![
            PointEntry {
                when: Criterion::Flag { set: true },
                points: 1.0,
            },
            PointEntry {
                when: Criterion::Flag { set: false },
                points: 0.0,
            },
        ],
    }
}

fn band(lower: f64, upper: f64, label: &str) -> Band {
    Band {
        lower,
        upper,
        label: label.to_string(),
        guidance: String::new(),
        actions: vec![],
    }
}

fn raw(pairs: Vec<(&str, Value)>) -> RawValues {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

/// Three one-point findings banded into low (0-1) and high (2-3) risk.
fn sepsis_screen() -> RuleSet {
    RuleSet {
        id: "screen".to_string(),
        name: "Screen".to_string(),
        description: None,
        reference: None,
        fields: vec![
            finding("respiratory_rate"),
            finding("systolic_bp"),
            finding("mental_status"),
        ],
        scorer: Scorer::PointTable {
            allocations: vec![
                one_point("respiratory_rate"),
                one_point("systolic_bp"),
                one_point("mental_status"),
            ],
        },
        score_range: ScoreRange {
            min: 0.0,
            max: 3.0,
            step: Some(1.0),
        },
        bands: vec![band(0.0, 1.0, "Low Risk"), band(2.0, 3.0, "High Risk")],
    }
}

fn electrolyte_gap() -> RuleSet {
    RuleSet {
        id: "gap".to_string(),
        name: "Gap".to_string(),
        description: None,
        reference: None,
        fields: ["sodium", "chloride", "bicarbonate"]
            .iter()
            .map(|name| FieldSpec {
                name: name.to_string(),
                label: name.to_string(),
                kind: FieldKind::Numeric {
                    min: 1.0,
                    max: 250.0,
                },
                required: true,
                unit: Some("mmol/L".to_string()),
                description: None,
            })
            .collect(),
        scorer: Scorer::Formula {
            expr: Expr::round(
                Expr::sub(
                    Expr::field("sodium"),
                    Expr::add(vec![Expr::field("chloride"), Expr::field("bicarbonate")]),
                ),
                1,
            ),
        },
        score_range: ScoreRange {
            min: -499.0,
            max: 248.0,
            step: Some(0.1),
        },
        bands: vec![
            band(-499.0, 7.9, "Low"),
            band(8.0, 12.0, "Normal"),
            band(12.1, 248.0, "Elevated"),
        ],
    }
}

#[test]
fn two_findings_score_high_risk() {
    let result = evaluate(
        &sepsis_screen(),
        &raw(vec![
            ("respiratory_rate", json!(true)),
            ("systolic_bp", json!(true)),
            ("mental_status", json!(false)),
        ]),
    )
    .unwrap();
    assert_eq!(result.score, 2.0);
    assert_eq!(result.band.label, "High Risk");
}

#[test]
fn no_findings_score_low_risk() {
    let result = evaluate(
        &sepsis_screen(),
        &raw(vec![
            ("respiratory_rate", json!(false)),
            ("systolic_bp", json!(false)),
            ("mental_status", json!(false)),
        ]),
    )
    .unwrap();
    assert_eq!(result.score, 0.0);
    assert_eq!(result.band.label, "Low Risk");
}

#[test]
fn formula_rule_set_end_to_end() {
    let result = evaluate(
        &electrolyte_gap(),
        &raw(vec![
            ("sodium", json!(140)),
            ("chloride", json!(100)),
            ("bicarbonate", json!(24)),
        ]),
    )
    .unwrap();
    assert_eq!(result.score, 16.0);
    assert_eq!(result.band.label, "Elevated");
}

#[test]
fn echoes_carry_the_coerced_values() {
    let result = evaluate(
        &electrolyte_gap(),
        &raw(vec![
            ("sodium", json!("140")),
            ("chloride", json!(100)),
            ("bicarbonate", json!(24)),
        ]),
    )
    .unwrap();
    assert_eq!(result.echoes["sodium"], FieldValue::Number(140.0));
    assert_eq!(result.rule_set, "gap");
}

#[test]
fn missing_required_field_yields_no_score() {
    let error = evaluate(
        &sepsis_screen(),
        &raw(vec![
            ("respiratory_rate", json!(true)),
            ("systolic_bp", json!(true)),
        ]),
    )
    .unwrap_err();
    assert_eq!(
        error,
        EvalError::Invalid {
            fields: vec![FieldError::MissingField {
                field: "mental_status".to_string()
            }]
        }
    );
}

#[test]
fn every_failing_field_reported_together() {
    let error = evaluate(
        &electrolyte_gap(),
        &raw(vec![("sodium", json!("salty"))]),
    )
    .unwrap_err();
    let EvalError::Invalid { fields } = error else {
        panic!("expected validation failure");
    };
    assert_eq!(fields.len(), 3);
}

#[test]
fn identical_input_evaluates_identically() {
    let rules = electrolyte_gap();
    let input = raw(vec![
        ("sodium", json!(138)),
        ("chloride", json!(101)),
        ("bicarbonate", json!(25)),
    ]);
    let first = evaluate(&rules, &input).unwrap();
    let second = evaluate(&rules, &input).unwrap();
    assert_eq!(first.score, second.score);
    assert_eq!(first.band.label, second.band.label);
    assert_eq!(first.echoes, second.echoes);
}

#[test]
fn score_in_a_banding_gap_is_surfaced_not_defaulted() {
    let mut rules = sepsis_screen();
    // A defective partition: nothing covers a score of exactly 1.
    rules.bands = vec![band(0.0, 0.0, "None"), band(2.0, 3.0, "High Risk")];
    let error = evaluate(
        &rules,
        &raw(vec![
            ("respiratory_rate", json!(true)),
            ("systolic_bp", json!(false)),
            ("mental_status", json!(false)),
        ]),
    )
    .unwrap_err();
    assert_eq!(
        error,
        EvalError::UnbandedScore {
            rule_set: "screen".to_string(),
            score: 1.0,
        }
    );
}
