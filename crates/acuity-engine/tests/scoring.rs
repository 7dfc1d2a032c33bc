use acuity_core::field::{FieldKind, FieldSpec, FieldValue, TypedValues};
use acuity_core::formula::Expr;
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};
use acuity_engine::error::EvalError;
use acuity_engine::score;

fn field(name: &str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: name.to_string(),
        kind,
        required,
        unit: None,
        description: None,
    }
}

fn grades(name: &str, tokens: &[(&str, f64)]) -> (FieldSpec, PointAllocation) {
    let spec = field(
        name,
        FieldKind::Enum {
            options: tokens.iter().map(|(t, _)| t.to_string()).collect(),
        },
        true,
    );
    let alloc = PointAllocation {
        field: name.to_string(),
        entries: tokens
            .iter()
            .map(|(t, p)| PointEntry {
                when: Criterion::Is {
                    token: t.to_string(),
                },
                points: *p,
            })
            .collect(),
    };
    (spec, alloc)
}

fn one_band(min: f64, max: f64) -> Vec<Band> {
    vec![Band {
        lower: min,
        upper: max,
        label: "All".to_string(),
        guidance: String::new(),
        actions: vec![],
    }]
}

/// Three fields contributing {0,1,2}, {0,1}, and {0,1,2} points.
fn three_field_table() -> RuleSet {
    let (a_spec, a_alloc) = grades("a", &[("none", 0.0), ("mild", 1.0), ("severe", 2.0)]);
    let (c_spec, c_alloc) = grades("c", &[("none", 0.0), ("mild", 1.0), ("severe", 2.0)]);
    RuleSet {
        id: "table".to_string(),
        name: "Table".to_string(),
        description: None,
        reference: None,
        fields: vec![a_spec, field("b", FieldKind::Boolean, true), c_spec],
        scorer: Scorer::PointTable {
            allocations: vec![
                a_alloc,
                PointAllocation {
                    field: "b".to_string(),
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
                },
                c_alloc,
            ],
        },
        score_range: ScoreRange {
            min: 0.0,
            max: 5.0,
            step: Some(1.0),
        },
        bands: one_band(0.0, 5.0),
    }
}

fn typed(pairs: Vec<(&str, FieldValue)>) -> TypedValues {
    pairs.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

#[test]
fn point_table_sums_selected_contributions() {
    let values = typed(vec![
        ("a", FieldValue::Token("severe".to_string())),
        ("b", FieldValue::Bool(true)),
        ("c", FieldValue::Token("severe".to_string())),
    ]);
    assert_eq!(score(&three_field_table(), &values).unwrap(), 5.0);
}

#[test]
fn point_table_of_all_zero_selections_is_zero() {
    let values = typed(vec![
        ("a", FieldValue::Token("none".to_string())),
        ("b", FieldValue::Bool(false)),
        ("c", FieldValue::Token("none".to_string())),
    ]);
    assert_eq!(score(&three_field_table(), &values).unwrap(), 0.0);
}

#[test]
fn absent_optional_field_contributes_zero() {
    let mut rules = three_field_table();
    rules.fields[1].required = false;
    let values = typed(vec![
        ("a", FieldValue::Token("mild".to_string())),
        ("c", FieldValue::Token("mild".to_string())),
    ]);
    assert_eq!(score(&rules, &values).unwrap(), 2.0);
}

#[test]
fn value_matching_no_entry_is_an_internal_error() {
    let rules = RuleSet {
        fields: vec![field(
            "hr",
            FieldKind::Numeric {
                min: 0.0,
                max: 10.0,
            },
            true,
        )],
        scorer: Scorer::PointTable {
            allocations: vec![PointAllocation {
                field: "hr".to_string(),
                entries: vec![PointEntry {
                    when: Criterion::Within { min: 0.0, max: 5.0 },
                    points: 1.0,
                }],
            }],
        },
        score_range: ScoreRange {
            min: 0.0,
            max: 1.0,
            step: Some(1.0),
        },
        bands: one_band(0.0, 1.0),
        ..three_field_table()
    };
    let values = typed(vec![("hr", FieldValue::Number(7.0))]);
    assert_eq!(
        score(&rules, &values).unwrap_err(),
        EvalError::NoMatchingPointEntry {
            rule_set: "table".to_string(),
            field: "hr".to_string(),
        }
    );
}

fn formula_rules(expr: Expr, fields: Vec<FieldSpec>) -> RuleSet {
    RuleSet {
        id: "formula".to_string(),
        name: "Formula".to_string(),
        description: None,
        reference: None,
        fields,
        scorer: Scorer::Formula { expr },
        score_range: ScoreRange {
            min: 0.0,
            max: 100.0,
            step: None,
        },
        bands: one_band(0.0, 100.0),
    }
}

#[test]
fn formula_clamps_exactly_as_authored() {
    // MELD-style: the creatinine term is clamped to [1.0, 4.0] before
    // the logarithm, so 10.0 and 4.0 must score identically.
    let rules = formula_rules(
        Expr::round(
            Expr::add(vec![
                Expr::mul(vec![
                    Expr::constant(9.57),
                    Expr::ln(Expr::clamp(Expr::field("creatinine"), 1.0, 4.0)),
                ]),
                Expr::constant(6.43),
            ]),
            0,
        ),
        vec![field(
            "creatinine",
            FieldKind::Numeric {
                min: 0.1,
                max: 40.0,
            },
            true,
        )],
    );
    let high = typed(vec![("creatinine", FieldValue::Number(10.0))]);
    let capped = typed(vec![("creatinine", FieldValue::Number(4.0))]);
    let high_score = score(&rules, &high).unwrap();
    assert_eq!(high_score, score(&rules, &capped).unwrap());
    assert_eq!(high_score, 20.0);
}

#[test]
fn formula_rounds_to_declared_decimals() {
    let rules = formula_rules(
        Expr::round(Expr::div(Expr::constant(1.0), Expr::constant(3.0)), 2),
        vec![],
    );
    assert_eq!(score(&rules, &TypedValues::new()).unwrap(), 0.33);
}

#[test]
fn booleans_read_as_one_or_zero_in_formulas() {
    let rules = formula_rules(
        Expr::add(vec![Expr::field("flag"), Expr::constant(1.0)]),
        vec![field("flag", FieldKind::Boolean, true)],
    );
    let on = typed(vec![("flag", FieldValue::Bool(true))]);
    let off = typed(vec![("flag", FieldValue::Bool(false))]);
    assert_eq!(score(&rules, &on).unwrap(), 2.0);
    assert_eq!(score(&rules, &off).unwrap(), 1.0);
}

#[test]
fn formula_missing_input_is_an_internal_error() {
    let rules = formula_rules(
        Expr::field("creatinine"),
        vec![field(
            "creatinine",
            FieldKind::Numeric {
                min: 0.1,
                max: 40.0,
            },
            true,
        )],
    );
    assert_eq!(
        score(&rules, &TypedValues::new()).unwrap_err(),
        EvalError::MissingFormulaInput {
            rule_set: "formula".to_string(),
            field: "creatinine".to_string(),
        }
    );
}

#[test]
fn subtraction_and_division_follow_field_values() {
    let rules = formula_rules(
        Expr::div(
            Expr::sub(Expr::field("a"), Expr::field("b")),
            Expr::constant(2.0),
        ),
        vec![
            field("a", FieldKind::Numeric { min: 0.0, max: 100.0 }, true),
            field("b", FieldKind::Numeric { min: 0.0, max: 100.0 }, true),
        ],
    );
    let values = typed(vec![
        ("a", FieldValue::Number(10.0)),
        ("b", FieldValue::Number(4.0)),
    ]);
    assert_eq!(score(&rules, &values).unwrap(), 3.0);
}
