use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// CURB-65: community-acquired pneumonia severity on presentation.
/// Confusion, Urea, Respiratory rate, Blood pressure, age 65. One point
/// each, 0-5 total.
pub struct Curb65;

impl Instrument for Curb65 {
    fn id(&self) -> &str {
        "curb65"
    }

    fn name(&self) -> &str {
        "CURB-65"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "curb65".to_string(),
            name: "CURB-65".to_string(),
            description: Some(
                "Severity of community-acquired pneumonia at presentation".to_string(),
            ),
            reference: Some(
                "Lim WS, et al. Defining community acquired pneumonia severity on presentation \
                 to hospital. Thorax. 2003;58(5):377-382."
                    .to_string(),
            ),
            fields: vec![
                FieldSpec {
                    name: "confusion".to_string(),
                    label: "New-onset confusion".to_string(),
                    kind: FieldKind::Boolean,
                    required: true,
                    unit: None,
                    description: Some("Abbreviated mental test score 8 or less".to_string()),
                },
                FieldSpec {
                    name: "bun".to_string(),
                    label: "Blood urea nitrogen".to_string(),
                    kind: FieldKind::Numeric {
                        min: 1.0,
                        max: 200.0,
                    },
                    required: true,
                    unit: Some("mg/dL".to_string()),
                    description: None,
                },
                FieldSpec {
                    name: "respiratory_rate".to_string(),
                    label: "Respiratory rate".to_string(),
                    kind: FieldKind::Integer { min: 0, max: 80 },
                    required: true,
                    unit: Some("breaths/min".to_string()),
                    description: None,
                },
                FieldSpec {
                    name: "low_blood_pressure".to_string(),
                    label: "Systolic below 90 mmHg or diastolic 60 mmHg or lower".to_string(),
                    kind: FieldKind::Boolean,
                    required: true,
                    unit: None,
                    description: None,
                },
                FieldSpec {
                    name: "age".to_string(),
                    label: "Age".to_string(),
                    kind: FieldKind::Integer { min: 0, max: 120 },
                    required: true,
                    unit: Some("years".to_string()),
                    description: None,
                },
            ],
            scorer: Scorer::PointTable {
                allocations: vec![
                    flag_point("confusion"),
                    PointAllocation {
                        // BUN above 19 mg/dL (urea above 7 mmol/L) scores.
                        // The boundary entry comes first so exactly 19
                        // stays at zero points.
                        field: "bun".to_string(),
                        entries: vec![
                            entry_within(1.0, 19.0, 0.0),
                            entry_within(19.0, 200.0, 1.0),
                        ],
                    },
                    PointAllocation {
                        field: "respiratory_rate".to_string(),
                        entries: vec![entry_within(30.0, 80.0, 1.0), entry_within(0.0, 29.0, 0.0)],
                    },
                    flag_point("low_blood_pressure"),
                    PointAllocation {
                        field: "age".to_string(),
                        entries: vec![entry_within(65.0, 120.0, 1.0), entry_within(0.0, 64.0, 0.0)],
                    },
                ],
            },
            score_range: ScoreRange {
                min: 0.0,
                max: 5.0,
                step: Some(1.0),
            },
            bands: vec![
                Band {
                    lower: 0.0,
                    upper: 1.0,
                    label: "Low Severity".to_string(),
                    guidance: "30-day mortality below 3%. Usually suitable for home treatment."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 2.0,
                    upper: 2.0,
                    label: "Moderate Severity".to_string(),
                    guidance: "30-day mortality around 9%. Consider hospital-supervised \
                               treatment, either a short inpatient stay or hospital-supervised \
                               outpatient care."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 3.0,
                    upper: 5.0,
                    label: "High Severity".to_string(),
                    guidance: "30-day mortality 15% or more. Manage as severe pneumonia."
                        .to_string(),
                    actions: vec![
                        "Admit to hospital".to_string(),
                        "Assess for ICU admission, particularly at score 4 or 5".to_string(),
                    ],
                },
            ],
        });
        &RULES
    }
}

fn flag_point(field: &str) -> PointAllocation {
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

fn entry_within(min: f64, max: f64, points: f64) -> PointEntry {
    PointEntry {
        when: Criterion::Within { min, max },
        points,
    }
}
