use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// ABCD2: early stroke risk after transient ischaemic attack.
/// Age, Blood pressure, Clinical features, Duration, Diabetes. 0-7.
pub struct Abcd2;

impl Instrument for Abcd2 {
    fn id(&self) -> &str {
        "abcd2"
    }

    fn name(&self) -> &str {
        "ABCD2"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "abcd2".to_string(),
            name: "ABCD2".to_string(),
            description: Some("Two-day stroke risk after transient ischaemic attack".to_string()),
            reference: Some(
                "Johnston SC, et al. Validation and refinement of scores to predict very early \
                 stroke risk after transient ischaemic attack. Lancet. 2007;369(9558):283-292."
                    .to_string(),
            ),
            fields: vec![
                yes_no("age_60_or_over", "Age 60 or over"),
                yes_no(
                    "blood_pressure_elevated",
                    "Systolic 140 mmHg or higher, or diastolic 90 mmHg or higher",
                ),
                FieldSpec {
                    name: "clinical_features".to_string(),
                    label: "Clinical features of the TIA".to_string(),
                    kind: FieldKind::Enum {
                        options: vec![
                            "unilateral_weakness".to_string(),
                            "speech_disturbance_without_weakness".to_string(),
                            "other".to_string(),
                        ],
                    },
                    required: true,
                    unit: None,
                    description: None,
                },
                FieldSpec {
                    name: "symptom_duration".to_string(),
                    label: "Duration of symptoms".to_string(),
                    kind: FieldKind::Enum {
                        options: vec![
                            "sixty_minutes_or_more".to_string(),
                            "ten_to_fifty_nine_minutes".to_string(),
                            "under_ten_minutes".to_string(),
                        ],
                    },
                    required: true,
                    unit: None,
                    description: None,
                },
                yes_no("diabetes", "Diabetes mellitus"),
            ],
            scorer: Scorer::PointTable {
                allocations: vec![
                    flag_point("age_60_or_over"),
                    flag_point("blood_pressure_elevated"),
                    PointAllocation {
                        field: "clinical_features".to_string(),
                        entries: vec![
                            token_entry("unilateral_weakness", 2.0),
                            token_entry("speech_disturbance_without_weakness", 1.0),
                            token_entry("other", 0.0),
                        ],
                    },
                    PointAllocation {
                        field: "symptom_duration".to_string(),
                        entries: vec![
                            token_entry("sixty_minutes_or_more", 2.0),
                            token_entry("ten_to_fifty_nine_minutes", 1.0),
                            token_entry("under_ten_minutes", 0.0),
                        ],
                    },
                    flag_point("diabetes"),
                ],
            },
            score_range: ScoreRange {
                min: 0.0,
                max: 7.0,
                step: Some(1.0),
            },
            bands: vec![
                Band {
                    lower: 0.0,
                    upper: 3.0,
                    label: "Low Risk".to_string(),
                    guidance: "Two-day stroke risk around 1.0%.".to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 4.0,
                    upper: 5.0,
                    label: "Moderate Risk".to_string(),
                    guidance: "Two-day stroke risk around 4.1%. Timely specialist assessment is \
                               warranted."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 6.0,
                    upper: 7.0,
                    label: "High Risk".to_string(),
                    guidance: "Two-day stroke risk around 8.1%.".to_string(),
                    actions: vec!["Consider urgent admission and early imaging".to_string()],
                },
            ],
        });
        &RULES
    }
}

fn yes_no(name: &str, label: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Boolean,
        required: true,
        unit: None,
        description: None,
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

fn token_entry(token: &str, points: f64) -> PointEntry {
    PointEntry {
        when: Criterion::Is {
            token: token.to_string(),
        },
        points,
    }
}
