use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// SOFA: Sequential Organ Failure Assessment. Six organ systems graded
/// 0-4 each, 0-24 total. Respiratory and cardiovascular grading is the
/// simplified bedside form without ventilatory-support distinctions.
pub struct Sofa;

impl Instrument for Sofa {
    fn id(&self) -> &str {
        "sofa"
    }

    fn name(&self) -> &str {
        "SOFA"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "sofa".to_string(),
            name: "SOFA".to_string(),
            description: Some("Degree of organ dysfunction in critical illness".to_string()),
            reference: Some(
                "Vincent JL, et al. The SOFA (Sepsis-related Organ Failure Assessment) score to \
                 describe organ dysfunction/failure. Intensive Care Med. 1996;22(7):707-710."
                    .to_string(),
            ),
            fields: vec![
                FieldSpec {
                    name: "pao2_fio2".to_string(),
                    label: "PaO2/FiO2 ratio".to_string(),
                    kind: FieldKind::Numeric {
                        min: 0.0,
                        max: 800.0,
                    },
                    required: true,
                    unit: Some("mmHg".to_string()),
                    description: None,
                },
                FieldSpec {
                    name: "platelets".to_string(),
                    label: "Platelet count".to_string(),
                    kind: FieldKind::Integer { min: 0, max: 2000 },
                    required: true,
                    unit: Some("x10^3/uL".to_string()),
                    description: None,
                },
                FieldSpec {
                    name: "bilirubin".to_string(),
                    label: "Total bilirubin".to_string(),
                    kind: FieldKind::Numeric {
                        min: 0.1,
                        max: 80.0,
                    },
                    required: true,
                    unit: Some("mg/dL".to_string()),
                    description: None,
                },
                FieldSpec {
                    name: "cardiovascular".to_string(),
                    label: "Cardiovascular support".to_string(),
                    kind: FieldKind::Enum {
                        options: vec![
                            "no_hypotension".to_string(),
                            "map_below_70".to_string(),
                            "low_dose_vasopressors".to_string(),
                            "moderate_dose_vasopressors".to_string(),
                            "high_dose_vasopressors".to_string(),
                        ],
                    },
                    required: true,
                    unit: None,
                    description: Some(
                        "Dose tiers follow the original dopamine/norepinephrine cutoffs"
                            .to_string(),
                    ),
                },
                FieldSpec {
                    name: "gcs".to_string(),
                    label: "Glasgow Coma Scale".to_string(),
                    kind: FieldKind::Integer { min: 3, max: 15 },
                    required: true,
                    unit: None,
                    description: None,
                },
                FieldSpec {
                    name: "creatinine".to_string(),
                    label: "Creatinine".to_string(),
                    kind: FieldKind::Numeric {
                        min: 0.1,
                        max: 20.0,
                    },
                    required: true,
                    unit: Some("mg/dL".to_string()),
                    description: None,
                },
            ],
            scorer: Scorer::PointTable {
                allocations: vec![
                    PointAllocation {
                        field: "pao2_fio2".to_string(),
                        entries: vec![
                            within(400.0, 800.0, 0.0),
                            within(300.0, 400.0, 1.0),
                            within(200.0, 300.0, 2.0),
                            within(100.0, 200.0, 3.0),
                            within(0.0, 100.0, 4.0),
                        ],
                    },
                    PointAllocation {
                        field: "platelets".to_string(),
                        entries: vec![
                            within(150.0, 2000.0, 0.0),
                            within(100.0, 149.0, 1.0),
                            within(50.0, 99.0, 2.0),
                            within(20.0, 49.0, 3.0),
                            within(0.0, 19.0, 4.0),
                        ],
                    },
                    PointAllocation {
                        // Graded highest-first so shared edges resolve to
                        // the published boundaries (1.2 scores 1, 2.0
                        // scores 2, and so on).
                        field: "bilirubin".to_string(),
                        entries: vec![
                            within(12.0, 80.0, 4.0),
                            within(6.0, 12.0, 3.0),
                            within(2.0, 6.0, 2.0),
                            within(1.2, 2.0, 1.0),
                            within(0.1, 1.2, 0.0),
                        ],
                    },
                    PointAllocation {
                        field: "cardiovascular".to_string(),
                        entries: vec![
                            is("no_hypotension", 0.0),
                            is("map_below_70", 1.0),
                            is("low_dose_vasopressors", 2.0),
                            is("moderate_dose_vasopressors", 3.0),
                            is("high_dose_vasopressors", 4.0),
                        ],
                    },
                    PointAllocation {
                        field: "gcs".to_string(),
                        entries: vec![
                            within(15.0, 15.0, 0.0),
                            within(13.0, 14.0, 1.0),
                            within(10.0, 12.0, 2.0),
                            within(6.0, 9.0, 3.0),
                            within(3.0, 5.0, 4.0),
                        ],
                    },
                    PointAllocation {
                        field: "creatinine".to_string(),
                        entries: vec![
                            within(5.0, 20.0, 4.0),
                            within(3.5, 5.0, 3.0),
                            within(2.0, 3.5, 2.0),
                            within(1.2, 2.0, 1.0),
                            within(0.1, 1.2, 0.0),
                        ],
                    },
                ],
            },
            score_range: ScoreRange {
                min: 0.0,
                max: 24.0,
                step: Some(1.0),
            },
            bands: vec![
                Band {
                    lower: 0.0,
                    upper: 6.0,
                    label: "Low".to_string(),
                    guidance: "Observed mortality below 10%.".to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 7.0,
                    upper: 9.0,
                    label: "Moderate".to_string(),
                    guidance: "Observed mortality roughly 15-20%.".to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 10.0,
                    upper: 12.0,
                    label: "High".to_string(),
                    guidance: "Observed mortality roughly 40-50%.".to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 13.0,
                    upper: 24.0,
                    label: "Very High".to_string(),
                    guidance: "Observed mortality above 50%. Trend matters: a rising score over \
                               the first 48 hours predicts worse outcome than any single value."
                        .to_string(),
                    actions: vec![],
                },
            ],
        });
        &RULES
    }
}

fn within(min: f64, max: f64, points: f64) -> PointEntry {
    PointEntry {
        when: Criterion::Within { min, max },
        points,
    }
}

fn is(token: &str, points: f64) -> PointEntry {
    PointEntry {
        when: Criterion::Is {
            token: token.to_string(),
        },
        points,
    }
}
