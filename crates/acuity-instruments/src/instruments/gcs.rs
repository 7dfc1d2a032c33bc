use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// Glasgow Coma Scale. Eye, verbal, and motor responses graded
/// independently and summed, 3-15.
pub struct Gcs;

impl Instrument for Gcs {
    fn id(&self) -> &str {
        "gcs"
    }

    fn name(&self) -> &str {
        "Glasgow Coma Scale"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| {
            let eye = [
                ("spontaneous", 4.0),
                ("to_voice", 3.0),
                ("to_pain", 2.0),
                ("none", 1.0),
            ];
            let verbal = [
                ("oriented", 5.0),
                ("confused", 4.0),
                ("inappropriate_words", 3.0),
                ("incomprehensible_sounds", 2.0),
                ("none", 1.0),
            ];
            let motor = [
                ("obeys_commands", 6.0),
                ("localizes_pain", 5.0),
                ("withdrawal_from_pain", 4.0),
                ("abnormal_flexion", 3.0),
                ("extension_to_pain", 2.0),
                ("none", 1.0),
            ];

            RuleSet {
                id: "gcs".to_string(),
                name: "Glasgow Coma Scale".to_string(),
                description: Some("Level of consciousness after acute brain injury".to_string()),
                reference: Some(
                    "Teasdale G, Jennett B. Assessment of coma and impaired consciousness. \
                     Lancet. 1974;2(7872):81-84."
                        .to_string(),
                ),
                fields: vec![
                    graded_field("eye_opening", "Eye opening", &eye),
                    graded_field("verbal_response", "Best verbal response", &verbal),
                    graded_field("motor_response", "Best motor response", &motor),
                ],
                scorer: Scorer::PointTable {
                    allocations: vec![
                        graded_points("eye_opening", &eye),
                        graded_points("verbal_response", &verbal),
                        graded_points("motor_response", &motor),
                    ],
                },
                score_range: ScoreRange {
                    min: 3.0,
                    max: 15.0,
                    step: Some(1.0),
                },
                bands: vec![
                    Band {
                        lower: 3.0,
                        upper: 8.0,
                        label: "Severe".to_string(),
                        guidance: "Severe brain injury. A score of 8 or less generally indicates \
                                   coma."
                            .to_string(),
                        actions: vec![
                            "Secure the airway; intubation is usually indicated".to_string(),
                        ],
                    },
                    Band {
                        lower: 9.0,
                        upper: 12.0,
                        label: "Moderate".to_string(),
                        guidance: "Moderate brain injury. Close observation with repeat scoring."
                            .to_string(),
                        actions: vec![],
                    },
                    Band {
                        lower: 13.0,
                        upper: 15.0,
                        label: "Mild".to_string(),
                        guidance: "Mild brain injury. Reassess regularly; a falling score matters \
                                   more than any single value."
                            .to_string(),
                        actions: vec![],
                    },
                ],
            }
        });
        &RULES
    }
}

fn graded_field(name: &str, label: &str, grades: &[(&str, f64)]) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Enum {
            options: grades.iter().map(|(token, _)| token.to_string()).collect(),
        },
        required: true,
        unit: None,
        description: None,
    }
}

fn graded_points(field: &str, grades: &[(&str, f64)]) -> PointAllocation {
    PointAllocation {
        field: field.to_string(),
        entries: grades
            .iter()
            .map(|(token, points)| PointEntry {
                when: Criterion::Is {
                    token: token.to_string(),
                },
                points: *points,
            })
            .collect(),
    }
}
