use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// qSOFA: quick Sequential Organ Failure Assessment.
/// Three bedside findings, one point each. Two or more points flag high
/// risk of poor outcome from suspected infection.
pub struct Qsofa;

impl Instrument for Qsofa {
    fn id(&self) -> &str {
        "qsofa"
    }

    fn name(&self) -> &str {
        "qSOFA"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "qsofa".to_string(),
            name: "qSOFA".to_string(),
            description: Some(
                "Bedside screen for patients with suspected infection at risk of poor outcome"
                    .to_string(),
            ),
            reference: Some(
                "Seymour CW, et al. Assessment of Clinical Criteria for Sepsis. JAMA. \
                 2016;315(8):762-774."
                    .to_string(),
            ),
            fields: vec![
                finding("altered_mental_status", "Altered mental status (GCS below 15)"),
                finding(
                    "respiratory_rate_22_or_higher",
                    "Respiratory rate 22/min or higher",
                ),
                finding(
                    "systolic_bp_100_or_lower",
                    "Systolic blood pressure 100 mmHg or lower",
                ),
            ],
            scorer: Scorer::PointTable {
                allocations: vec![
                    one_point("altered_mental_status"),
                    one_point("respiratory_rate_22_or_higher"),
                    one_point("systolic_bp_100_or_lower"),
                ],
            },
            score_range: ScoreRange {
                min: 0.0,
                max: 3.0,
                step: Some(1.0),
            },
            bands: vec![
                Band {
                    lower: 0.0,
                    upper: 1.0,
                    label: "Low Risk".to_string(),
                    guidance: "Fewer than two qSOFA criteria. Sepsis is not excluded; continue \
                               routine monitoring and reassess if the clinical picture changes."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 2.0,
                    upper: 3.0,
                    label: "High Risk".to_string(),
                    guidance: "Two or more qSOFA criteria, associated with greater in-hospital \
                               mortality in suspected infection."
                        .to_string(),
                    actions: vec![
                        "Assess for organ dysfunction with a full SOFA score".to_string(),
                        "Consider escalation of monitoring and care".to_string(),
                    ],
                },
            ],
        });
        &RULES
    }
}

fn finding(name: &str, label: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
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
