use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::rules::{Band, Criterion, PointAllocation, PointEntry, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// Wells score for deep-vein thrombosis. Nine one-point clinical
/// criteria, minus two when an alternative diagnosis is at least as
/// likely. Range -2 to 9.
pub struct WellsDvt;

const CRITERIA: [(&str, &str); 9] = [
    (
        "active_cancer",
        "Active cancer (treatment within 6 months, or palliative)",
    ),
    (
        "paralysis_or_recent_cast",
        "Paralysis, paresis, or recent plaster immobilisation of a leg",
    ),
    (
        "recently_bedridden_or_major_surgery",
        "Recently bedridden 3 days or more, or major surgery within 12 weeks",
    ),
    (
        "localized_tenderness",
        "Localised tenderness along the deep venous system",
    ),
    ("entire_leg_swollen", "Entire leg swollen"),
    (
        "calf_swelling_over_3cm",
        "Calf swelling more than 3 cm compared with the other leg",
    ),
    (
        "pitting_edema_symptomatic_leg",
        "Pitting oedema confined to the symptomatic leg",
    ),
    (
        "collateral_superficial_veins",
        "Collateral superficial veins (non-varicose)",
    ),
    ("previous_dvt", "Previously documented DVT"),
];

impl Instrument for WellsDvt {
    fn id(&self) -> &str {
        "wells_dvt"
    }

    fn name(&self) -> &str {
        "Wells Score (DVT)"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| {
            let mut fields: Vec<FieldSpec> = CRITERIA
                .iter()
                .map(|(name, label)| yes_no(name, label))
                .collect();
            fields.push(yes_no(
                "alternative_diagnosis_as_likely",
                "Alternative diagnosis at least as likely as DVT",
            ));

            let mut allocations: Vec<PointAllocation> = CRITERIA
                .iter()
                .map(|(name, _)| flag_points(name, 1.0))
                .collect();
            allocations.push(flag_points("alternative_diagnosis_as_likely", -2.0));

            RuleSet {
                id: "wells_dvt".to_string(),
                name: "Wells Score (DVT)".to_string(),
                description: Some("Pre-test probability of deep-vein thrombosis".to_string()),
                reference: Some(
                    "Wells PS, et al. Evaluation of D-dimer in the diagnosis of suspected \
                     deep-vein thrombosis. N Engl J Med. 2003;349(13):1227-1235."
                        .to_string(),
                ),
                fields,
                scorer: Scorer::PointTable { allocations },
                score_range: ScoreRange {
                    min: -2.0,
                    max: 9.0,
                    step: Some(1.0),
                },
                bands: vec![
                    Band {
                        lower: -2.0,
                        upper: 0.0,
                        label: "Low Probability".to_string(),
                        guidance: "DVT prevalence around 5%. A negative D-dimer effectively \
                                   rules out DVT."
                            .to_string(),
                        actions: vec!["Obtain D-dimer before imaging".to_string()],
                    },
                    Band {
                        lower: 1.0,
                        upper: 2.0,
                        label: "Moderate Probability".to_string(),
                        guidance: "DVT prevalence around 17%.".to_string(),
                        actions: vec![],
                    },
                    Band {
                        lower: 3.0,
                        upper: 9.0,
                        label: "High Probability".to_string(),
                        guidance: "DVT prevalence around 50%. D-dimer alone cannot rule out \
                                   DVT at this probability."
                            .to_string(),
                        actions: vec!["Proceed to compression ultrasonography".to_string()],
                    },
                ],
            }
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

fn flag_points(field: &str, points: f64) -> PointAllocation {
    PointAllocation {
        field: field.to_string(),
        entries: vec![
            PointEntry {
                when: Criterion::Flag { set: true },
                points,
            },
            PointEntry {
                when: Criterion::Flag { set: false },
                points: 0.0,
            },
        ],
    }
}
