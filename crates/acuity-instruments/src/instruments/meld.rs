use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::formula::Expr;
use acuity_core::rules::{Band, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// MELD: Model for End-stage Liver Disease (original, pre-2016 form).
///
/// 3.78 ln(bilirubin) + 11.2 ln(INR) + 9.57 ln(creatinine) + 6.43,
/// rounded to the nearest integer and clamped to 6-40. Labs below 1.0
/// are clamped to 1.0 before the logarithm, and creatinine is capped at
/// 4.0 mg/dL.
pub struct Meld;

impl Instrument for Meld {
    fn id(&self) -> &str {
        "meld"
    }

    fn name(&self) -> &str {
        "MELD"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "meld".to_string(),
            name: "MELD".to_string(),
            description: Some(
                "Three-month mortality in end-stage liver disease; used for transplant listing"
                    .to_string(),
            ),
            reference: Some(
                "Kamath PS, et al. A model to predict survival in patients with end-stage liver \
                 disease. Hepatology. 2001;33(2):464-470."
                    .to_string(),
            ),
            fields: vec![
                lab("bilirubin", "Total bilirubin", 0.1, 99.0, "mg/dL"),
                lab("inr", "INR", 0.1, 20.0, ""),
                lab("creatinine", "Creatinine", 0.1, 40.0, "mg/dL"),
            ],
            scorer: Scorer::Formula {
                expr: Expr::round(
                    Expr::clamp(
                        Expr::add(vec![
                            Expr::mul(vec![
                                Expr::constant(3.78),
                                Expr::ln(Expr::clamp(Expr::field("bilirubin"), 1.0, 99.0)),
                            ]),
                            Expr::mul(vec![
                                Expr::constant(11.2),
                                Expr::ln(Expr::clamp(Expr::field("inr"), 1.0, 20.0)),
                            ]),
                            Expr::mul(vec![
                                Expr::constant(9.57),
                                Expr::ln(Expr::clamp(Expr::field("creatinine"), 1.0, 4.0)),
                            ]),
                            Expr::constant(6.43),
                        ]),
                        6.0,
                        40.0,
                    ),
                    0,
                ),
            },
            score_range: ScoreRange {
                min: 6.0,
                max: 40.0,
                step: Some(1.0),
            },
            bands: vec![
                Band {
                    lower: 6.0,
                    upper: 9.0,
                    label: "Low".to_string(),
                    guidance: "Three-month mortality around 2%.".to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 10.0,
                    upper: 19.0,
                    label: "Moderate".to_string(),
                    guidance: "Three-month mortality around 6%.".to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 20.0,
                    upper: 29.0,
                    label: "High".to_string(),
                    guidance: "Three-month mortality around 20%. Discuss transplant evaluation \
                               if not already listed."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 30.0,
                    upper: 40.0,
                    label: "Very High".to_string(),
                    guidance: "Three-month mortality above 50%.".to_string(),
                    actions: vec!["Expedite transplant evaluation".to_string()],
                },
            ],
        });
        &RULES
    }
}

fn lab(name: &str, label: &str, min: f64, max: f64, unit: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Numeric { min, max },
        required: true,
        unit: (!unit.is_empty()).then(|| unit.to_string()),
        description: None,
    }
}
