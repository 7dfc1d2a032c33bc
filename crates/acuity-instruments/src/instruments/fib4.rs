use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::formula::Expr;
use acuity_core::rules::{Band, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// FIB-4: non-invasive index of hepatic fibrosis.
/// age x AST / (platelets x sqrt(ALT)), reported to two decimals. The
/// index loses meaning far above the high-risk cutoff, so the score is
/// capped at 100 for banding.
pub struct Fib4;

impl Instrument for Fib4 {
    fn id(&self) -> &str {
        "fib4"
    }

    fn name(&self) -> &str {
        "FIB-4"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "fib4".to_string(),
            name: "FIB-4".to_string(),
            description: Some("Likelihood of advanced hepatic fibrosis".to_string()),
            reference: Some(
                "Sterling RK, et al. Development of a simple noninvasive index to predict \
                 significant fibrosis in patients with HIV/HCV coinfection. Hepatology. \
                 2006;43(6):1317-1325."
                    .to_string(),
            ),
            fields: vec![
                FieldSpec {
                    name: "age".to_string(),
                    label: "Age".to_string(),
                    kind: FieldKind::Integer { min: 18, max: 110 },
                    required: true,
                    unit: Some("years".to_string()),
                    description: None,
                },
                lab("ast", "AST", "U/L"),
                lab("alt", "ALT", "U/L"),
                FieldSpec {
                    name: "platelets".to_string(),
                    label: "Platelet count".to_string(),
                    kind: FieldKind::Numeric {
                        min: 1.0,
                        max: 1500.0,
                    },
                    required: true,
                    unit: Some("x10^9/L".to_string()),
                    description: None,
                },
            ],
            scorer: Scorer::Formula {
                expr: Expr::round(
                    Expr::clamp(
                        Expr::div(
                            Expr::mul(vec![Expr::field("age"), Expr::field("ast")]),
                            Expr::mul(vec![
                                Expr::field("platelets"),
                                Expr::sqrt(Expr::field("alt")),
                            ]),
                        ),
                        0.0,
                        100.0,
                    ),
                    2,
                ),
            },
            score_range: ScoreRange {
                min: 0.0,
                max: 100.0,
                step: Some(0.01),
            },
            bands: vec![
                Band {
                    lower: 0.0,
                    upper: 1.44,
                    label: "Low Risk".to_string(),
                    guidance: "Advanced fibrosis unlikely (negative predictive value around \
                               90%). Repeat assessment in 2-3 years is reasonable."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 1.45,
                    upper: 3.25,
                    label: "Indeterminate".to_string(),
                    guidance: "Indeterminate result; FIB-4 cannot classify this patient."
                        .to_string(),
                    actions: vec![
                        "Consider elastography or another second-line fibrosis test".to_string(),
                    ],
                },
                Band {
                    lower: 3.26,
                    upper: 100.0,
                    label: "High Risk".to_string(),
                    guidance: "Advanced fibrosis likely (positive predictive value around 65%)."
                        .to_string(),
                    actions: vec!["Refer to hepatology".to_string()],
                },
            ],
        });
        &RULES
    }
}

fn lab(name: &str, label: &str, unit: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Numeric {
            min: 1.0,
            max: 2000.0,
        },
        required: true,
        unit: Some(unit.to_string()),
        description: None,
    }
}
