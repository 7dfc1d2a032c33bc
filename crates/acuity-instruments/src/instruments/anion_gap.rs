use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::formula::Expr;
use acuity_core::rules::{Band, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// Serum anion gap: Na - (Cl + HCO3), reported to one decimal.
pub struct AnionGap;

impl Instrument for AnionGap {
    fn id(&self) -> &str {
        "anion_gap"
    }

    fn name(&self) -> &str {
        "Anion Gap"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "anion_gap".to_string(),
            name: "Anion Gap".to_string(),
            description: Some(
                "Unmeasured anions in serum; the first branch point in working up a metabolic \
                 acidosis"
                    .to_string(),
            ),
            reference: Some(
                "Emmett M, Narins RG. Clinical use of the anion gap. Medicine (Baltimore). \
                 1977;56(1):38-54."
                    .to_string(),
            ),
            fields: vec![
                electrolyte("sodium", "Sodium", 100.0, 200.0),
                electrolyte("chloride", "Chloride", 50.0, 150.0),
                electrolyte("bicarbonate", "Bicarbonate", 1.0, 60.0),
            ],
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
                min: -110.0,
                max: 149.0,
                step: Some(0.1),
            },
            bands: vec![
                Band {
                    lower: -110.0,
                    upper: 7.9,
                    label: "Low".to_string(),
                    guidance: "Low anion gap. Uncommon; consider hypoalbuminaemia, paraproteins, \
                               or a laboratory error before pursuing rarer causes."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 8.0,
                    upper: 12.0,
                    label: "Normal".to_string(),
                    guidance: "Normal anion gap. If acidosis is present it is \
                               non-gap (hyperchloraemic)."
                        .to_string(),
                    actions: vec![],
                },
                Band {
                    lower: 12.1,
                    upper: 149.0,
                    label: "Elevated".to_string(),
                    guidance: "Elevated anion gap, consistent with an anion-gap metabolic \
                               acidosis (ketoacidosis, lactic acidosis, renal failure, toxic \
                               ingestions)."
                        .to_string(),
                    actions: vec![
                        "Correct the gap for albumin if hypoalbuminaemic".to_string(),
                        "Check lactate, ketones, and an osmolal gap as indicated".to_string(),
                    ],
                },
            ],
        });
        &RULES
    }
}

fn electrolyte(name: &str, label: &str, min: f64, max: f64) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Numeric { min, max },
        required: true,
        unit: Some("mmol/L".to_string()),
        description: None,
    }
}
