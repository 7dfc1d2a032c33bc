use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::formula::Expr;
use acuity_core::rules::{Band, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// Rancho Los Amigos scale of cognitive functioning after brain injury.
/// A purely categorical instrument: the assessed level is the score,
/// and each level is its own interpretation band.
pub struct Rancho;

const LEVELS: [(&str, &str); 8] = [
    (
        "Level I: No Response",
        "No response to external stimuli. Appears asleep.",
    ),
    (
        "Level II: Generalized Response",
        "Inconsistent, non-purposeful reactions to stimuli, often the same regardless of the \
         stimulus.",
    ),
    (
        "Level III: Localized Response",
        "Inconsistent but specific reactions to stimuli; may follow simple commands \
         inconsistently.",
    ),
    (
        "Level IV: Confused-Agitated",
        "Heightened activity with severely impaired information processing; behaviour may be \
         bizarre or aggressive.",
    ),
    (
        "Level V: Confused-Inappropriate",
        "Consistent response to simple commands, but responses become non-purposeful with \
         complexity; severe memory impairment.",
    ),
    (
        "Level VI: Confused-Appropriate",
        "Goal-directed behaviour with external direction; follows simple directions \
         consistently and shows carry-over for relearned tasks.",
    ),
    (
        "Level VII: Automatic-Appropriate",
        "Oriented in familiar settings; performs daily routines automatically with shallow \
         recall and impaired judgement.",
    ),
    (
        "Level VIII: Purposeful-Appropriate",
        "Alert, oriented, and able to integrate new learning; subtle deficits may persist under \
         stress.",
    ),
];

impl Instrument for Rancho {
    fn id(&self) -> &str {
        "rancho"
    }

    fn name(&self) -> &str {
        "Rancho Los Amigos"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "rancho".to_string(),
            name: "Rancho Los Amigos".to_string(),
            description: Some(
                "Level of cognitive functioning during recovery from brain injury".to_string(),
            ),
            reference: Some(
                "Hagen C, Malkmus D, Durham P. Levels of cognitive functioning. Rancho Los \
                 Amigos Hospital, 1972."
                    .to_string(),
            ),
            fields: vec![FieldSpec {
                name: "level".to_string(),
                label: "Assessed level of cognitive functioning".to_string(),
                kind: FieldKind::Integer { min: 1, max: 8 },
                required: true,
                unit: None,
                description: None,
            }],
            scorer: Scorer::Formula {
                expr: Expr::field("level"),
            },
            score_range: ScoreRange {
                min: 1.0,
                max: 8.0,
                step: Some(1.0),
            },
            bands: LEVELS
                .iter()
                .enumerate()
                .map(|(i, (label, guidance))| Band {
                    lower: (i + 1) as f64,
                    upper: (i + 1) as f64,
                    label: label.to_string(),
                    guidance: guidance.to_string(),
                    actions: vec![],
                })
                .collect(),
        });
        &RULES
    }
}
