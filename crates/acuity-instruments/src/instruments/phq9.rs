use acuity_core::field::{FieldKind, FieldSpec};
use acuity_core::formula::Expr;
use acuity_core::rules::{Band, RuleSet, ScoreRange, Scorer};

use crate::Instrument;

/// PHQ-9: Patient Health Questionnaire depression module. Nine items
/// rated 0-3 over the last two weeks, summed to 0-27.
pub struct Phq9;

const ITEMS: [(&str, &str); 9] = [
    (
        "little_interest",
        "Little interest or pleasure in doing things",
    ),
    ("feeling_down", "Feeling down, depressed, or hopeless"),
    (
        "sleep_problems",
        "Trouble falling or staying asleep, or sleeping too much",
    ),
    ("feeling_tired", "Feeling tired or having little energy"),
    ("appetite_problems", "Poor appetite or overeating"),
    (
        "feeling_bad_about_self",
        "Feeling bad about yourself, or that you are a failure",
    ),
    (
        "trouble_concentrating",
        "Trouble concentrating on things such as reading or television",
    ),
    (
        "moving_slowly_or_restless",
        "Moving or speaking slowly, or being fidgety or restless",
    ),
    (
        "thoughts_of_self_harm",
        "Thoughts that you would be better off dead or of hurting yourself",
    ),
];

impl Instrument for Phq9 {
    fn id(&self) -> &str {
        "phq9"
    }

    fn name(&self) -> &str {
        "PHQ-9"
    }

    fn rule_set(&self) -> &RuleSet {
        static RULES: std::sync::LazyLock<RuleSet> = std::sync::LazyLock::new(|| RuleSet {
            id: "phq9".to_string(),
            name: "PHQ-9".to_string(),
            description: Some(
                "Depression severity over the last two weeks. Each item: 0 = not at all, \
                 1 = several days, 2 = more than half the days, 3 = nearly every day."
                    .to_string(),
            ),
            reference: Some(
                "Kroenke K, Spitzer RL, Williams JB. The PHQ-9: validity of a brief depression \
                 severity measure. J Gen Intern Med. 2001;16(9):606-613."
                    .to_string(),
            ),
            fields: ITEMS.iter().map(|(name, label)| item(name, label)).collect(),
            scorer: Scorer::Formula {
                expr: Expr::add(ITEMS.iter().map(|(name, _)| Expr::field(name)).collect()),
            },
            score_range: ScoreRange {
                min: 0.0,
                max: 27.0,
                step: Some(1.0),
            },
            bands: vec![
                band(0.0, 4.0, "Minimal", "Minimal or no depression symptoms."),
                band(
                    5.0,
                    9.0,
                    "Mild",
                    "Mild symptoms. Watchful waiting and repeat PHQ-9 at follow-up.",
                ),
                band(
                    10.0,
                    14.0,
                    "Moderate",
                    "Moderate symptoms. Consider a treatment plan with counselling or \
                     pharmacotherapy.",
                ),
                band(
                    15.0,
                    19.0,
                    "Moderately Severe",
                    "Moderately severe symptoms. Active treatment with pharmacotherapy and/or \
                     psychotherapy is usually indicated.",
                ),
                Band {
                    lower: 20.0,
                    upper: 27.0,
                    label: "Severe".to_string(),
                    guidance: "Severe symptoms. Initiate treatment promptly; any positive answer \
                               on the self-harm item warrants an immediate safety assessment \
                               regardless of the total score."
                        .to_string(),
                    actions: vec![
                        "Assess suicide risk directly".to_string(),
                        "Consider referral to a mental health specialist".to_string(),
                    ],
                },
            ],
        });
        &RULES
    }
}

fn item(name: &str, label: &str) -> FieldSpec {
    FieldSpec {
        name: name.to_string(),
        label: label.to_string(),
        kind: FieldKind::Integer { min: 0, max: 3 },
        required: true,
        unit: None,
        description: None,
    }
}

fn band(lower: f64, upper: f64, label: &str, guidance: &str) -> Band {
    Band {
        lower,
        upper,
        label: label.to_string(),
        guidance: guidance.to_string(),
        actions: vec![],
    }
}
