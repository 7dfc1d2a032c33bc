use acuity_core::rules::{Band, RuleSet};

use crate::error::EvalError;

/// Select the first band whose inclusive `[lower, upper]` range contains
/// the score.
///
/// A miss means the rule set's bands do not cover its scorer's codomain
/// (or the scorer produced a non-finite value, which fails every
/// comparison): an authoring defect, logged loudly, never defaulted.
pub fn interpret<'a>(rules: &'a RuleSet, score: f64) -> Result<&'a Band, EvalError> {
    match rules.bands.iter().find(|band| band.contains(score)) {
        Some(band) => Ok(band),
        None => {
            tracing::error!(rule_set = %rules.id, score, "score matched no band");
            Err(EvalError::UnbandedScore {
                rule_set: rules.id.clone(),
                score,
            })
        }
    }
}
