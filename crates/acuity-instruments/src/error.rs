use thiserror::Error;

use acuity_core::error::DefinitionError;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("unknown instrument: {0}")]
    UnknownInstrument(String),

    #[error("instrument '{id}' has a defective rule set: {errors:?}")]
    DefectiveRuleSet {
        id: String,
        errors: Vec<DefinitionError>,
    },
}
