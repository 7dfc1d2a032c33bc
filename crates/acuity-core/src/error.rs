use thiserror::Error;

/// Authoring-time defects in a rule set definition. These indicate the
/// static clinical configuration needs fixing, never the user's input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DefinitionError {
    #[error("duplicate field name '{0}'")]
    DuplicateField(String),

    #[error("enum field '{0}' declares no options")]
    EmptyEnumDomain(String),

    #[error("enum field '{field}' repeats option '{token}'")]
    DuplicateOption { field: String, token: String },

    #[error("field '{field}' has an inverted domain ({min} > {max})")]
    InvertedDomain { field: String, min: f64, max: f64 },

    #[error("scorer references undeclared field '{0}'")]
    UnknownScorerField(String),

    #[error("field '{0}' has more than one point allocation")]
    DuplicateAllocation(String),

    #[error("field '{0}' has a point allocation with no entries")]
    EmptyAllocation(String),

    #[error("point criterion for field '{0}' does not match the field's kind")]
    CriterionMismatch(String),

    #[error("point entry for field '{field}' names unknown option '{token}'")]
    UnknownCriterionToken { field: String, token: String },

    #[error("point entries for field '{0}' do not cover its domain")]
    PointTableGap(String),

    #[error("formula references non-numeric field '{0}'")]
    NonNumericFormulaField(String),

    #[error("formula references optional field '{0}'; formula inputs must be required")]
    OptionalFormulaField(String),

    #[error("rule set declares no bands")]
    NoBands,

    #[error("band '{0}' has an inverted range")]
    InvertedBand(String),

    #[error("bands '{first}' and '{second}' overlap")]
    BandOverlap { first: String, second: String },

    #[error("gap between bands '{first}' and '{second}'")]
    BandGap { first: String, second: String },

    #[error("bands do not cover the declared score range [{min}, {max}]")]
    BandCoverage { min: f64, max: f64 },

    #[error("point table can produce scores in [{min}, {max}], outside the declared score range")]
    ScoreRangeMismatch { min: f64, max: f64 },
}
