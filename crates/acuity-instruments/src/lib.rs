//! acuity-instruments
//!
//! Clinical scoring instrument definitions. Pure data — each instrument
//! is a hand-authored rule set transcribed from its published primary
//! source, with fields, point tables or formulas, and interpretation
//! bands.

pub mod error;
pub mod instruments;

use acuity_core::rules::RuleSet;

use crate::error::InstrumentError;

/// Trait implemented by each clinical scoring instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "qsofa", "meld").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "qSOFA", "MELD").
    fn name(&self) -> &str;

    /// The declarative rule set evaluated for this instrument.
    fn rule_set(&self) -> &RuleSet;
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::qsofa::Qsofa),
        Box::new(instruments::sofa::Sofa),
        Box::new(instruments::curb65::Curb65),
        Box::new(instruments::abcd2::Abcd2),
        Box::new(instruments::gcs::Gcs),
        Box::new(instruments::wells_dvt::WellsDvt),
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::meld::Meld),
        Box::new(instruments::fib4::Fib4),
        Box::new(instruments::anion_gap::AnionGap),
        Box::new(instruments::rancho::Rancho),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// Look up an instrument by ID, verifying its rule set.
pub fn load_instrument(id: &str) -> Result<Box<dyn Instrument>, InstrumentError> {
    let instrument =
        get_instrument(id).ok_or_else(|| InstrumentError::UnknownInstrument(id.to_string()))?;
    instrument
        .rule_set()
        .verify()
        .map_err(|errors| InstrumentError::DefectiveRuleSet {
            id: id.to_string(),
            errors,
        })?;
    Ok(instrument)
}
