//! acuity-core
//!
//! Pure domain types for clinical scoring instruments: field specs,
//! scoring strategies, interpretation bands, and authoring-time rule set
//! verification. No I/O — this is the shared vocabulary of the acuity
//! workspace.

pub mod error;
pub mod field;
pub mod formula;
pub mod result;
pub mod rules;
