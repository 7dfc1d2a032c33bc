use std::collections::BTreeSet;

use acuity_instruments::error::InstrumentError;
use acuity_instruments::{all_instruments, get_instrument, load_instrument};

#[test]
fn every_shipped_rule_set_verifies() {
    for instrument in all_instruments() {
        let result = instrument.rule_set().verify();
        assert!(
            result.is_ok(),
            "{}: {:?}",
            instrument.id(),
            result.unwrap_err()
        );
    }
}

#[test]
fn instrument_ids_are_unique_and_match_rule_sets() {
    let mut seen = BTreeSet::new();
    for instrument in all_instruments() {
        assert!(seen.insert(instrument.id().to_string()), "{}", instrument.id());
        assert_eq!(instrument.id(), instrument.rule_set().id);
        assert_eq!(instrument.name(), instrument.rule_set().name);
    }
}

/// Walk every representable score on the instrument's lattice and check
/// exactly one band claims it: no gaps, no ambiguity.
#[test]
fn banding_is_total_and_unambiguous() {
    for instrument in all_instruments() {
        let rules = instrument.rule_set();
        let range = rules.score_range;
        let step = range.step.expect("shipped instruments declare a step");
        let scale = (1.0 / step).round();
        let start = (range.min * scale).round() as i64;
        let end = (range.max * scale).round() as i64;
        for k in start..=end {
            let score = k as f64 / scale;
            let matching = rules.bands.iter().filter(|b| b.contains(score)).count();
            assert_eq!(matching, 1, "{}: score {score}", instrument.id());
        }
    }
}

#[test]
fn lookup_by_id_round_trips() {
    let meld = get_instrument("meld").unwrap();
    assert_eq!(meld.name(), "MELD");
}

#[test]
fn unknown_id_is_none() {
    assert!(get_instrument("apgar").is_none());
}

#[test]
fn load_verifies_and_reports_unknown_ids() {
    assert!(load_instrument("qsofa").is_ok());
    assert!(matches!(
        load_instrument("apgar"),
        Err(InstrumentError::UnknownInstrument(_))
    ));
}
