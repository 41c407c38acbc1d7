use super::common::*;
use crate::workflows::dispatch::domain::{
    encode_specializations, parse_specializations, Specialization,
};

#[test]
fn specialization_set_round_trips_through_delimited_form() {
    let set = specs(&[
        Specialization::Ac,
        Specialization::Television,
        Specialization::WaterPurifier,
    ]);

    let encoded = encode_specializations(&set);
    assert_eq!(encoded, "AC,TV,Water Purifier");

    let decoded = parse_specializations(&encoded).expect("known labels parse");
    assert_eq!(decoded, set);
}

#[test]
fn specialization_parsing_is_case_insensitive_and_trims() {
    let decoded = parse_specializations(" ac , washing machine ").expect("labels parse");
    assert_eq!(
        decoded,
        specs(&[Specialization::Ac, Specialization::WashingMachine])
    );
}

#[test]
fn unknown_specialization_is_rejected() {
    let err = parse_specializations("AC,Toaster").expect_err("unknown label fails");
    assert!(err.to_string().contains("Toaster"));
}

#[test]
fn empty_delimited_field_parses_to_an_empty_set() {
    let decoded = parse_specializations("").expect("empty field parses");
    assert!(decoded.is_empty());
}

#[test]
fn location_requires_both_coordinates() {
    let mut submission = ac_submission();
    assert!(submission.location().is_some());

    submission.longitude = None;
    assert!(submission.location().is_none());
}

#[test]
fn error_code_normalization_collapses_sentinels() {
    let mut submission = ac_submission();

    submission.error_code = Some(" e1 ".to_string());
    assert_eq!(submission.normalized_error_code().as_deref(), Some("E1"));

    for sentinel in ["NOT_PROVIDED", "unknown", "  ", ""] {
        submission.error_code = Some(sentinel.to_string());
        assert_eq!(submission.normalized_error_code(), None, "sentinel {sentinel:?}");
    }

    submission.error_code = None;
    assert_eq!(submission.normalized_error_code(), None);
}
