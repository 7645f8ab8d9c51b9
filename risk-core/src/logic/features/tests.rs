//! Tests for request normalization

use serde_json::json;

use super::{title_case, FeeStatus, StudentObservation};

#[test]
fn test_title_case() {
    assert_eq!(title_case("overdue"), "Overdue");
    assert_eq!(title_case("PENDING"), "Pending");
    assert_eq!(title_case("part-paid"), "Part-Paid");
    assert_eq!(title_case("not paid"), "Not Paid");
    assert_eq!(title_case(""), "");
}

#[test]
fn test_fee_normalize_collapses_unknown_to_paid() {
    assert_eq!(FeeStatus::normalize(" overdue "), FeeStatus::Overdue);
    assert_eq!(FeeStatus::normalize("partial"), FeeStatus::Partial);
    assert_eq!(FeeStatus::normalize("waived"), FeeStatus::Paid);
    assert_eq!(FeeStatus::normalize("nan"), FeeStatus::Paid);
}

#[test]
fn test_observation_defaults_on_empty_body() {
    let obs = StudentObservation::from_json(&json!({}));
    assert_eq!(obs, StudentObservation::default());
    assert_eq!(obs.fee_status, "Paid");
}

#[test]
fn test_observation_defaults_on_non_object() {
    let obs = StudentObservation::from_json(&json!([1, 2, 3]));
    assert_eq!(obs, StudentObservation::default());
}

#[test]
fn test_observation_normalizes_fields() {
    let obs = StudentObservation::from_json(&json!({
        "attendance": 72.5,
        "backlogs": 2,
        "fee_status": "pending"
    }));

    assert_eq!(obs.attendance, 72.5);
    assert_eq!(obs.backlogs, 2);
    assert_eq!(obs.fee_status, "Pending");
    assert_eq!(obs.fee(), Some(FeeStatus::Pending));
}

#[test]
fn test_observation_coerces_strings_and_fractions() {
    let obs = StudentObservation::from_json(&json!({
        "attendance": "64.0",
        "backlogs": 2.9,
        "fee_status": null
    }));

    assert_eq!(obs.attendance, 64.0);
    assert_eq!(obs.backlogs, 2);
    assert_eq!(obs.fee_status, "Paid");
}

#[test]
fn test_observation_bad_values_default() {
    let obs = StudentObservation::from_json(&json!({
        "attendance": "lots",
        "backlogs": -3,
        "fee_status": "   "
    }));

    assert_eq!(obs.attendance, 0.0);
    assert_eq!(obs.backlogs, 0);
    assert_eq!(obs.fee_status, "Paid");
}

#[test]
fn test_observation_keeps_unknown_fee() {
    let obs = StudentObservation::from_json(&json!({ "fee_status": "SCHOLARSHIP" }));
    assert_eq!(obs.fee_status, "Scholarship");
    assert_eq!(obs.fee(), None);
}
