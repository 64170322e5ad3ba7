use super::common::*;
use crate::assessment::domain::{FieldValue, Outcome};
use crate::assessment::validation::{
    check_amount, get_errors, ready_to_submit, validate_amount_input, validate_totals_input,
    AmountIssue, FieldError,
};
use rust_decimal_macros::dec;

fn field_ids(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|error| error.field_id.as_str()).collect()
}

#[test]
fn amount_checks_accept_ordinary_values() {
    for raw in ["0", "0.5", "12.34", "999999.99", " 45 ", ""] {
        assert!(check_amount(raw).is_empty(), "{raw:?} rejected");
    }
}

#[test]
fn amount_checks_report_each_problem() {
    assert_eq!(check_amount("abc"), vec![AmountIssue::NotNumeric]);
    assert_eq!(check_amount("£12"), vec![AmountIssue::NotNumeric]);
    assert_eq!(check_amount("-1"), vec![AmountIssue::Negative]);
    assert_eq!(check_amount("1.234"), vec![AmountIssue::TooPrecise]);
    assert_eq!(check_amount("1000000"), vec![AmountIssue::TooLarge]);
    assert_eq!(
        check_amount("-1.234"),
        vec![AmountIssue::Negative, AmountIssue::TooPrecise]
    );
    assert_eq!(
        check_amount("1000000.001"),
        vec![AmountIssue::TooPrecise, AmountIssue::TooLarge]
    );
}

#[test]
fn amount_input_maps_issues_to_message_keys() {
    let blank = validate_amount_input("  ", "profit-cost", "profitCosts");
    assert_eq!(
        blank,
        Err(vec![FieldError::new("profit-cost", "profitCosts.error.required")])
    );

    let too_precise = validate_amount_input("-0.001", "travel", "travelCosts");
    assert_eq!(
        too_precise,
        Err(vec![
            FieldError::new("travel", "travelCosts.error.min"),
            FieldError::new("travel", "travelCosts.error.decimalPlaces"),
        ])
    );

    let amount = validate_amount_input("12.5", "travel", "travelCosts").expect("valid amount");
    assert_eq!(amount.to_string(), "12.50");
}

#[test]
fn totals_input_reports_both_sides() {
    let result = validate_totals_input(
        "",
        "abc",
        ["allowed-total-vat", "allowed-total-incl-vat"],
        ["allowedTotals.allowedTotalVat", "allowedTotals.allowedTotalInclVat"],
    );
    assert_eq!(
        result,
        Err(vec![
            FieldError::new("allowed-total-vat", "allowedTotals.allowedTotalVat.error.required"),
            FieldError::new(
                "allowed-total-incl-vat",
                "allowedTotals.allowedTotalInclVat.error.invalid"
            ),
        ])
    );

    let ok = validate_totals_input("20", "120", ["a", "b"], ["a", "b"]).expect("valid pair");
    assert_eq!(ok, (dec!(20.00), dec!(120.00)));
}

#[test]
fn required_errors_follow_page_order() {
    let mut aggregate = assessed_with(crime_claim(Some("INVC")), Outcome::PaidInFull);
    aggregate.details_mut().net_profit_cost.assessed = None;

    let errors = get_errors(&aggregate);
    assert_eq!(
        field_ids(&errors),
        vec![
            "profit-cost",
            "waiting",
            "assessed-total-vat",
            "assessed-total-incl-vat",
            "allowed-total-vat",
            "allowed-total-incl-vat",
        ]
    );
    assert_eq!(errors[0].message_key, "claimSummary.rows.profitCost.error");
    assert_eq!(errors[5].message_key, "claimSummary.rows.allowedTotalInclVat.error");
}

#[test]
fn civil_required_errors_cover_its_own_costs() {
    let aggregate = assessed_with(civil_claim(), Outcome::Reduced);
    let errors = get_errors(&aggregate);
    assert_eq!(
        field_ids(&errors),
        vec!["detention-travel", "allowed-total-vat", "allowed-total-incl-vat"]
    );
}

#[test]
fn nilled_claims_have_nothing_required() {
    let mut aggregate = assessed_with(crime_claim(Some("INVC")), Outcome::Nilled);
    aggregate.details_mut().net_profit_cost.assessed = None;
    assert!(get_errors(&aggregate).is_empty());
}

#[test]
fn submission_requires_outcome_and_vat_answer() {
    let mut unassessed = crime_claim(Some("INVC"));
    match ready_to_submit(&unassessed) {
        Err(errors) => assert_eq!(field_ids(&errors), vec!["assessment-outcome"]),
        other => panic!("expected missing outcome, got {other:?}"),
    }

    unassessed = assessed_with(unassessed, Outcome::Nilled);
    unassessed.details_mut().vat_claimed.assessed = None;
    match ready_to_submit(&unassessed) {
        Err(errors) => assert_eq!(
            errors,
            vec![FieldError::new(
                "liability-for-vat",
                "assessmentOutcome.liabilityForVatRequiredError"
            )]
        ),
        other => panic!("expected missing VAT answer, got {other:?}"),
    }

    unassessed.details_mut().vat_claimed.assessed = Some(FieldValue::Flag(false));
    assert_eq!(ready_to_submit(&unassessed), Ok(()));
}
