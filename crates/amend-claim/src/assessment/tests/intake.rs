use super::common::*;
use crate::assessment::domain::{
    AssessedAmounts, AssessmentInfo, ClaimAggregate, ClaimKind, FieldKey, FieldValue, Outcome,
};
use crate::assessment::status::StatusError;
use crate::assessment::submission::AssessmentSubmission;
use crate::assessment::totals::apply_allowed_total;
use rust_decimal_macros::dec;
use serde_json::json;

#[test]
fn crime_record_maps_claimed_and_calculated_columns() {
    let aggregate = crime_claim(Some("INVC"));
    assert_eq!(aggregate.kind(), ClaimKind::Crime);

    let details = aggregate.details();
    assert!(details.escaped);
    assert_eq!(details.fee_code.as_deref(), Some("INVC"));
    assert_eq!(details.claim_summary_fee_id.as_deref(), Some("fee-1"));
    assert_eq!(details.net_profit_cost.submitted, Some(FieldValue::Amount(dec!(1000.00))));
    assert_eq!(details.net_profit_cost.calculated, Some(FieldValue::Amount(dec!(950.00))));
    assert_eq!(details.net_profit_cost.assessed, details.net_profit_cost.submitted);
    assert_eq!(details.fixed_fee.submitted, None);
    assert_eq!(details.fixed_fee.assessed, Some(FieldValue::Amount(dec!(200.00))));
    assert_eq!(details.vat_claimed.submitted, Some(FieldValue::Flag(true)));
    assert_eq!(details.assessed_total_vat.assessed, None);
    assert_eq!(details.allowed_total_incl_vat.assessed, None);
    assert!(aggregate.clone().fields_mut().iter().all(|field| !field.assessable));

    let travel = aggregate.field(FieldKey::Travel).expect("travel field");
    assert_eq!(travel.calculated, Some(FieldValue::Amount(dec!(18.00))));
    assert_eq!(aggregate.field(FieldKey::Waiting).and_then(|f| f.submitted), None);
    assert!(aggregate.field(FieldKey::CounselsCost).is_none());
}

#[test]
fn civil_record_keeps_bolt_ons_that_were_answered() {
    let aggregate = ClaimAggregate::from(civil_record(None));
    assert_eq!(aggregate.kind(), ClaimKind::Civil);

    let ClaimAggregate::Civil(claim) = &aggregate else {
        panic!("expected civil claim, got {aggregate:?}");
    };
    let bolt_ons = &claim.bolt_ons;
    assert_eq!(
        bolt_ons.cmrh_oral.as_ref().and_then(|f| f.calculated),
        Some(FieldValue::Amount(dec!(166.00)))
    );
    assert_eq!(
        bolt_ons.adjourned_hearing.as_ref().and_then(|f| f.submitted),
        Some(FieldValue::Count(0))
    );
    // Fee known, answer missing.
    let substantive = bolt_ons.substantive_hearing.as_ref().expect("fee recorded");
    assert_eq!(substantive.submitted, None);
    assert_eq!(
        claim.counsels_cost.calculated,
        Some(FieldValue::Amount(dec!(100.00)))
    );
}

#[test]
fn mediation_claims_are_civil() {
    let mut record = civil_record_json(Some(false));
    record["areaOfLaw"] = json!("MEDIATION");
    let aggregate = ClaimAggregate::from(
        serde_json::from_value::<crate::assessment::ClaimRecord>(record).expect("record"),
    );
    assert_eq!(aggregate.kind(), ClaimKind::Civil);
}

#[test]
fn claims_without_escape_flag_are_not_escaped() {
    let mut record = crime_record_json(Some("INVC"));
    record["feeCalculation"]
        .as_object_mut()
        .expect("fee calculation object")
        .remove("boltOnDetails");
    let aggregate = ClaimAggregate::from(
        serde_json::from_value::<crate::assessment::ClaimRecord>(record).expect("record"),
    );
    assert!(!aggregate.details().escaped);

    let mut record = crime_record_json(Some("INVC"));
    record["feeCalculation"]
        .as_object_mut()
        .expect("fee calculation object")
        .remove("boltOnDetails");
    record["escaped"] = json!(true);
    let aggregate = ClaimAggregate::from(
        serde_json::from_value::<crate::assessment::ClaimRecord>(record).expect("record"),
    );
    assert!(aggregate.details().escaped);
}

#[test]
fn submission_uses_wire_outcome_and_claim_type_fields() {
    let mut crime = assessed_with(crime_claim(Some("INVB")), Outcome::Reduced);
    apply_allowed_total(&mut crime, dec!(700), dec!(800));

    let submission = AssessmentSubmission::from_aggregate(&crime, "user-7").expect("submission");
    assert_eq!(submission.assessment_outcome, "REDUCED_STILL_ESCAPED");
    assert_eq!(submission.created_by_user_id, "user-7");
    assert_eq!(submission.claim_summary_fee_id.as_deref(), Some("fee-1"));
    assert_eq!(submission.net_profit_costs_amount, Some(dec!(1000.00)));
    assert_eq!(submission.net_travel_costs_amount, Some(dec!(20.00)));
    assert_eq!(submission.net_cost_of_counsel_amount, None);
    assert_eq!(submission.assessed_total_incl_vat, Some(dec!(800.00)));
    assert_eq!(submission.allowed_total_vat, Some(dec!(700.00)));
    assert_eq!(submission.is_vat_applicable, Some(true));

    let payload = serde_json::to_value(&submission).expect("serialize");
    assert!(payload.get("netCostOfCounselAmount").is_none());
    assert_eq!(payload["assessmentOutcome"], "REDUCED_STILL_ESCAPED");

    let civil = assessed_with(civil_claim(), Outcome::PaidInFull);
    let submission = AssessmentSubmission::from_aggregate(&civil, "user-7").expect("submission");
    assert_eq!(submission.net_cost_of_counsel_amount, Some(dec!(120.00)));
    assert_eq!(submission.jr_form_filling_amount, Some(dec!(75.00)));
    assert_eq!(submission.net_travel_costs_amount, None);
    // Counts carry no amount.
    assert_eq!(submission.bolt_on_cmrh_oral_fee, None);
}

#[test]
fn submission_without_outcome_is_refused() {
    match AssessmentSubmission::from_aggregate(&crime_claim(Some("INVC")), "user-7") {
        Err(StatusError::OutcomeNotSelected) => {}
        other => panic!("expected missing outcome, got {other:?}"),
    }
}

#[test]
fn wire_outcomes_parse_back() {
    for outcome in Outcome::ALL {
        assert_eq!(outcome.wire_value().parse::<Outcome>(), Ok(outcome));
        assert_eq!(outcome.form_value().parse::<Outcome>(), Ok(outcome));
    }
    assert!("REDUCED_SOMEWHAT".parse::<Outcome>().is_err());
}

#[test]
fn outcomes_serialize_as_wire_values() {
    for outcome in Outcome::ALL {
        assert_eq!(
            serde_json::to_value(outcome).expect("serialize"),
            json!(outcome.wire_value())
        );
    }
    let legacy: Outcome = serde_json::from_value(json!("REDUCED")).expect("legacy value");
    assert_eq!(legacy, Outcome::Reduced);
}

fn previous_assessment() -> AssessmentInfo {
    AssessmentInfo {
        id: Some("assessment-3".to_string()),
        last_assessment_date: None,
        last_assessed_by: Some("user-2".to_string()),
        last_assessment_outcome: Some(Outcome::Reduced),
        amounts: AssessedAmounts {
            net_profit_costs_amount: Some(dec!(600.00)),
            net_travel_costs_amount: Some(dec!(10.00)),
            is_vat_applicable: Some(false),
            allowed_total_vat: Some(dec!(90.00)),
            allowed_total_incl_vat: Some(dec!(540.00)),
            ..AssessedAmounts::default()
        },
    }
}

#[test]
fn previous_assessment_reapplies_only_for_same_outcome() {
    let mut aggregate = crime_claim(Some("INVC"));
    aggregate.details_mut().last_assessment = Some(previous_assessment());
    assert!(!aggregate.should_reapply_last_assessment(Outcome::Reduced));

    aggregate.details_mut().has_assessment = true;
    assert!(aggregate.should_reapply_last_assessment(Outcome::Reduced));
    assert!(!aggregate.should_reapply_last_assessment(Outcome::PaidInFull));

    aggregate.reapply_last_assessment();
    let details = aggregate.details();
    assert_eq!(details.net_profit_cost.assessed_amount(), Some(dec!(600.00)));
    assert_eq!(details.vat_claimed.assessed, Some(FieldValue::Flag(false)));
    assert_eq!(details.allowed_total_incl_vat.assessed_amount(), Some(dec!(540.00)));
    assert_eq!(details.net_disbursement_amount.assessed_amount(), None);
    assert_eq!(
        aggregate.field(FieldKey::Travel).and_then(|f| f.assessed_amount()),
        Some(dec!(10.00))
    );
}
