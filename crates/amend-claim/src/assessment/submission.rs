use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{ClaimAggregate, ClaimField, FieldValue};
use super::status::StatusError;
use super::totals::submission_assessed_totals;

/// Payload for the assessment-creation endpoint of the claims API: one
/// assessed amount per upstream field name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub claim_id: String,
    pub claim_summary_fee_id: Option<String>,
    pub assessment_outcome: String,
    pub created_by_user_id: String,
    pub fixed_fee_amount: Option<Decimal>,
    pub net_profit_costs_amount: Option<Decimal>,
    pub disbursement_amount: Option<Decimal>,
    pub disbursement_vat_amount: Option<Decimal>,
    pub is_vat_applicable: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_travel_costs_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_waiting_costs_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_cost_of_counsel_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detention_travel_and_waiting_costs_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jr_form_filling_amount: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_on_adjourned_hearing_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_on_cmrh_telephone_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_on_cmrh_oral_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_on_home_office_interview_fee: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolt_on_substantive_hearing_fee: Option<Decimal>,
    pub assessed_total_vat: Option<Decimal>,
    pub assessed_total_incl_vat: Option<Decimal>,
    pub allowed_total_vat: Option<Decimal>,
    pub allowed_total_incl_vat: Option<Decimal>,
}

// Only monetary assessed values are sent; counts and flags have no amount.
fn amount(field: Option<&ClaimField>) -> Option<Decimal> {
    field.and_then(ClaimField::assessed_amount)
}

impl AssessmentSubmission {
    pub fn from_aggregate(
        aggregate: &ClaimAggregate,
        created_by_user_id: &str,
    ) -> Result<Self, StatusError> {
        let details = aggregate.details();
        let outcome = details
            .assessment_outcome
            .ok_or(StatusError::OutcomeNotSelected)?;
        let assessed_totals = submission_assessed_totals(aggregate);

        let mut submission = Self {
            claim_id: details.claim_id.0.clone(),
            claim_summary_fee_id: details.claim_summary_fee_id.clone(),
            assessment_outcome: outcome.wire_value().to_string(),
            created_by_user_id: created_by_user_id.to_string(),
            fixed_fee_amount: details.fixed_fee.assessed_amount(),
            net_profit_costs_amount: details.net_profit_cost.assessed_amount(),
            disbursement_amount: details.net_disbursement_amount.assessed_amount(),
            disbursement_vat_amount: details.disbursement_vat_amount.assessed_amount(),
            is_vat_applicable: details
                .vat_claimed
                .assessed
                .as_ref()
                .and_then(FieldValue::as_flag),
            net_travel_costs_amount: None,
            net_waiting_costs_amount: None,
            net_cost_of_counsel_amount: None,
            detention_travel_and_waiting_costs_amount: None,
            jr_form_filling_amount: None,
            bolt_on_adjourned_hearing_fee: None,
            bolt_on_cmrh_telephone_fee: None,
            bolt_on_cmrh_oral_fee: None,
            bolt_on_home_office_interview_fee: None,
            bolt_on_substantive_hearing_fee: None,
            assessed_total_vat: assessed_totals.vat,
            assessed_total_incl_vat: assessed_totals.incl_vat,
            allowed_total_vat: details.allowed_total_vat.assessed_amount(),
            allowed_total_incl_vat: details.allowed_total_incl_vat.assessed_amount(),
        };

        match aggregate {
            ClaimAggregate::Crime(claim) => {
                submission.net_travel_costs_amount = claim.travel_costs.assessed_amount();
                submission.net_waiting_costs_amount = claim.waiting_costs.assessed_amount();
            }
            ClaimAggregate::Civil(claim) => {
                let bolt_ons = &claim.bolt_ons;
                submission.net_cost_of_counsel_amount = claim.counsels_cost.assessed_amount();
                submission.detention_travel_and_waiting_costs_amount =
                    claim.detention_travel_waiting_costs.assessed_amount();
                submission.jr_form_filling_amount = claim.jr_form_filling_cost.assessed_amount();
                submission.bolt_on_adjourned_hearing_fee =
                    amount(bolt_ons.adjourned_hearing.as_ref());
                submission.bolt_on_cmrh_telephone_fee = amount(bolt_ons.cmrh_telephone.as_ref());
                submission.bolt_on_cmrh_oral_fee = amount(bolt_ons.cmrh_oral.as_ref());
                submission.bolt_on_home_office_interview_fee =
                    amount(bolt_ons.ho_interview.as_ref());
                submission.bolt_on_substantive_hearing_fee =
                    amount(bolt_ons.substantive_hearing.as_ref());
            }
        }

        Ok(submission)
    }
}
