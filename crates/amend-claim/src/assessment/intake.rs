use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{
    AreaOfLaw, AssessmentInfo, BoltOns, CivilClaim, ClaimAggregate, ClaimDetails, ClaimField,
    ClaimId, ClaimKind, CrimeClaim, FieldKey, FieldValue,
};

/// Claim as returned by the upstream claims API, with its fee calculation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    pub id: String,
    pub submission_id: String,
    pub area_of_law: AreaOfLaw,
    pub unique_file_number: Option<String>,
    pub provider_account_number: Option<String>,
    #[serde(default)]
    pub escaped: Option<bool>,
    #[serde(default)]
    pub has_assessment: bool,
    pub is_vat_applicable: Option<bool>,
    pub net_profit_costs_amount: Option<Decimal>,
    pub net_disbursement_amount: Option<Decimal>,
    pub disbursements_vat_amount: Option<Decimal>,
    pub total_value: Option<Decimal>,
    pub travel_costs_amount: Option<Decimal>,
    pub net_waiting_costs_amount: Option<Decimal>,
    pub net_counsel_costs_amount: Option<Decimal>,
    pub detention_travel_waiting_costs_amount: Option<Decimal>,
    pub jr_form_filling_amount: Option<Decimal>,
    pub adjourned_hearing_fee_amount: Option<u32>,
    pub cmrh_oral_count: Option<u32>,
    pub cmrh_telephone_count: Option<u32>,
    pub ho_interview: Option<u32>,
    pub is_substantive_hearing: Option<bool>,
    #[serde(default)]
    pub fee_calculation: FeeCalculation,
    pub last_assessment: Option<AssessmentInfo>,
}

/// System-computed reference values for a claim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeCalculation {
    pub claim_summary_fee_id: Option<String>,
    pub fee_code: Option<String>,
    pub fee_code_description: Option<String>,
    pub fixed_fee_amount: Option<Decimal>,
    pub net_profit_costs_amount: Option<Decimal>,
    pub disbursement_amount: Option<Decimal>,
    pub disbursement_vat_amount: Option<Decimal>,
    pub net_travel_costs_amount: Option<Decimal>,
    pub net_waiting_costs_amount: Option<Decimal>,
    pub net_cost_of_counsel_amount: Option<Decimal>,
    pub detention_travel_and_waiting_costs_amount: Option<Decimal>,
    pub jr_form_filling_amount: Option<Decimal>,
    pub total_amount: Option<Decimal>,
    pub vat_indicator: Option<bool>,
    #[serde(default)]
    pub bolt_on_details: BoltOnDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoltOnDetails {
    pub escape_case_flag: Option<bool>,
    pub bolt_on_adjourned_hearing_fee: Option<Decimal>,
    pub bolt_on_cmrh_telephone_fee: Option<Decimal>,
    pub bolt_on_cmrh_oral_fee: Option<Decimal>,
    pub bolt_on_home_office_interview_fee: Option<Decimal>,
    pub bolt_on_substantive_hearing_fee: Option<Decimal>,
}

/// Claimed value as submitted, fee calculation as calculated; the assessed
/// column starts as a copy of the claimed value.
fn amount_field(key: FieldKey, submitted: Option<Decimal>, calculated: Option<Decimal>) -> ClaimField {
    let submitted = submitted.map(FieldValue::Amount);
    ClaimField::new(key)
        .with_submitted(submitted)
        .with_calculated(calculated.map(FieldValue::Amount))
        .with_assessed(submitted)
}

fn bolt_on_field(
    key: FieldKey,
    submitted: Option<FieldValue>,
    fee: Option<Decimal>,
) -> Option<ClaimField> {
    if submitted.is_none() && fee.is_none() {
        return None;
    }
    Some(
        ClaimField::new(key)
            .with_submitted(submitted)
            .with_calculated(fee.map(FieldValue::Amount))
            .with_assessed(submitted),
    )
}

impl From<ClaimRecord> for ClaimAggregate {
    fn from(record: ClaimRecord) -> Self {
        let fees = &record.fee_calculation;
        let mut details = ClaimDetails::new(
            ClaimId(record.id.clone()),
            record.submission_id.clone(),
            record.area_of_law,
        );

        details.claim_summary_fee_id = fees.claim_summary_fee_id.clone();
        details.unique_file_number = record.unique_file_number.clone();
        details.provider_account_number = record.provider_account_number.clone();
        details.fee_code = fees.fee_code.clone();
        details.fee_code_description = fees.fee_code_description.clone();
        details.escaped = fees
            .bolt_on_details
            .escape_case_flag
            .or(record.escaped)
            .unwrap_or(false);
        details.has_assessment = record.has_assessment;
        details.last_assessment = record.last_assessment.clone();

        let fixed_fee = fees.fixed_fee_amount.map(FieldValue::Amount);
        details.fixed_fee = ClaimField::new(FieldKey::FixedFee)
            .with_calculated(fixed_fee)
            .with_assessed(fixed_fee);
        details.net_profit_cost = amount_field(
            FieldKey::ProfitCost,
            record.net_profit_costs_amount,
            fees.net_profit_costs_amount,
        );
        details.net_disbursement_amount = amount_field(
            FieldKey::Disbursements,
            record.net_disbursement_amount,
            fees.disbursement_amount,
        );
        details.disbursement_vat_amount = amount_field(
            FieldKey::DisbursementsVat,
            record.disbursements_vat_amount,
            fees.disbursement_vat_amount,
        );
        details.total_amount = amount_field(FieldKey::Total, record.total_value, fees.total_amount);

        let vat_claimed = record.is_vat_applicable.map(FieldValue::Flag);
        details.vat_claimed = ClaimField::new(FieldKey::Vat)
            .with_submitted(vat_claimed)
            .with_calculated(fees.vat_indicator.map(FieldValue::Flag))
            .with_assessed(vat_claimed);

        match record.area_of_law.claim_kind() {
            ClaimKind::Crime => ClaimAggregate::Crime(CrimeClaim {
                travel_costs: amount_field(
                    FieldKey::Travel,
                    record.travel_costs_amount,
                    fees.net_travel_costs_amount,
                ),
                waiting_costs: amount_field(
                    FieldKey::Waiting,
                    record.net_waiting_costs_amount,
                    fees.net_waiting_costs_amount,
                ),
                details,
            }),
            ClaimKind::Civil => {
                let bolt_on_fees = &fees.bolt_on_details;
                let count = |value: Option<u32>| value.map(FieldValue::Count);
                ClaimAggregate::Civil(CivilClaim {
                    counsels_cost: amount_field(
                        FieldKey::CounselsCost,
                        record.net_counsel_costs_amount,
                        fees.net_cost_of_counsel_amount,
                    ),
                    detention_travel_waiting_costs: amount_field(
                        FieldKey::DetentionTravel,
                        record.detention_travel_waiting_costs_amount,
                        fees.detention_travel_and_waiting_costs_amount,
                    ),
                    jr_form_filling_cost: amount_field(
                        FieldKey::JrFormFilling,
                        record.jr_form_filling_amount,
                        fees.jr_form_filling_amount,
                    ),
                    bolt_ons: BoltOns {
                        adjourned_hearing: bolt_on_field(
                            FieldKey::AdjournedHearingFee,
                            count(record.adjourned_hearing_fee_amount),
                            bolt_on_fees.bolt_on_adjourned_hearing_fee,
                        ),
                        cmrh_oral: bolt_on_field(
                            FieldKey::CmrhOral,
                            count(record.cmrh_oral_count),
                            bolt_on_fees.bolt_on_cmrh_oral_fee,
                        ),
                        cmrh_telephone: bolt_on_field(
                            FieldKey::CmrhTelephone,
                            count(record.cmrh_telephone_count),
                            bolt_on_fees.bolt_on_cmrh_telephone_fee,
                        ),
                        ho_interview: bolt_on_field(
                            FieldKey::HomeOffice,
                            count(record.ho_interview),
                            bolt_on_fees.bolt_on_home_office_interview_fee,
                        ),
                        substantive_hearing: bolt_on_field(
                            FieldKey::SubstantiveHearing,
                            record.is_substantive_hearing.map(FieldValue::Flag),
                            bolt_on_fees.bolt_on_substantive_hearing_fee,
                        ),
                    },
                    details,
                })
            }
        }
    }
}
