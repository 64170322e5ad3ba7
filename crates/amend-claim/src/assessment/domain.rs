use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::views::format::format_currency;

/// Identifier of a claim within the upstream claims service.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(pub String);

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Value held in one column of a claim field. The shape depends on the field:
/// costs are amounts, VAT liability is a flag and most bolt-ons are counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Amount(Decimal),
    Flag(bool),
    Count(u32),
}

impl FieldValue {
    pub fn as_amount(&self) -> Option<Decimal> {
        match self {
            FieldValue::Amount(amount) => Some(*amount),
            FieldValue::Flag(_) | FieldValue::Count(_) => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            FieldValue::Amount(_) | FieldValue::Count(_) => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Amount(amount) => f.write_str(&format_currency(*amount)),
            FieldValue::Flag(true) => f.write_str("Yes"),
            FieldValue::Flag(false) => f.write_str("No"),
            FieldValue::Count(count) => write!(f, "{count}"),
        }
    }
}

/// Stable identifier of a line item. The camelCase form doubles as the
/// suffix of the row label and error message keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldKey {
    FixedFee,
    ProfitCost,
    Disbursements,
    DisbursementsVat,
    CounselsCost,
    DetentionTravel,
    JrFormFilling,
    AdjournedHearingFee,
    CmrhTelephone,
    CmrhOral,
    HomeOffice,
    SubstantiveHearing,
    Vat,
    Total,
    Travel,
    Waiting,
    AssessedTotalVat,
    AssessedTotalInclVat,
    AllowedTotalVat,
    AllowedTotalInclVat,
}

impl FieldKey {
    pub const fn as_str(self) -> &'static str {
        match self {
            FieldKey::FixedFee => "fixedFee",
            FieldKey::ProfitCost => "profitCost",
            FieldKey::Disbursements => "disbursements",
            FieldKey::DisbursementsVat => "disbursementsVat",
            FieldKey::CounselsCost => "counselsCost",
            FieldKey::DetentionTravel => "detentionTravel",
            FieldKey::JrFormFilling => "jrFormFilling",
            FieldKey::AdjournedHearingFee => "adjournedHearingFee",
            FieldKey::CmrhTelephone => "cmrhTelephone",
            FieldKey::CmrhOral => "cmrhOral",
            FieldKey::HomeOffice => "homeOffice",
            FieldKey::SubstantiveHearing => "substantiveHearing",
            FieldKey::Vat => "vat",
            FieldKey::Total => "total",
            FieldKey::Travel => "travel",
            FieldKey::Waiting => "waiting",
            FieldKey::AssessedTotalVat => "assessedTotalVat",
            FieldKey::AssessedTotalInclVat => "assessedTotalInclVat",
            FieldKey::AllowedTotalVat => "allowedTotalVat",
            FieldKey::AllowedTotalInclVat => "allowedTotalInclVat",
        }
    }

    /// Role the field plays on every claim that carries it.
    pub const fn tag(self) -> FieldTag {
        match self {
            FieldKey::FixedFee => FieldTag::FixedFee,
            FieldKey::ProfitCost => FieldTag::Cost(CostKind::ProfitCosts),
            FieldKey::Disbursements => FieldTag::Cost(CostKind::Disbursements),
            FieldKey::DisbursementsVat => FieldTag::Cost(CostKind::DisbursementsVat),
            FieldKey::CounselsCost => FieldTag::Cost(CostKind::CounselCosts),
            FieldKey::DetentionTravel => FieldTag::Cost(CostKind::DetentionTravelAndWaitingCosts),
            FieldKey::JrFormFilling => FieldTag::Cost(CostKind::JrFormFillingCosts),
            FieldKey::Travel => FieldTag::Cost(CostKind::TravelCosts),
            FieldKey::Waiting => FieldTag::Cost(CostKind::WaitingCosts),
            FieldKey::AdjournedHearingFee
            | FieldKey::CmrhTelephone
            | FieldKey::CmrhOral
            | FieldKey::HomeOffice
            | FieldKey::SubstantiveHearing => FieldTag::BoltOn,
            FieldKey::Vat => FieldTag::VatLiability,
            FieldKey::Total => FieldTag::GrandTotal,
            FieldKey::AssessedTotalVat | FieldKey::AssessedTotalInclVat => FieldTag::AssessedTotal,
            FieldKey::AllowedTotalVat | FieldKey::AllowedTotalInclVat => FieldTag::AllowedTotal,
        }
    }

    pub fn label_key(self) -> String {
        format!("claimSummary.rows.{}", self.as_str())
    }

    pub fn error_key(self) -> String {
        format!("claimSummary.rows.{}.error", self.as_str())
    }

    /// Kebab-case identifier used to anchor validation messages, e.g. `profit-cost`.
    pub fn field_id(self) -> String {
        to_field_id(self.as_str())
    }
}

impl fmt::Display for FieldKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub(crate) fn to_field_id(key: &str) -> String {
    let mut id = String::with_capacity(key.len() + 4);
    let mut previous_lower = false;
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            if previous_lower {
                id.push('-');
            }
            id.push(ch.to_ascii_lowercase());
            previous_lower = false;
        } else {
            id.push(ch);
            previous_lower = ch.is_ascii_lowercase() || ch.is_ascii_digit();
        }
    }
    id
}

/// Semantic role of a field; drives both the rule engine and the edit-route lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "role", content = "cost", rename_all = "snake_case")]
pub enum FieldTag {
    Cost(CostKind),
    BoltOn,
    AllowedTotal,
    AssessedTotal,
    VatLiability,
    FixedFee,
    GrandTotal,
}

/// Editable cost lines, each with its own change page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CostKind {
    ProfitCosts,
    Disbursements,
    DisbursementsVat,
    CounselCosts,
    DetentionTravelAndWaitingCosts,
    JrFormFillingCosts,
    TravelCosts,
    WaitingCosts,
}

impl CostKind {
    pub const ALL: [CostKind; 8] = [
        CostKind::ProfitCosts,
        CostKind::Disbursements,
        CostKind::DisbursementsVat,
        CostKind::CounselCosts,
        CostKind::DetentionTravelAndWaitingCosts,
        CostKind::JrFormFillingCosts,
        CostKind::TravelCosts,
        CostKind::WaitingCosts,
    ];

    /// Path segment of the change page for this cost.
    pub const fn path(self) -> &'static str {
        match self {
            CostKind::ProfitCosts => "profit-costs",
            CostKind::Disbursements => "disbursements",
            CostKind::DisbursementsVat => "disbursements-vat",
            CostKind::CounselCosts => "counsel-costs",
            CostKind::DetentionTravelAndWaitingCosts => "detention-travel-and-waiting-costs",
            CostKind::JrFormFillingCosts => "jr-form-filling-costs",
            CostKind::TravelCosts => "travel-costs",
            CostKind::WaitingCosts => "waiting-costs",
        }
    }

    /// Prefix of the form validation message keys.
    pub const fn message_prefix(self) -> &'static str {
        match self {
            CostKind::ProfitCosts => "profitCosts",
            CostKind::Disbursements => "disbursements",
            CostKind::DisbursementsVat => "disbursementsVat",
            CostKind::CounselCosts => "counselCosts",
            CostKind::DetentionTravelAndWaitingCosts => "detentionTravelAndWaitingCosts",
            CostKind::JrFormFillingCosts => "jrFormFillingCosts",
            CostKind::TravelCosts => "travelCosts",
            CostKind::WaitingCosts => "waitingCosts",
        }
    }

    pub const fn key(self) -> FieldKey {
        match self {
            CostKind::ProfitCosts => FieldKey::ProfitCost,
            CostKind::Disbursements => FieldKey::Disbursements,
            CostKind::DisbursementsVat => FieldKey::DisbursementsVat,
            CostKind::CounselCosts => FieldKey::CounselsCost,
            CostKind::DetentionTravelAndWaitingCosts => FieldKey::DetentionTravel,
            CostKind::JrFormFillingCosts => FieldKey::JrFormFilling,
            CostKind::TravelCosts => FieldKey::Travel,
            CostKind::WaitingCosts => FieldKey::Waiting,
        }
    }

    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.path() == path)
    }
}

/// Top-level decision a caseworker makes about a claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    Nilled,
    #[serde(rename = "REDUCED_STILL_ESCAPED", alias = "REDUCED")]
    Reduced,
    ReducedToFixedFee,
    PaidInFull,
}

impl Outcome {
    pub const ALL: [Outcome; 4] = [
        Outcome::PaidInFull,
        Outcome::Reduced,
        Outcome::ReducedToFixedFee,
        Outcome::Nilled,
    ];

    pub const fn label_key(self) -> &'static str {
        match self {
            Outcome::Nilled => "outcome.nilled",
            Outcome::Reduced => "outcome.reduced",
            Outcome::ReducedToFixedFee => "outcome.reducedToFixedFee",
            Outcome::PaidInFull => "outcome.paidInFull",
        }
    }

    /// Value posted by the outcome radio buttons.
    pub const fn form_value(self) -> &'static str {
        match self {
            Outcome::Nilled => "nilled",
            Outcome::Reduced => "reduced-still-escaped",
            Outcome::ReducedToFixedFee => "reduced-to-fixed-fee-assessed",
            Outcome::PaidInFull => "paid-in-full",
        }
    }

    /// Value expected by the assessment-creation endpoint.
    pub const fn wire_value(self) -> &'static str {
        match self {
            Outcome::Nilled => "NILLED",
            Outcome::Reduced => "REDUCED_STILL_ESCAPED",
            Outcome::ReducedToFixedFee => "REDUCED_TO_FIXED_FEE",
            Outcome::PaidInFull => "PAID_IN_FULL",
        }
    }
}

impl FromStr for Outcome {
    type Err = UnknownOutcome;

    /// Accepts the form value or the wire value.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "nilled" | "NILLED" => Ok(Outcome::Nilled),
            "reduced-still-escaped" | "REDUCED_STILL_ESCAPED" | "REDUCED" => Ok(Outcome::Reduced),
            "reduced-to-fixed-fee-assessed" | "REDUCED_TO_FIXED_FEE" => {
                Ok(Outcome::ReducedToFixedFee)
            }
            "paid-in-full" | "PAID_IN_FULL" => Ok(Outcome::PaidInFull),
            _ => Err(UnknownOutcome(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown assessment outcome '{0}'")]
pub struct UnknownOutcome(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AreaOfLaw {
    CrimeLower,
    LegalHelp,
    Mediation,
}

impl AreaOfLaw {
    pub const fn label_key(self) -> &'static str {
        match self {
            AreaOfLaw::CrimeLower => "areaOfLaw.crimeLower",
            AreaOfLaw::LegalHelp => "areaOfLaw.legalHelp",
            AreaOfLaw::Mediation => "areaOfLaw.mediation",
        }
    }

    pub const fn claim_kind(self) -> ClaimKind {
        match self {
            AreaOfLaw::CrimeLower => ClaimKind::Crime,
            AreaOfLaw::LegalHelp | AreaOfLaw::Mediation => ClaimKind::Civil,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Crime,
    Civil,
}

/// One line item with its three value columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimField {
    pub key: FieldKey,
    pub tag: FieldTag,
    pub submitted: Option<FieldValue>,
    pub calculated: Option<FieldValue>,
    pub assessed: Option<FieldValue>,
    #[serde(default)]
    pub assessable: bool,
}

impl ClaimField {
    pub fn new(key: FieldKey) -> Self {
        Self {
            key,
            tag: key.tag(),
            submitted: None,
            calculated: None,
            assessed: None,
            assessable: false,
        }
    }

    pub fn with_submitted(mut self, value: Option<FieldValue>) -> Self {
        self.submitted = value;
        self
    }

    pub fn with_calculated(mut self, value: Option<FieldValue>) -> Self {
        self.calculated = value;
        self
    }

    pub fn with_assessed(mut self, value: Option<FieldValue>) -> Self {
        self.assessed = value;
        self
    }

    /// The field must be answered before the assessment can be submitted.
    pub fn is_required_and_missing(&self) -> bool {
        self.assessable && self.assessed.is_none()
    }

    pub fn assessed_amount(&self) -> Option<Decimal> {
        self.assessed.as_ref().and_then(FieldValue::as_amount)
    }
}

/// Record of the most recent completed assessment for a claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentInfo {
    pub id: Option<String>,
    pub last_assessment_date: Option<DateTime<Utc>>,
    pub last_assessed_by: Option<String>,
    pub last_assessment_outcome: Option<Outcome>,
    #[serde(default)]
    pub amounts: AssessedAmounts,
}

/// Assessed values as recorded by the claims service, keyed by its field names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessedAmounts {
    pub fixed_fee_amount: Option<Decimal>,
    pub net_profit_costs_amount: Option<Decimal>,
    pub disbursement_amount: Option<Decimal>,
    pub disbursement_vat_amount: Option<Decimal>,
    pub net_cost_of_counsel_amount: Option<Decimal>,
    pub net_travel_costs_amount: Option<Decimal>,
    pub net_waiting_costs_amount: Option<Decimal>,
    pub detention_travel_and_waiting_costs_amount: Option<Decimal>,
    pub jr_form_filling_amount: Option<Decimal>,
    pub is_vat_applicable: Option<bool>,
    pub assessed_total_vat: Option<Decimal>,
    pub assessed_total_incl_vat: Option<Decimal>,
    pub allowed_total_vat: Option<Decimal>,
    pub allowed_total_incl_vat: Option<Decimal>,
}

impl AssessedAmounts {
    fn entries(&self) -> [(FieldKey, Option<FieldValue>); 14] {
        let amount = |value: Option<Decimal>| value.map(FieldValue::Amount);
        [
            (FieldKey::FixedFee, amount(self.fixed_fee_amount)),
            (FieldKey::ProfitCost, amount(self.net_profit_costs_amount)),
            (FieldKey::Disbursements, amount(self.disbursement_amount)),
            (FieldKey::DisbursementsVat, amount(self.disbursement_vat_amount)),
            (FieldKey::CounselsCost, amount(self.net_cost_of_counsel_amount)),
            (FieldKey::Travel, amount(self.net_travel_costs_amount)),
            (FieldKey::Waiting, amount(self.net_waiting_costs_amount)),
            (
                FieldKey::DetentionTravel,
                amount(self.detention_travel_and_waiting_costs_amount),
            ),
            (FieldKey::JrFormFilling, amount(self.jr_form_filling_amount)),
            (FieldKey::Vat, self.is_vat_applicable.map(FieldValue::Flag)),
            (FieldKey::AssessedTotalVat, amount(self.assessed_total_vat)),
            (
                FieldKey::AssessedTotalInclVat,
                amount(self.assessed_total_incl_vat),
            ),
            (FieldKey::AllowedTotalVat, amount(self.allowed_total_vat)),
            (
                FieldKey::AllowedTotalInclVat,
                amount(self.allowed_total_incl_vat),
            ),
        ]
    }
}

/// Attributes and fields shared by Crime and Civil claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimDetails {
    pub claim_id: ClaimId,
    pub submission_id: String,
    pub claim_summary_fee_id: Option<String>,
    pub unique_file_number: Option<String>,
    pub provider_account_number: Option<String>,
    pub area_of_law: AreaOfLaw,
    pub fee_code: Option<String>,
    pub fee_code_description: Option<String>,
    pub escaped: bool,
    pub has_assessment: bool,
    pub fixed_fee: ClaimField,
    pub net_profit_cost: ClaimField,
    pub net_disbursement_amount: ClaimField,
    pub disbursement_vat_amount: ClaimField,
    pub vat_claimed: ClaimField,
    pub total_amount: ClaimField,
    pub assessed_total_vat: ClaimField,
    pub assessed_total_incl_vat: ClaimField,
    pub allowed_total_vat: ClaimField,
    pub allowed_total_incl_vat: ClaimField,
    pub assessment_outcome: Option<Outcome>,
    pub last_assessment: Option<AssessmentInfo>,
}

impl ClaimDetails {
    /// Details with every field present but empty.
    pub fn new(claim_id: ClaimId, submission_id: impl Into<String>, area_of_law: AreaOfLaw) -> Self {
        Self {
            claim_id,
            submission_id: submission_id.into(),
            claim_summary_fee_id: None,
            unique_file_number: None,
            provider_account_number: None,
            area_of_law,
            fee_code: None,
            fee_code_description: None,
            escaped: false,
            has_assessment: false,
            fixed_fee: ClaimField::new(FieldKey::FixedFee),
            net_profit_cost: ClaimField::new(FieldKey::ProfitCost),
            net_disbursement_amount: ClaimField::new(FieldKey::Disbursements),
            disbursement_vat_amount: ClaimField::new(FieldKey::DisbursementsVat),
            vat_claimed: ClaimField::new(FieldKey::Vat),
            total_amount: ClaimField::new(FieldKey::Total),
            assessed_total_vat: ClaimField::new(FieldKey::AssessedTotalVat),
            assessed_total_incl_vat: ClaimField::new(FieldKey::AssessedTotalInclVat),
            allowed_total_vat: ClaimField::new(FieldKey::AllowedTotalVat),
            allowed_total_incl_vat: ClaimField::new(FieldKey::AllowedTotalInclVat),
            assessment_outcome: None,
            last_assessment: None,
        }
    }

    fn fields_mut(&mut self) -> [&mut ClaimField; 10] {
        [
            &mut self.fixed_fee,
            &mut self.net_profit_cost,
            &mut self.net_disbursement_amount,
            &mut self.disbursement_vat_amount,
            &mut self.vat_claimed,
            &mut self.total_amount,
            &mut self.assessed_total_vat,
            &mut self.assessed_total_incl_vat,
            &mut self.allowed_total_vat,
            &mut self.allowed_total_incl_vat,
        ]
    }

    fn field(&self, key: FieldKey) -> Option<&ClaimField> {
        match key {
            FieldKey::FixedFee => Some(&self.fixed_fee),
            FieldKey::ProfitCost => Some(&self.net_profit_cost),
            FieldKey::Disbursements => Some(&self.net_disbursement_amount),
            FieldKey::DisbursementsVat => Some(&self.disbursement_vat_amount),
            FieldKey::Vat => Some(&self.vat_claimed),
            FieldKey::Total => Some(&self.total_amount),
            FieldKey::AssessedTotalVat => Some(&self.assessed_total_vat),
            FieldKey::AssessedTotalInclVat => Some(&self.assessed_total_incl_vat),
            FieldKey::AllowedTotalVat => Some(&self.allowed_total_vat),
            FieldKey::AllowedTotalInclVat => Some(&self.allowed_total_incl_vat),
            _ => None,
        }
    }

    fn field_mut(&mut self, key: FieldKey) -> Option<&mut ClaimField> {
        match key {
            FieldKey::FixedFee => Some(&mut self.fixed_fee),
            FieldKey::ProfitCost => Some(&mut self.net_profit_cost),
            FieldKey::Disbursements => Some(&mut self.net_disbursement_amount),
            FieldKey::DisbursementsVat => Some(&mut self.disbursement_vat_amount),
            FieldKey::Vat => Some(&mut self.vat_claimed),
            FieldKey::Total => Some(&mut self.total_amount),
            FieldKey::AssessedTotalVat => Some(&mut self.assessed_total_vat),
            FieldKey::AssessedTotalInclVat => Some(&mut self.assessed_total_incl_vat),
            FieldKey::AllowedTotalVat => Some(&mut self.allowed_total_vat),
            FieldKey::AllowedTotalInclVat => Some(&mut self.allowed_total_incl_vat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrimeClaim {
    pub details: ClaimDetails,
    pub travel_costs: ClaimField,
    pub waiting_costs: ClaimField,
}

impl CrimeClaim {
    pub fn new(details: ClaimDetails) -> Self {
        Self {
            details,
            travel_costs: ClaimField::new(FieldKey::Travel),
            waiting_costs: ClaimField::new(FieldKey::Waiting),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CivilClaim {
    pub details: ClaimDetails,
    pub counsels_cost: ClaimField,
    pub detention_travel_waiting_costs: ClaimField,
    pub jr_form_filling_cost: ClaimField,
    #[serde(default)]
    pub bolt_ons: BoltOns,
}

impl CivilClaim {
    pub fn new(details: ClaimDetails) -> Self {
        Self {
            details,
            counsels_cost: ClaimField::new(FieldKey::CounselsCost),
            detention_travel_waiting_costs: ClaimField::new(FieldKey::DetentionTravel),
            jr_form_filling_cost: ClaimField::new(FieldKey::JrFormFilling),
            bolt_ons: BoltOns::default(),
        }
    }
}

/// Informational add-ons on a Civil claim. Each may be missing entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoltOns {
    pub adjourned_hearing: Option<ClaimField>,
    pub cmrh_oral: Option<ClaimField>,
    pub cmrh_telephone: Option<ClaimField>,
    pub ho_interview: Option<ClaimField>,
    pub substantive_hearing: Option<ClaimField>,
}

impl BoltOns {
    /// Bolt-ons in display order.
    pub fn in_display_order(&self) -> [Option<&ClaimField>; 5] {
        [
            self.cmrh_oral.as_ref(),
            self.cmrh_telephone.as_ref(),
            self.ho_interview.as_ref(),
            self.substantive_hearing.as_ref(),
            self.adjourned_hearing.as_ref(),
        ]
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut ClaimField> {
        [
            self.adjourned_hearing.as_mut(),
            self.cmrh_oral.as_mut(),
            self.cmrh_telephone.as_mut(),
            self.ho_interview.as_mut(),
            self.substantive_hearing.as_mut(),
        ]
        .into_iter()
        .flatten()
    }
}

/// A claim under assessment, one variant per claim taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClaimAggregate {
    Crime(CrimeClaim),
    Civil(CivilClaim),
}

impl ClaimAggregate {
    pub fn details(&self) -> &ClaimDetails {
        match self {
            ClaimAggregate::Crime(claim) => &claim.details,
            ClaimAggregate::Civil(claim) => &claim.details,
        }
    }

    pub fn details_mut(&mut self) -> &mut ClaimDetails {
        match self {
            ClaimAggregate::Crime(claim) => &mut claim.details,
            ClaimAggregate::Civil(claim) => &mut claim.details,
        }
    }

    pub fn claim_id(&self) -> &ClaimId {
        &self.details().claim_id
    }

    pub fn kind(&self) -> ClaimKind {
        match self {
            ClaimAggregate::Crime(_) => ClaimKind::Crime,
            ClaimAggregate::Civil(_) => ClaimKind::Civil,
        }
    }

    /// Costs specific to the claim type, in display order.
    pub fn type_specific_costs(&self) -> Vec<&ClaimField> {
        match self {
            ClaimAggregate::Crime(claim) => vec![&claim.travel_costs, &claim.waiting_costs],
            ClaimAggregate::Civil(claim) => vec![
                &claim.detention_travel_waiting_costs,
                &claim.jr_form_filling_cost,
                &claim.counsels_cost,
            ],
        }
    }

    /// Every field carried by the claim, bolt-ons included when present.
    pub fn fields_mut(&mut self) -> Vec<&mut ClaimField> {
        match self {
            ClaimAggregate::Crime(claim) => {
                let mut fields: Vec<&mut ClaimField> = claim.details.fields_mut().into();
                fields.push(&mut claim.travel_costs);
                fields.push(&mut claim.waiting_costs);
                fields
            }
            ClaimAggregate::Civil(claim) => {
                let mut fields: Vec<&mut ClaimField> = claim.details.fields_mut().into();
                fields.push(&mut claim.counsels_cost);
                fields.push(&mut claim.detention_travel_waiting_costs);
                fields.push(&mut claim.jr_form_filling_cost);
                fields.extend(claim.bolt_ons.iter_mut());
                fields
            }
        }
    }

    pub fn field(&self, key: FieldKey) -> Option<&ClaimField> {
        if let Some(field) = self.details().field(key) {
            return Some(field);
        }
        match (self, key) {
            (ClaimAggregate::Crime(claim), FieldKey::Travel) => Some(&claim.travel_costs),
            (ClaimAggregate::Crime(claim), FieldKey::Waiting) => Some(&claim.waiting_costs),
            (ClaimAggregate::Civil(claim), FieldKey::CounselsCost) => Some(&claim.counsels_cost),
            (ClaimAggregate::Civil(claim), FieldKey::DetentionTravel) => {
                Some(&claim.detention_travel_waiting_costs)
            }
            (ClaimAggregate::Civil(claim), FieldKey::JrFormFilling) => {
                Some(&claim.jr_form_filling_cost)
            }
            (ClaimAggregate::Civil(claim), FieldKey::AdjournedHearingFee) => {
                claim.bolt_ons.adjourned_hearing.as_ref()
            }
            (ClaimAggregate::Civil(claim), FieldKey::CmrhOral) => claim.bolt_ons.cmrh_oral.as_ref(),
            (ClaimAggregate::Civil(claim), FieldKey::CmrhTelephone) => {
                claim.bolt_ons.cmrh_telephone.as_ref()
            }
            (ClaimAggregate::Civil(claim), FieldKey::HomeOffice) => {
                claim.bolt_ons.ho_interview.as_ref()
            }
            (ClaimAggregate::Civil(claim), FieldKey::SubstantiveHearing) => {
                claim.bolt_ons.substantive_hearing.as_ref()
            }
            _ => None,
        }
    }

    pub fn field_mut(&mut self, key: FieldKey) -> Option<&mut ClaimField> {
        match self {
            ClaimAggregate::Crime(claim) => match key {
                FieldKey::Travel => Some(&mut claim.travel_costs),
                FieldKey::Waiting => Some(&mut claim.waiting_costs),
                other => claim.details.field_mut(other),
            },
            ClaimAggregate::Civil(claim) => match key {
                FieldKey::CounselsCost => Some(&mut claim.counsels_cost),
                FieldKey::DetentionTravel => Some(&mut claim.detention_travel_waiting_costs),
                FieldKey::JrFormFilling => Some(&mut claim.jr_form_filling_cost),
                FieldKey::AdjournedHearingFee => claim.bolt_ons.adjourned_hearing.as_mut(),
                FieldKey::CmrhOral => claim.bolt_ons.cmrh_oral.as_mut(),
                FieldKey::CmrhTelephone => claim.bolt_ons.cmrh_telephone.as_mut(),
                FieldKey::HomeOffice => claim.bolt_ons.ho_interview.as_mut(),
                FieldKey::SubstantiveHearing => claim.bolt_ons.substantive_hearing.as_mut(),
                other => claim.details.field_mut(other),
            },
        }
    }

    pub fn cost_field_mut(&mut self, cost: CostKind) -> Option<&mut ClaimField> {
        self.field_mut(cost.key())
    }

    /// True when the outcome being selected matches the previous assessment,
    /// in which case its recorded values should be shown again.
    pub fn should_reapply_last_assessment(&self, outcome: Outcome) -> bool {
        let details = self.details();
        details.has_assessment
            && details
                .last_assessment
                .as_ref()
                .is_some_and(|last| last.last_assessment_outcome == Some(outcome))
    }

    /// Copy the previous assessment's recorded values into the assessed column.
    pub fn reapply_last_assessment(&mut self) {
        let Some(amounts) = self
            .details()
            .last_assessment
            .as_ref()
            .map(|last| last.amounts.clone())
        else {
            return;
        };

        for (key, value) in amounts.entries() {
            if let Some(field) = self.field_mut(key) {
                field.assessed = value;
            }
        }
    }
}
