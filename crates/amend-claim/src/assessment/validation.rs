use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::domain::{ClaimAggregate, ClaimField};
use super::totals::normalize_amount;

/// Validation failure anchored to a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub field_id: String,
    pub message_key: String,
}

impl FieldError {
    pub fn new(field_id: impl Into<String>, message_key: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            message_key: message_key.into(),
        }
    }
}

/// Problems the numeric validator can find with a monetary input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmountIssue {
    NotNumeric,
    Negative,
    TooPrecise,
    TooLarge,
}

impl AmountIssue {
    pub const fn message_suffix(self) -> &'static str {
        match self {
            AmountIssue::NotNumeric => "error.invalid",
            AmountIssue::Negative => "error.min",
            AmountIssue::TooPrecise => "error.decimalPlaces",
            AmountIssue::TooLarge => "error.max",
        }
    }
}

/// Exclusive upper bound for any amount a caseworker may enter.
pub fn max_amount() -> Decimal {
    Decimal::new(1_000_000, 0)
}

/// Numeric checks for a raw monetary input. Blank input is left to the
/// required check. Sign, precision and upper bound are checked independently.
pub fn check_amount(raw: &str) -> Vec<AmountIssue> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    let Ok(value) = Decimal::from_str(trimmed) else {
        return vec![AmountIssue::NotNumeric];
    };

    let mut issues = Vec::new();
    if value < Decimal::ZERO {
        issues.push(AmountIssue::Negative);
    }
    if value.scale() > 2 {
        issues.push(AmountIssue::TooPrecise);
    }
    if value >= max_amount() {
        issues.push(AmountIssue::TooLarge);
    }
    issues
}

/// Form-level validation of one monetary input, returning the normalised amount.
pub fn validate_amount_input(
    raw: &str,
    field_id: &str,
    message_prefix: &str,
) -> Result<Decimal, Vec<FieldError>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(vec![FieldError::new(
            field_id,
            format!("{message_prefix}.error.required"),
        )]);
    }

    let issues = check_amount(trimmed);
    if !issues.is_empty() {
        return Err(issues
            .into_iter()
            .map(|issue| {
                FieldError::new(
                    field_id,
                    format!("{message_prefix}.{}", issue.message_suffix()),
                )
            })
            .collect());
    }

    Decimal::from_str(trimmed)
        .map(normalize_amount)
        .map_err(|_| {
            vec![FieldError::new(
                field_id,
                format!("{message_prefix}.{}", AmountIssue::NotNumeric.message_suffix()),
            )]
        })
}

/// Validate a VAT / VAT-inclusive pair, reporting errors from both inputs together.
pub fn validate_totals_input(
    raw_vat: &str,
    raw_incl_vat: &str,
    field_ids: [&str; 2],
    message_prefixes: [&str; 2],
) -> Result<(Decimal, Decimal), Vec<FieldError>> {
    let vat = validate_amount_input(raw_vat, field_ids[0], message_prefixes[0]);
    let incl_vat = validate_amount_input(raw_incl_vat, field_ids[1], message_prefixes[1]);

    match (vat, incl_vat) {
        (Ok(vat), Ok(incl_vat)) => Ok((vat, incl_vat)),
        (vat, incl_vat) => {
            let mut errors = vat.err().unwrap_or_default();
            errors.extend(incl_vat.err().unwrap_or_default());
            Err(errors)
        }
    }
}

/// Required check: assessable fields must carry an assessed value.
pub fn check_required(field: &ClaimField) -> Option<FieldError> {
    field
        .is_required_and_missing()
        .then(|| FieldError::new(field.key.field_id(), field.key.error_key()))
}

/// Required-but-unanswered fields in page order: profit costs, the claim
/// type's own costs, then the assessed and allowed totals.
pub fn get_errors(aggregate: &ClaimAggregate) -> Vec<FieldError> {
    let details = aggregate.details();
    let mut fields = vec![&details.net_profit_cost];
    fields.extend(aggregate.type_specific_costs());
    fields.extend([
        &details.assessed_total_vat,
        &details.assessed_total_incl_vat,
        &details.allowed_total_vat,
        &details.allowed_total_incl_vat,
    ]);

    fields.into_iter().filter_map(check_required).collect()
}

/// Final gate before a claim is handed to the submission API.
pub fn ready_to_submit(aggregate: &ClaimAggregate) -> Result<(), Vec<FieldError>> {
    let details = aggregate.details();
    let mut errors = Vec::new();

    if details.assessment_outcome.is_none() {
        errors.push(FieldError::new(
            "assessment-outcome",
            "assessmentOutcome.assessmentOutcomeRequiredError",
        ));
    }
    if details.vat_claimed.is_required_and_missing() {
        errors.push(FieldError::new(
            "liability-for-vat",
            "assessmentOutcome.liabilityForVatRequiredError",
        ));
    }
    errors.extend(get_errors(aggregate));

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
