use rust_decimal::Decimal;
use serde::Serialize;

use super::domain::{ClaimAggregate, ClaimField, FieldValue};

/// Amounts are stored with exactly two decimal places (`700` becomes `700.00`).
pub fn normalize_amount(value: Decimal) -> Decimal {
    let mut normalized = value.round_dp(2);
    normalized.rescale(2);
    normalized
}

/// VAT and VAT-inclusive values of one totals pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsPair {
    pub vat: Option<Decimal>,
    pub incl_vat: Option<Decimal>,
}

fn assign(field: &mut ClaimField, value: Decimal) {
    field.assessed = Some(FieldValue::Amount(value));
}

/// Record the allowed totals. While assessed totals cannot be edited they are
/// defined to equal the allowed totals, so each one is back-filled; otherwise
/// the two pairs stay independent.
pub fn apply_allowed_total(aggregate: &mut ClaimAggregate, vat: Decimal, incl_vat: Decimal) {
    let vat = normalize_amount(vat);
    let incl_vat = normalize_amount(incl_vat);
    let details = aggregate.details_mut();

    assign(&mut details.allowed_total_vat, vat);
    assign(&mut details.allowed_total_incl_vat, incl_vat);

    if !details.assessed_total_vat.assessable {
        assign(&mut details.assessed_total_vat, vat);
    }
    if !details.assessed_total_incl_vat.assessable {
        assign(&mut details.assessed_total_incl_vat, incl_vat);
    }
}

pub fn apply_assessed_total(aggregate: &mut ClaimAggregate, vat: Decimal, incl_vat: Decimal) {
    let details = aggregate.details_mut();
    assign(&mut details.assessed_total_vat, normalize_amount(vat));
    assign(&mut details.assessed_total_incl_vat, normalize_amount(incl_vat));
}

/// Allowed totals, each falling back to its assessed counterpart when it was
/// never entered separately.
pub fn effective_allowed_totals(aggregate: &ClaimAggregate) -> TotalsPair {
    let details = aggregate.details();
    TotalsPair {
        vat: details
            .allowed_total_vat
            .assessed_amount()
            .or_else(|| details.assessed_total_vat.assessed_amount()),
        incl_vat: details
            .allowed_total_incl_vat
            .assessed_amount()
            .or_else(|| details.assessed_total_incl_vat.assessed_amount()),
    }
}

/// Assessed totals as sent downstream, falling back to the allowed totals when
/// the assessed pair was not editable.
pub fn submission_assessed_totals(aggregate: &ClaimAggregate) -> TotalsPair {
    let details = aggregate.details();
    TotalsPair {
        vat: details
            .assessed_total_vat
            .assessed_amount()
            .or_else(|| details.allowed_total_vat.assessed_amount()),
        incl_vat: details
            .assessed_total_incl_vat
            .assessed_amount()
            .or_else(|| details.allowed_total_incl_vat.assessed_amount()),
    }
}
