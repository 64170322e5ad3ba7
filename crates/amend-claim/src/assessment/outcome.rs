//! Assessed values seeded when a caseworker switches outcome.
//!
//! The status engine only decides what is editable; this step decides what the
//! assessed column starts from. It runs on an outcome change and before any
//! previous assessment is restored, so restored values win.

use rust_decimal::Decimal;

use super::domain::{ClaimAggregate, ClaimField, CostKind, FieldTag, FieldValue, Outcome};

/// Overwrite every assessed value with the default for `outcome`.
pub fn apply_outcome_values(aggregate: &mut ClaimAggregate, outcome: Outcome) {
    for field in aggregate.fields_mut() {
        field.assessed = outcome_value(field, outcome);
    }
}

fn outcome_value(field: &ClaimField, outcome: Outcome) -> Option<FieldValue> {
    match (field.tag, outcome) {
        (FieldTag::GrandTotal, _) => field.assessed,
        (FieldTag::AssessedTotal, _) => None,
        // A nilled claim keeps whatever VAT answer was already given.
        (FieldTag::VatLiability, Outcome::Nilled) => field.assessed,
        (FieldTag::VatLiability, Outcome::ReducedToFixedFee) => field.calculated,
        (FieldTag::VatLiability, Outcome::Reduced | Outcome::PaidInFull) => field.submitted,
        (_, Outcome::Nilled) => Some(FieldValue::Amount(Decimal::ZERO)),
        (FieldTag::AllowedTotal, _) => None,
        (
            FieldTag::Cost(CostKind::ProfitCosts),
            Outcome::Reduced | Outcome::ReducedToFixedFee,
        ) => None,
        (FieldTag::Cost(_), Outcome::ReducedToFixedFee) => field.calculated,
        (FieldTag::Cost(_), Outcome::Reduced | Outcome::PaidInFull) => field.submitted,
        (FieldTag::FixedFee | FieldTag::BoltOn, Outcome::ReducedToFixedFee) => field.calculated,
        (FieldTag::FixedFee | FieldTag::BoltOn, Outcome::Reduced | Outcome::PaidInFull) => None,
    }
}
