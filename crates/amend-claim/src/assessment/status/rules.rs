use super::super::domain::{FieldTag, Outcome};

/// Rule table keyed by field role. Fixed fee, grand total and bolt-ons are
/// informational; VAT liability can always be answered; a nilled claim
/// allows nothing else.
pub(crate) fn is_assessable(tag: FieldTag, outcome: Outcome, assessed_totals_eligible: bool) -> bool {
    match (tag, outcome) {
        (FieldTag::FixedFee | FieldTag::GrandTotal | FieldTag::BoltOn, _) => false,
        (FieldTag::VatLiability, _) => true,
        (_, Outcome::Nilled) => false,
        (FieldTag::AssessedTotal, _) => assessed_totals_eligible,
        (
            FieldTag::Cost(_) | FieldTag::AllowedTotal,
            Outcome::Reduced | Outcome::PaidInFull | Outcome::ReducedToFixedFee,
        ) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::domain::CostKind;

    #[test]
    fn nilled_only_leaves_vat_liability_editable() {
        for tag in [
            FieldTag::Cost(CostKind::ProfitCosts),
            FieldTag::Cost(CostKind::TravelCosts),
            FieldTag::AllowedTotal,
            FieldTag::AssessedTotal,
            FieldTag::BoltOn,
            FieldTag::FixedFee,
            FieldTag::GrandTotal,
        ] {
            assert!(!is_assessable(tag, Outcome::Nilled, true), "{tag:?}");
        }
        assert!(is_assessable(FieldTag::VatLiability, Outcome::Nilled, false));
    }

    #[test]
    fn assessed_totals_follow_eligibility_outside_nilled() {
        for outcome in [
            Outcome::Reduced,
            Outcome::PaidInFull,
            Outcome::ReducedToFixedFee,
        ] {
            assert!(is_assessable(FieldTag::AssessedTotal, outcome, true));
            assert!(!is_assessable(FieldTag::AssessedTotal, outcome, false));
            assert!(is_assessable(FieldTag::AllowedTotal, outcome, false));
            assert!(!is_assessable(FieldTag::FixedFee, outcome, true));
            assert!(!is_assessable(FieldTag::GrandTotal, outcome, true));
        }
    }
}
