mod policy;
mod rules;

pub use policy::{FeeCodePolicy, DEFAULT_VALID_FEE_CODES};

use super::domain::{ClaimAggregate, Outcome};

/// Stateless engine deciding which fields a caseworker may edit for an outcome.
#[derive(Debug, Clone, Default)]
pub struct FieldStatusEngine {
    policy: FeeCodePolicy,
}

impl FieldStatusEngine {
    pub fn new(policy: FeeCodePolicy) -> Self {
        Self { policy }
    }

    /// Recompute every `assessable` flag for `outcome`. Values are never touched
    /// and every flag is reassigned, so repeated calls do not accumulate.
    pub fn update_field_statuses(&self, aggregate: &mut ClaimAggregate, outcome: Outcome) {
        let assessed_totals_eligible = self.policy.assessed_totals_eligible(aggregate);
        for field in aggregate.fields_mut() {
            field.assessable = rules::is_assessable(field.tag, outcome, assessed_totals_eligible);
        }
    }

    /// Re-run the rules for the outcome already recorded on the claim.
    pub fn refresh(&self, aggregate: &mut ClaimAggregate) -> Result<Outcome, StatusError> {
        let outcome = aggregate
            .details()
            .assessment_outcome
            .ok_or(StatusError::OutcomeNotSelected)?;
        self.update_field_statuses(aggregate, outcome);
        Ok(outcome)
    }
}

/// Apply the rule table using the default fee-code policy.
pub fn update_field_statuses(aggregate: &mut ClaimAggregate, outcome: Outcome) {
    FieldStatusEngine::default().update_field_statuses(aggregate, outcome);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum StatusError {
    #[error("no assessment outcome has been selected for this claim")]
    OutcomeNotSelected,
}
