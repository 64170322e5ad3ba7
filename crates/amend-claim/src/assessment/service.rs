use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::domain::{ClaimAggregate, ClaimId, CostKind, FieldKey, FieldValue, Outcome};
use super::intake::ClaimRecord;
use super::outcome::apply_outcome_values;
use super::repository::{
    AssessmentGateway, ClaimSessionStore, GatewayError, StoreError, SubmissionReceipt,
};
use super::status::{FeeCodePolicy, FieldStatusEngine, StatusError};
use super::submission::AssessmentSubmission;
use super::totals::{apply_allowed_total, apply_assessed_total};
use super::validation::{ready_to_submit, validate_amount_input, validate_totals_input, FieldError};
use super::views::{review_view, ReviewView};
use crate::config::AssessmentConfig;

/// Service driving one claim through outcome selection, edits and submission.
pub struct AssessmentService<S, G> {
    store: Arc<S>,
    gateway: Arc<G>,
    engine: Arc<FieldStatusEngine>,
    high_value_limit: Decimal,
}

impl<S, G> AssessmentService<S, G>
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    pub fn new(store: Arc<S>, gateway: Arc<G>, config: AssessmentConfig) -> Self {
        let engine = FieldStatusEngine::new(FeeCodePolicy::new(config.valid_fee_codes));
        Self {
            store,
            gateway,
            engine: Arc::new(engine),
            high_value_limit: config.high_value_assessment_limit,
        }
    }

    fn load(&self, claim_id: &ClaimId) -> Result<ClaimAggregate, AssessmentServiceError> {
        let aggregate = self.store.fetch(claim_id)?.ok_or(StoreError::NotFound)?;
        Ok(aggregate)
    }

    fn persist(&self, aggregate: ClaimAggregate) -> Result<ReviewView, AssessmentServiceError> {
        let view = review_view(&aggregate);
        self.store.save(aggregate)?;
        Ok(view)
    }

    /// Start an editing session from an upstream claim record.
    pub fn open(&self, record: ClaimRecord) -> Result<ReviewView, AssessmentServiceError> {
        let aggregate = ClaimAggregate::from(record);
        let claim_id = aggregate.claim_id().clone();
        if !aggregate.details().escaped {
            return Err(AssessmentServiceError::NotEscaped(claim_id));
        }

        debug!(%claim_id, kind = ?aggregate.kind(), "claim opened for assessment");
        self.persist(aggregate)
    }

    pub fn review(&self, claim_id: &ClaimId) -> Result<ReviewView, AssessmentServiceError> {
        let aggregate = self.load(claim_id)?;
        Ok(review_view(&aggregate))
    }

    pub fn aggregate(&self, claim_id: &ClaimId) -> Result<ClaimAggregate, AssessmentServiceError> {
        self.load(claim_id)
    }

    /// Record the outcome decision and recompute which fields are editable.
    pub fn select_outcome(
        &self,
        claim_id: &ClaimId,
        outcome: Outcome,
        vat_liability: Option<bool>,
    ) -> Result<ReviewView, AssessmentServiceError> {
        let mut aggregate = self.load(claim_id)?;
        if !aggregate.details().escaped {
            return Err(AssessmentServiceError::NotEscaped(claim_id.clone()));
        }

        let previous = aggregate.details().assessment_outcome;
        if previous != Some(outcome) {
            info!(
                %claim_id,
                previous = previous.map(Outcome::wire_value).unwrap_or("none"),
                outcome = outcome.wire_value(),
                "applying assessment outcome"
            );
            apply_outcome_values(&mut aggregate, outcome);
        }
        aggregate.details_mut().assessment_outcome = Some(outcome);

        if aggregate.should_reapply_last_assessment(outcome) {
            debug!(%claim_id, "restoring values from the previous assessment");
            aggregate.reapply_last_assessment();
        }

        self.engine.update_field_statuses(&mut aggregate, outcome);

        if let Some(liability) = vat_liability {
            let vat = &mut aggregate.details_mut().vat_claimed;
            if !vat.assessable {
                return Err(AssessmentServiceError::FieldNotAssessable(FieldKey::Vat));
            }
            vat.assessed = Some(FieldValue::Flag(liability));
        }

        self.persist(aggregate)
    }

    pub fn amend_cost(
        &self,
        claim_id: &ClaimId,
        cost: CostKind,
        raw_value: &str,
    ) -> Result<ReviewView, AssessmentServiceError> {
        let mut aggregate = self.load(claim_id)?;
        let field = aggregate
            .cost_field_mut(cost)
            .ok_or(AssessmentServiceError::CostNotApplicable(cost))?;
        if !field.assessable {
            return Err(AssessmentServiceError::FieldNotAssessable(field.key));
        }

        let amount = validate_amount_input(raw_value, &field.key.field_id(), cost.message_prefix())
            .map_err(AssessmentServiceError::Invalid)?;
        field.assessed = Some(FieldValue::Amount(amount));

        debug!(%claim_id, cost = cost.path(), %amount, "cost amended");
        self.persist(aggregate)
    }

    pub fn amend_allowed_totals(
        &self,
        claim_id: &ClaimId,
        raw_vat: &str,
        raw_incl_vat: &str,
    ) -> Result<ReviewView, AssessmentServiceError> {
        let mut aggregate = self.load(claim_id)?;
        if !aggregate.details().allowed_total_vat.assessable {
            return Err(AssessmentServiceError::FieldNotAssessable(
                FieldKey::AllowedTotalVat,
            ));
        }

        let (vat, incl_vat) = validate_totals_input(
            raw_vat,
            raw_incl_vat,
            ["allowed-total-vat", "allowed-total-incl-vat"],
            [
                "allowedTotals.allowedTotalVat",
                "allowedTotals.allowedTotalInclVat",
            ],
        )
        .map_err(AssessmentServiceError::Invalid)?;
        apply_allowed_total(&mut aggregate, vat, incl_vat);

        debug!(%claim_id, %vat, %incl_vat, "allowed totals amended");
        self.persist(aggregate)
    }

    pub fn amend_assessed_totals(
        &self,
        claim_id: &ClaimId,
        raw_vat: &str,
        raw_incl_vat: &str,
    ) -> Result<ReviewView, AssessmentServiceError> {
        let mut aggregate = self.load(claim_id)?;
        if !aggregate.details().assessed_total_vat.assessable {
            return Err(AssessmentServiceError::FieldNotAssessable(
                FieldKey::AssessedTotalVat,
            ));
        }

        let (vat, incl_vat) = validate_totals_input(
            raw_vat,
            raw_incl_vat,
            ["assessed-total-vat", "assessed-total-incl-vat"],
            [
                "assessedTotals.assessedTotalVat",
                "assessedTotals.assessedTotalInclVat",
            ],
        )
        .map_err(AssessmentServiceError::Invalid)?;
        apply_assessed_total(&mut aggregate, vat, incl_vat);

        debug!(%claim_id, %vat, %incl_vat, "assessed totals amended");
        self.persist(aggregate)
    }

    /// Validate and hand the assessment to the claims API. The session is only
    /// cleared once the gateway accepts it.
    pub fn submit(
        &self,
        claim_id: &ClaimId,
        user_id: &str,
    ) -> Result<SubmissionReceipt, AssessmentServiceError> {
        let aggregate = self.load(claim_id)?;
        ready_to_submit(&aggregate).map_err(AssessmentServiceError::Invalid)?;
        let submission = AssessmentSubmission::from_aggregate(&aggregate, user_id)?;

        let receipt = self.gateway.submit(&submission).map_err(|err| {
            metrics::counter!("assessment_submissions_failed_total").increment(1);
            warn!(%claim_id, error = %err, "assessment submission failed");
            AssessmentServiceError::Gateway(err)
        })?;

        self.flag_high_value(&aggregate, &submission, &receipt);
        metrics::counter!("assessment_submissions_total").increment(1);
        self.store.remove(claim_id)?;

        info!(
            %claim_id,
            assessment_id = %receipt.assessment_id,
            outcome = %submission.assessment_outcome,
            "assessment submitted"
        );
        Ok(receipt)
    }

    pub fn discard(&self, claim_id: &ClaimId) -> Result<(), AssessmentServiceError> {
        self.store.remove(claim_id)?.ok_or(StoreError::NotFound)?;
        debug!(%claim_id, "assessment discarded");
        Ok(())
    }

    fn flag_high_value(
        &self,
        aggregate: &ClaimAggregate,
        submission: &AssessmentSubmission,
        receipt: &SubmissionReceipt,
    ) {
        let Some(assessed_total) = submission.assessed_total_incl_vat else {
            return;
        };
        if assessed_total < self.high_value_limit {
            return;
        }

        let details = aggregate.details();
        warn!(
            claim_id = %details.claim_id,
            provider_account_number = details.provider_account_number.as_deref().unwrap_or("-"),
            unique_file_number = details.unique_file_number.as_deref().unwrap_or("-"),
            assessment_id = %receipt.assessment_id,
            outcome = %submission.assessment_outcome,
            %assessed_total,
            allowed_total = ?submission.allowed_total_incl_vat,
            "HIGH_VALUE_ASSESSMENT"
        );
    }
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error("claim {0} has not escaped the fixed fee and cannot be assessed")]
    NotEscaped(ClaimId),
    #[error("{0} cannot be edited for the selected outcome")]
    FieldNotAssessable(FieldKey),
    #[error("{} does not apply to this claim type", .0.path())]
    CostNotApplicable(CostKind),
    #[error("submitted values failed validation")]
    Invalid(Vec<FieldError>),
    #[error(transparent)]
    Status(#[from] StatusError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}
