use amend_claim::assessment::{
    AssessmentGateway, AssessmentSubmission, ClaimId, GatewayError, SubmissionReceipt,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Local stand-in for the claims API: accepts every assessment, logs it and
/// keeps it for inspection.
#[derive(Default, Clone)]
pub(crate) struct LoggingAssessmentGateway {
    accepted: Arc<Mutex<Vec<AssessmentSubmission>>>,
}

impl AssessmentGateway for LoggingAssessmentGateway {
    fn submit(&self, submission: &AssessmentSubmission) -> Result<SubmissionReceipt, GatewayError> {
        let mut guard = self
            .accepted
            .lock()
            .map_err(|_| GatewayError::Transport("gateway lock poisoned".to_string()))?;
        guard.push(submission.clone());
        let assessment_id = format!("local-{:06}", guard.len());

        info!(
            claim_id = %submission.claim_id,
            %assessment_id,
            outcome = %submission.assessment_outcome,
            created_by = %submission.created_by_user_id,
            "assessment accepted by local gateway"
        );

        Ok(SubmissionReceipt {
            assessment_id,
            claim_id: ClaimId(submission.claim_id.clone()),
        })
    }
}

#[cfg(test)]
impl LoggingAssessmentGateway {
    pub(crate) fn accepted(&self) -> Vec<AssessmentSubmission> {
        self.accepted
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}
