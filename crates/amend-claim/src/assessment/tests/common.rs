use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::{json, Value};

use crate::assessment::domain::{ClaimAggregate, Outcome};
use crate::assessment::intake::ClaimRecord;
use crate::assessment::repository::{
    AssessmentGateway, GatewayError, InMemoryClaimStore, SubmissionReceipt,
};
use crate::assessment::service::AssessmentService;
use crate::assessment::status::update_field_statuses;
use crate::assessment::submission::AssessmentSubmission;
use crate::assessment::{assessment_router, ClaimId};
use crate::config::AssessmentConfig;

pub(super) const CLAIM_ID: &str = "claim-1";
pub(super) const SUBMISSION_ID: &str = "sub-1";

pub(super) fn claim_id() -> ClaimId {
    ClaimId(CLAIM_ID.to_string())
}

pub(super) fn crime_record_json(fee_code: Option<&str>) -> Value {
    json!({
        "id": CLAIM_ID,
        "submissionId": SUBMISSION_ID,
        "areaOfLaw": "CRIME_LOWER",
        "uniqueFileNumber": "010125/001",
        "providerAccountNumber": "0P322F",
        "isVatApplicable": true,
        "netProfitCostsAmount": "1000.00",
        "netDisbursementAmount": "150.00",
        "disbursementsVatAmount": "30.00",
        "totalValue": "1200.00",
        "travelCostsAmount": "20.00",
        "feeCalculation": {
            "claimSummaryFeeId": "fee-1",
            "feeCode": fee_code,
            "fixedFeeAmount": "200.00",
            "netProfitCostsAmount": "950.00",
            "disbursementAmount": "150.00",
            "disbursementVatAmount": "30.00",
            "netTravelCostsAmount": "18.00",
            "totalAmount": "1150.00",
            "vatIndicator": true,
            "boltOnDetails": { "escapeCaseFlag": true }
        }
    })
}

pub(super) fn crime_record(fee_code: Option<&str>) -> ClaimRecord {
    serde_json::from_value(crime_record_json(fee_code)).expect("valid crime record")
}

pub(super) fn civil_record_json(substantive_hearing: Option<bool>) -> Value {
    json!({
        "id": CLAIM_ID,
        "submissionId": SUBMISSION_ID,
        "areaOfLaw": "LEGAL_HELP",
        "isVatApplicable": false,
        "netProfitCostsAmount": "500.00",
        "netDisbursementAmount": "40.00",
        "disbursementsVatAmount": "8.00",
        "totalValue": "900.00",
        "netCounselCostsAmount": "120.00",
        "jrFormFillingAmount": "75.00",
        "adjournedHearingFeeAmount": 0,
        "cmrhOralCount": 2,
        "cmrhTelephoneCount": 1,
        "hoInterview": 1,
        "isSubstantiveHearing": substantive_hearing,
        "feeCalculation": {
            "claimSummaryFeeId": "fee-2",
            "feeCode": "INVC",
            "fixedFeeAmount": "350.00",
            "netCostOfCounselAmount": "100.00",
            "totalAmount": "850.00",
            "vatIndicator": false,
            "boltOnDetails": {
                "escapeCaseFlag": true,
                "boltOnCmrhOralFee": "166.00",
                "boltOnCmrhTelephoneFee": "90.00",
                "boltOnHomeOfficeInterviewFee": "87.00",
                "boltOnSubstantiveHearingFee": "150.00"
            }
        }
    })
}

pub(super) fn civil_record(substantive_hearing: Option<bool>) -> ClaimRecord {
    serde_json::from_value(civil_record_json(substantive_hearing)).expect("valid civil record")
}

pub(super) fn crime_claim(fee_code: Option<&str>) -> ClaimAggregate {
    ClaimAggregate::from(crime_record(fee_code))
}

pub(super) fn civil_claim() -> ClaimAggregate {
    ClaimAggregate::from(civil_record(Some(true)))
}

pub(super) fn assessed_with(mut aggregate: ClaimAggregate, outcome: Outcome) -> ClaimAggregate {
    aggregate.details_mut().assessment_outcome = Some(outcome);
    update_field_statuses(&mut aggregate, outcome);
    aggregate
}

#[derive(Default)]
pub(super) struct MemoryGateway {
    submissions: Mutex<Vec<AssessmentSubmission>>,
}

impl MemoryGateway {
    pub(super) fn submissions(&self) -> Vec<AssessmentSubmission> {
        self.submissions.lock().expect("gateway mutex poisoned").clone()
    }
}

impl AssessmentGateway for MemoryGateway {
    fn submit(&self, submission: &AssessmentSubmission) -> Result<SubmissionReceipt, GatewayError> {
        let mut guard = self.submissions.lock().expect("gateway mutex poisoned");
        guard.push(submission.clone());
        Ok(SubmissionReceipt {
            assessment_id: format!("assessment-{:04}", guard.len()),
            claim_id: ClaimId(submission.claim_id.clone()),
        })
    }
}

pub(super) struct UnavailableGateway;

impl AssessmentGateway for UnavailableGateway {
    fn submit(&self, _submission: &AssessmentSubmission) -> Result<SubmissionReceipt, GatewayError> {
        Err(GatewayError::Transport("connection refused".to_string()))
    }
}

pub(super) fn build_service() -> (
    AssessmentService<InMemoryClaimStore, MemoryGateway>,
    Arc<InMemoryClaimStore>,
    Arc<MemoryGateway>,
) {
    let store = Arc::new(InMemoryClaimStore::default());
    let gateway = Arc::new(MemoryGateway::default());
    let service = AssessmentService::new(store.clone(), gateway.clone(), AssessmentConfig::default());
    (service, store, gateway)
}

pub(super) fn router_with_service(
    service: AssessmentService<InMemoryClaimStore, MemoryGateway>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
