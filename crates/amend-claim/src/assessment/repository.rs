use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::{Deserialize, Serialize};

use super::domain::{ClaimAggregate, ClaimId};
use super::submission::AssessmentSubmission;

/// Per-session holder of the claims being edited. The caller owns it; the
/// engine only ever sees the aggregate values it hands out.
pub trait ClaimSessionStore: Send + Sync {
    fn fetch(&self, id: &ClaimId) -> Result<Option<ClaimAggregate>, StoreError>;
    fn save(&self, aggregate: ClaimAggregate) -> Result<(), StoreError>;
    fn remove(&self, id: &ClaimId) -> Result<Option<ClaimAggregate>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("claim not found in session")]
    NotFound,
    #[error("session store unavailable: {0}")]
    Unavailable(String),
}

/// Process-local store keyed by claim id.
#[derive(Debug, Default, Clone)]
pub struct InMemoryClaimStore {
    claims: Arc<Mutex<HashMap<ClaimId, ClaimAggregate>>>,
}

impl InMemoryClaimStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<ClaimId, ClaimAggregate>>, StoreError> {
        self.claims
            .lock()
            .map_err(|_| StoreError::Unavailable("session lock poisoned".to_string()))
    }

    pub fn len(&self) -> usize {
        self.lock().map(|claims| claims.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClaimSessionStore for InMemoryClaimStore {
    fn fetch(&self, id: &ClaimId) -> Result<Option<ClaimAggregate>, StoreError> {
        Ok(self.lock()?.get(id).cloned())
    }

    fn save(&self, aggregate: ClaimAggregate) -> Result<(), StoreError> {
        self.lock()?.insert(aggregate.claim_id().clone(), aggregate);
        Ok(())
    }

    fn remove(&self, id: &ClaimId) -> Result<Option<ClaimAggregate>, StoreError> {
        Ok(self.lock()?.remove(id))
    }
}

/// Outbound hook to the assessment-creation endpoint.
pub trait AssessmentGateway: Send + Sync {
    fn submit(&self, submission: &AssessmentSubmission) -> Result<SubmissionReceipt, GatewayError>;
}

/// Acknowledgement returned by the claims API for a created assessment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub assessment_id: String,
    pub claim_id: ClaimId,
}

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("assessment rejected by claims API: {0}")]
    Rejected(String),
    #[error("claims API unavailable: {0}")]
    Transport(String),
}
