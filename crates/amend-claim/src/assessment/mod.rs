//! Claim assessment: field model, outcome rules, display rows, totals and
//! validation, with the session service and router that drive them.

pub mod domain;
pub mod intake;
pub mod outcome;
pub mod repository;
pub mod router;
pub mod service;
pub mod status;
pub mod submission;
pub mod totals;
pub mod validation;
pub mod views;

#[cfg(test)]
mod tests;

pub use domain::{
    AreaOfLaw, AssessedAmounts, AssessmentInfo, BoltOns, CivilClaim, ClaimAggregate, ClaimDetails,
    ClaimField, ClaimId, ClaimKind, CostKind, CrimeClaim, FieldKey, FieldTag, FieldValue, Outcome,
    UnknownOutcome,
};
pub use intake::{BoltOnDetails, ClaimRecord, FeeCalculation};
pub use outcome::apply_outcome_values;
pub use repository::{
    AssessmentGateway, ClaimSessionStore, GatewayError, InMemoryClaimStore, StoreError,
    SubmissionReceipt,
};
pub use router::assessment_router;
pub use service::{AssessmentService, AssessmentServiceError};
pub use status::{update_field_statuses, FeeCodePolicy, FieldStatusEngine, StatusError};
pub use submission::AssessmentSubmission;
pub use totals::{
    apply_allowed_total, apply_assessed_total, effective_allowed_totals, normalize_amount,
    TotalsPair,
};
pub use validation::{
    check_amount, get_errors, ready_to_submit, validate_amount_input, AmountIssue, FieldError,
};
pub use views::{
    allowed_total_rows, assessed_total_rows, last_edited_message, review_rows, review_view,
    summary_rows, MessageWithParams, ReviewView, Row,
};
