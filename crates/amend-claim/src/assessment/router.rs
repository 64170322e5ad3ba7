use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{post, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ClaimId, CostKind, Outcome};
use super::intake::ClaimRecord;
use super::repository::{AssessmentGateway, ClaimSessionStore, StoreError};
use super::service::{AssessmentService, AssessmentServiceError};

type SharedService<S, G> = State<Arc<AssessmentService<S, G>>>;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeRequest {
    pub outcome: String,
    #[serde(default)]
    pub vat_liability: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalsRequest {
    pub vat: String,
    pub incl_vat: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    pub user_id: String,
}

/// Router builder exposing the assessment session over HTTP.
pub fn assessment_router<S, G>(service: Arc<AssessmentService<S, G>>) -> Router
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    Router::new()
        .route("/api/v1/claims", post(open_handler::<S, G>))
        .route(
            "/api/v1/claims/:claim_id",
            axum::routing::get(review_handler::<S, G>).delete(discard_handler::<S, G>),
        )
        .route(
            "/api/v1/claims/:claim_id/outcome",
            put(outcome_handler::<S, G>),
        )
        .route(
            "/api/v1/claims/:claim_id/costs/:cost",
            put(cost_handler::<S, G>),
        )
        .route(
            "/api/v1/claims/:claim_id/allowed-totals",
            put(allowed_totals_handler::<S, G>),
        )
        .route(
            "/api/v1/claims/:claim_id/assessed-totals",
            put(assessed_totals_handler::<S, G>),
        )
        .route(
            "/api/v1/claims/:claim_id/submit",
            post(submit_handler::<S, G>),
        )
        .with_state(service)
}

fn error_response(error: AssessmentServiceError) -> Response {
    let status = match &error {
        AssessmentServiceError::Invalid(errors) => {
            let payload = json!({ "errors": errors });
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
        }
        AssessmentServiceError::Store(StoreError::NotFound) => StatusCode::NOT_FOUND,
        AssessmentServiceError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
        AssessmentServiceError::NotEscaped(_)
        | AssessmentServiceError::FieldNotAssessable(_)
        | AssessmentServiceError::CostNotApplicable(_)
        | AssessmentServiceError::Status(_) => StatusCode::CONFLICT,
        AssessmentServiceError::Gateway(_) => StatusCode::BAD_GATEWAY,
    };

    let payload = json!({ "error": error.to_string() });
    (status, Json(payload)).into_response()
}

fn respond<T: serde::Serialize>(
    status: StatusCode,
    result: Result<T, AssessmentServiceError>,
) -> Response {
    match result {
        Ok(body) => (status, Json(body)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn open_handler<S, G>(
    State(service): SharedService<S, G>,
    Json(record): Json<ClaimRecord>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    respond(StatusCode::CREATED, service.open(record))
}

pub(crate) async fn review_handler<S, G>(
    State(service): SharedService<S, G>,
    Path(claim_id): Path<String>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    respond(StatusCode::OK, service.review(&ClaimId(claim_id)))
}

pub(crate) async fn discard_handler<S, G>(
    State(service): SharedService<S, G>,
    Path(claim_id): Path<String>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    match service.discard(&ClaimId(claim_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn outcome_handler<S, G>(
    State(service): SharedService<S, G>,
    Path(claim_id): Path<String>,
    Json(request): Json<OutcomeRequest>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    let outcome = match request.outcome.parse::<Outcome>() {
        Ok(outcome) => outcome,
        Err(error) => {
            let payload = json!({ "error": error.to_string() });
            return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
        }
    };

    respond(
        StatusCode::OK,
        service.select_outcome(&ClaimId(claim_id), outcome, request.vat_liability),
    )
}

pub(crate) async fn cost_handler<S, G>(
    State(service): SharedService<S, G>,
    Path((claim_id, cost)): Path<(String, String)>,
    Json(request): Json<AmountRequest>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    let Some(cost) = CostKind::from_path(&cost) else {
        let payload = json!({ "error": format!("unknown cost '{cost}'") });
        return (StatusCode::NOT_FOUND, Json(payload)).into_response();
    };

    respond(
        StatusCode::OK,
        service.amend_cost(&ClaimId(claim_id), cost, &request.value),
    )
}

pub(crate) async fn allowed_totals_handler<S, G>(
    State(service): SharedService<S, G>,
    Path(claim_id): Path<String>,
    Json(request): Json<TotalsRequest>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    respond(
        StatusCode::OK,
        service.amend_allowed_totals(&ClaimId(claim_id), &request.vat, &request.incl_vat),
    )
}

pub(crate) async fn assessed_totals_handler<S, G>(
    State(service): SharedService<S, G>,
    Path(claim_id): Path<String>,
    Json(request): Json<TotalsRequest>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    respond(
        StatusCode::OK,
        service.amend_assessed_totals(&ClaimId(claim_id), &request.vat, &request.incl_vat),
    )
}

pub(crate) async fn submit_handler<S, G>(
    State(service): SharedService<S, G>,
    Path(claim_id): Path<String>,
    Json(request): Json<SubmitRequest>,
) -> Response
where
    S: ClaimSessionStore + 'static,
    G: AssessmentGateway + 'static,
{
    respond(
        StatusCode::ACCEPTED,
        service.submit(&ClaimId(claim_id), &request.user_id),
    )
}
