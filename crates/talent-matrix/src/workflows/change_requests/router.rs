use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::domain::{ChangePayload, ChangeRequestId, ChangeRequestStatus, ReviewDecision};
use super::repository::{ChangeRequestQuery, ChangeRequestRepository, EmployeeRecordStore};
use super::service::{ChangeRequestService, ChangeRequestServiceError};
use crate::error::AppError;
use crate::workflows::assessment::EmployeeId;

/// Router builder exposing change-request submission and review.
pub fn change_request_router<R, S>(service: Arc<ChangeRequestService<R, S>>) -> Router
where
    R: ChangeRequestRepository + 'static,
    S: EmployeeRecordStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/change-requests",
            post(submit_handler::<R, S>).get(list_handler::<R, S>),
        )
        .route(
            "/api/v1/change-requests/:change_request_id/review",
            post(review_handler::<R, S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SubmitRequest {
    employee_id: EmployeeId,
    payload: ChangePayload,
    #[serde(default)]
    old_data: Option<Value>,
    #[serde(default)]
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReviewRequest {
    decision: ReviewDecision,
    #[serde(default)]
    note: Option<String>,
    reviewer: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    employee_id: Option<String>,
    status: Option<ChangeRequestStatus>,
}

pub(crate) async fn submit_handler<R, S>(
    State(service): State<Arc<ChangeRequestService<R, S>>>,
    axum::Json(request): axum::Json<SubmitRequest>,
) -> Response
where
    R: ChangeRequestRepository + 'static,
    S: EmployeeRecordStore + 'static,
{
    match service.submit(
        request.employee_id,
        request.payload,
        request.old_data,
        request.reason,
    ) {
        Ok(change_request) => (StatusCode::CREATED, axum::Json(change_request)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, S>(
    State(service): State<Arc<ChangeRequestService<R, S>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: ChangeRequestRepository + 'static,
    S: EmployeeRecordStore + 'static,
{
    let query = ChangeRequestQuery {
        employee_id: params.employee_id.map(EmployeeId),
        status: params.status,
    };
    match service.list(&query) {
        Ok(requests) => (StatusCode::OK, axum::Json(requests)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn review_handler<R, S>(
    State(service): State<Arc<ChangeRequestService<R, S>>>,
    Path(change_request_id): Path<String>,
    axum::Json(request): axum::Json<ReviewRequest>,
) -> Response
where
    R: ChangeRequestRepository + 'static,
    S: EmployeeRecordStore + 'static,
{
    let id = ChangeRequestId(change_request_id);
    match service.review(&id, request.decision, request.note, &request.reviewer) {
        Ok(change_request) => (StatusCode::OK, axum::Json(change_request)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: ChangeRequestServiceError) -> Response {
    AppError::from(error).into_response()
}
