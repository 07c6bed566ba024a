use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{AssessmentId, AssessmentSubmission, EmployeeId, Indicator};
use super::repository::{AssessmentQuery, AssessmentRepository};
use super::scoring::{recommendations_for, BoxNumber};
use super::service::{AssessmentService, AssessmentServiceError};
use crate::error::AppError;

/// Router builder exposing assessment scoring and matrix lookups.
pub fn assessment_router<R>(service: Arc<AssessmentService<R>>) -> Router
where
    R: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/assessments",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/assessments/preview", post(preview_handler::<R>))
        .route("/api/v1/assessments/standard", post(standard_handler::<R>))
        .route(
            "/api/v1/assessments/:assessment_id",
            get(fetch_handler::<R>).delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/assessments/:assessment_id/indicators",
            put(rescore_handler::<R>),
        )
        .route("/api/v1/matrix/boxes/:box_number", get(box_handler))
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    employee_id: Option<String>,
    year: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StandardRequest {
    employee_id: EmployeeId,
    year: i32,
    scores: BTreeMap<String, f64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct IndicatorsRequest {
    indicators: Vec<Indicator>,
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.submit(submission) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn standard_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(request): axum::Json<StandardRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.generate_standard(request.employee_id, request.year, &request.scores) {
        Ok(record) => (StatusCode::CREATED, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn preview_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    axum::Json(request): axum::Json<IndicatorsRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.preview(&request.indicators) {
        Ok(snapshot) => (StatusCode::OK, axum::Json(snapshot)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    let query = AssessmentQuery {
        employee_id: params.employee_id.map(EmployeeId),
        year: params.year,
    };
    match service.list(&query) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.summary_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.get(&AssessmentId(assessment_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn rescore_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
    axum::Json(request): axum::Json<IndicatorsRequest>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.rescore(&AssessmentId(assessment_id), request.indicators) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<AssessmentService<R>>>,
    Path(assessment_id): Path<String>,
) -> Response
where
    R: AssessmentRepository + 'static,
{
    match service.delete(&AssessmentId(assessment_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

/// Box numbers are checked here, so an unknown box is the caller's error.
pub(crate) async fn box_handler(Path(box_number): Path<String>) -> Response {
    let parsed = box_number
        .parse::<u8>()
        .ok()
        .and_then(|value| BoxNumber::try_from(value).ok());

    let Some(number) = parsed else {
        let payload = json!({
            "error": format!("box number '{box_number}' is outside the 9-box grid"),
        });
        return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(payload)).into_response();
    };

    let set = recommendations_for(number);
    let description = number.description();
    let (performance_band, potential_band) = number.bands();
    let payload = json!({
        "box_number": number.get(),
        "title": description.title,
        "description": description.text,
        "performance_band": performance_band,
        "potential_band": potential_band,
        "recommendations": set.recommendations,
        "learning_modules": set.learning_modules,
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(error: AssessmentServiceError) -> Response {
    AppError::from(error).into_response()
}
