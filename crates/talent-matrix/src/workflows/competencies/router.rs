use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Deserialize;

use super::domain::{CompetencyDraft, CompetencyId, JobPositionDraft, JobPositionId};
use super::repository::{CompetencyRepository, JobPositionRepository};
use super::service::{CompetencyService, CompetencyServiceError};
use crate::error::AppError;

/// Router builder exposing the competency catalogue and job positions.
pub fn competency_router<C, J>(service: Arc<CompetencyService<C, J>>) -> Router
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/competencies",
            get(list_competencies_handler::<C, J>).post(create_competency_handler::<C, J>),
        )
        .route(
            "/api/v1/competencies/:competency_id",
            get(fetch_competency_handler::<C, J>)
                .put(update_competency_handler::<C, J>)
                .delete(delete_competency_handler::<C, J>),
        )
        .route(
            "/api/v1/job-positions",
            get(list_positions_handler::<C, J>).post(create_position_handler::<C, J>),
        )
        .route(
            "/api/v1/job-positions/:job_position_id",
            get(fetch_position_handler::<C, J>)
                .put(update_position_handler::<C, J>)
                .delete(delete_position_handler::<C, J>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct PositionParams {
    #[serde(default)]
    available: bool,
}

pub(crate) async fn list_competencies_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.list_competencies() {
        Ok(competencies) => (StatusCode::OK, axum::Json(competencies)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_competency_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    Path(competency_id): Path<String>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.get_competency(&CompetencyId(competency_id)) {
        Ok(competency) => (StatusCode::OK, axum::Json(competency)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_competency_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    axum::Json(draft): axum::Json<CompetencyDraft>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.create_competency(draft) {
        Ok(competency) => (StatusCode::CREATED, axum::Json(competency)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_competency_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    Path(competency_id): Path<String>,
    axum::Json(draft): axum::Json<CompetencyDraft>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.update_competency(&CompetencyId(competency_id), draft) {
        Ok(competency) => (StatusCode::OK, axum::Json(competency)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_competency_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    Path(competency_id): Path<String>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.delete_competency(&CompetencyId(competency_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_positions_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    Query(params): Query<PositionParams>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.list_positions(params.available) {
        Ok(positions) => (StatusCode::OK, axum::Json(positions)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_position_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    Path(job_position_id): Path<String>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.get_position(&JobPositionId(job_position_id)) {
        Ok(position) => (StatusCode::OK, axum::Json(position)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn create_position_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    axum::Json(draft): axum::Json<JobPositionDraft>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.create_position(draft) {
        Ok(position) => (StatusCode::CREATED, axum::Json(position)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn update_position_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    Path(job_position_id): Path<String>,
    axum::Json(draft): axum::Json<JobPositionDraft>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.update_position(&JobPositionId(job_position_id), draft) {
        Ok(position) => (StatusCode::OK, axum::Json(position)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_position_handler<C, J>(
    State(service): State<Arc<CompetencyService<C, J>>>,
    Path(job_position_id): Path<String>,
) -> Response
where
    C: CompetencyRepository + 'static,
    J: JobPositionRepository + 'static,
{
    match service.delete_position(&JobPositionId(job_position_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: CompetencyServiceError) -> Response {
    AppError::from(error).into_response()
}
