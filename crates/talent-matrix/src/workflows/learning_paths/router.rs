use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::Deserialize;

use super::domain::{LearningPathDraft, LearningPathId, LearningPathView, ModuleDraft, ModuleUpdate};
use super::repository::{LearningPathQuery, LearningPathRepository};
use super::service::{LearningPathService, LearningPathServiceError};
use crate::error::AppError;
use crate::workflows::assessment::{AssessmentId, AssessmentRepository, EmployeeId};

/// Router builder exposing learning path CRUD and module progress updates.
pub fn learning_path_router<R, A>(service: Arc<LearningPathService<R, A>>) -> Router
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/learning-paths",
            post(create_handler::<R, A>).get(list_handler::<R, A>),
        )
        .route(
            "/api/v1/learning-paths/from-assessment",
            post(seed_handler::<R, A>),
        )
        .route(
            "/api/v1/learning-paths/:learning_path_id",
            get(fetch_handler::<R, A>)
                .put(replace_handler::<R, A>)
                .delete(delete_handler::<R, A>),
        )
        .route(
            "/api/v1/learning-paths/:learning_path_id/modules/:module_id",
            patch(module_handler::<R, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct SeedRequest {
    assessment_id: AssessmentId,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReplaceRequest {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    modules: Vec<ModuleDraft>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListParams {
    employee_id: Option<String>,
}

pub(crate) async fn create_handler<R, A>(
    State(service): State<Arc<LearningPathService<R, A>>>,
    axum::Json(draft): axum::Json<LearningPathDraft>,
) -> Response
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.create(draft) {
        Ok(record) => (StatusCode::CREATED, axum::Json(LearningPathView::from(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn seed_handler<R, A>(
    State(service): State<Arc<LearningPathService<R, A>>>,
    axum::Json(request): axum::Json<SeedRequest>,
) -> Response
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.seed_from_assessment(&request.assessment_id) {
        Ok(record) => (StatusCode::CREATED, axum::Json(LearningPathView::from(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn list_handler<R, A>(
    State(service): State<Arc<LearningPathService<R, A>>>,
    Query(params): Query<ListParams>,
) -> Response
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    let query = LearningPathQuery {
        employee_id: params.employee_id.map(EmployeeId),
    };
    match service.list(&query) {
        Ok(records) => {
            let views: Vec<LearningPathView> = records.into_iter().map(Into::into).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<R, A>(
    State(service): State<Arc<LearningPathService<R, A>>>,
    Path(learning_path_id): Path<String>,
) -> Response
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.get(&LearningPathId(learning_path_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(LearningPathView::from(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn replace_handler<R, A>(
    State(service): State<Arc<LearningPathService<R, A>>>,
    Path(learning_path_id): Path<String>,
    axum::Json(request): axum::Json<ReplaceRequest>,
) -> Response
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    let id = LearningPathId(learning_path_id);
    match service.replace(&id, request.title, request.description, request.modules) {
        Ok(record) => (StatusCode::OK, axum::Json(LearningPathView::from(record))).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn module_handler<R, A>(
    State(service): State<Arc<LearningPathService<R, A>>>,
    Path((learning_path_id, module_id)): Path<(String, String)>,
    axum::Json(update): axum::Json<ModuleUpdate>,
) -> Response
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    let id = LearningPathId(learning_path_id);
    match service.update_module(&id, &module_id, &update) {
        Ok(module) => (StatusCode::OK, axum::Json(module)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn delete_handler<R, A>(
    State(service): State<Arc<LearningPathService<R, A>>>,
    Path(learning_path_id): Path<String>,
) -> Response
where
    R: LearningPathRepository + 'static,
    A: AssessmentRepository + 'static,
{
    match service.delete(&LearningPathId(learning_path_id)) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: LearningPathServiceError) -> Response {
    AppError::from(error).into_response()
}
