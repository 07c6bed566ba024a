use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Router,
};

use super::service::{EmployeeService, EmployeeServiceError};
use crate::error::AppError;
use crate::workflows::assessment::EmployeeId;
use crate::workflows::change_requests::{EmployeeRecordStore, ProfilePatch};

/// Router builder exposing the employee directory.
pub fn employee_router<S>(service: Arc<EmployeeService<S>>) -> Router
where
    S: EmployeeRecordStore + 'static,
{
    Router::new()
        .route("/api/v1/employees", get(list_handler::<S>))
        .route("/api/v1/employees/:employee_id", get(fetch_handler::<S>))
        .route(
            "/api/v1/employees/:employee_id/profile",
            put(profile_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn list_handler<S>(State(service): State<Arc<EmployeeService<S>>>) -> Response
where
    S: EmployeeRecordStore + 'static,
{
    match service.list() {
        Ok(employees) => (StatusCode::OK, axum::Json(employees)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn fetch_handler<S>(
    State(service): State<Arc<EmployeeService<S>>>,
    Path(employee_id): Path<String>,
) -> Response
where
    S: EmployeeRecordStore + 'static,
{
    match service.get(&EmployeeId(employee_id)) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn profile_handler<S>(
    State(service): State<Arc<EmployeeService<S>>>,
    Path(employee_id): Path<String>,
    axum::Json(patch): axum::Json<ProfilePatch>,
) -> Response
where
    S: EmployeeRecordStore + 'static,
{
    match service.update_profile(&EmployeeId(employee_id), patch) {
        Ok(record) => (StatusCode::OK, axum::Json(record)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: EmployeeServiceError) -> Response {
    AppError::from(error).into_response()
}
