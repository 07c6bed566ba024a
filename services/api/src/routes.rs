use crate::infra::{AppState, TalentServices};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use talent_matrix::workflows::assessment::assessment_router;
use talent_matrix::workflows::change_requests::change_request_router;
use talent_matrix::workflows::competencies::competency_router;
use talent_matrix::workflows::employees::employee_router;
use talent_matrix::workflows::learning_paths::learning_path_router;

pub(crate) fn with_talent_routes(services: TalentServices) -> axum::Router {
    let TalentServices {
        assessments,
        change_requests,
        learning_paths,
        employees,
        competencies,
    } = services;

    assessment_router(assessments)
        .merge(change_request_router(change_requests))
        .merge(learning_path_router(learning_paths))
        .merge(employee_router(employees))
        .merge(competency_router(competencies))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}
