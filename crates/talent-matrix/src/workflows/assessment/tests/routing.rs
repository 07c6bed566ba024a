use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::assessment::router::submit_handler;
use crate::workflows::assessment::{AssessmentService, ScoringEngine};

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serializes")))
        .expect("request builds")
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

fn submission_body(employee: &str, performance: f64, potential: f64) -> Value {
    serde_json::to_value(submission(employee, 2025, axis_pair(performance, potential)))
        .expect("submission serializes")
}

#[tokio::test]
async fn submit_route_returns_created_snapshot() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments",
            submission_body("emp-001", 75.0, 82.0),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["employee_id"], json!("emp-001"));
    assert_eq!(body["period"], json!("Tahunan"));
    assert_eq!(body["snapshot"]["classification"]["box_number"], json!(8));
    assert_eq!(
        body["snapshot"]["recommendations"][0],
        json!("Dipertahankan")
    );
    assert_eq!(body["snapshot"]["rows"][0]["axis"], json!("performance"));
}

#[tokio::test]
async fn submit_route_accepts_source_axis_tags() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let body = json!({
        "employee_id": "emp-010",
        "year": 2025,
        "indicators": [
            {
                "axis": "KINERJA",
                "component": "Kinerja Utama",
                "component_weight": 100,
                "indicator": "Penilaian Kinerja",
                "indicator_weight": 100,
                "raw_score": 90
            },
            {
                "axis": "potensial",
                "component": "Potensi",
                "component_weight": 100,
                "indicator": "Penilaian Potensi",
                "indicator_weight": 100,
                "raw_score": 40
            }
        ]
    });

    let response = router
        .oneshot(json_request("POST", "/api/v1/assessments", body))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["snapshot"]["classification"]["box_number"], json!(4));
}

#[tokio::test]
async fn submit_handler_returns_conflict_on_duplicate_period() {
    let (service, _) = build_service();
    let service = Arc::new(service);

    let first = submit_handler(
        State(service.clone()),
        axum::Json(submission("emp-001", 2025, axis_pair(70.0, 70.0))),
    )
    .await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = submit_handler(
        State(service),
        axum::Json(submission("emp-001", 2025, axis_pair(70.0, 70.0))),
    )
    .await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = read_json_body(second).await;
    assert!(body["error"].as_str().expect("error message").contains("already exists"));
}

#[tokio::test]
async fn submit_handler_rejects_malformed_indicators() {
    let (service, _) = build_service();
    let mut indicators = axis_pair(70.0, 70.0);
    indicators[0].indicator_weight = 120.0;

    let response = submit_handler(
        State(Arc::new(service)),
        axum::Json(submission("emp-001", 2025, indicators)),
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json_body(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("indicator_weight"));
}

#[tokio::test]
async fn submit_handler_returns_internal_error_on_repository_failure() {
    let service = Arc::new(AssessmentService::new(
        Arc::new(UnavailableRepository),
        ScoringEngine::default(),
    ));

    let response = submit_handler::<UnavailableRepository>(
        State(service),
        axum::Json(submission("emp-001", 2025, axis_pair(70.0, 70.0))),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn preview_route_scores_without_storing() {
    let (service, repository) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments/preview",
            json!({ "indicators": axis_pair(50.0, 50.0) }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["classification"]["box_number"], json!(1));
    assert!(repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .is_empty());
}

#[tokio::test]
async fn list_route_returns_rounded_summaries() {
    let (service, _) = build_service();
    let mut indicators = axis_pair(70.0, 70.0);
    indicators[0].raw_score = 66.666;
    service
        .submit(submission("emp-001", 2025, indicators))
        .expect("stored");
    service
        .submit(submission("emp-002", 2025, axis_pair(90.0, 90.0)))
        .expect("stored");
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/assessments?employee_id=emp-001&year=2025"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    let summaries = body.as_array().expect("array body");
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0]["employee_id"], json!("emp-001"));
    assert_eq!(summaries[0]["total_performance"], json!(66.67));
    assert_eq!(summaries[0]["box_number"], json!(5));
}

#[tokio::test]
async fn fetch_route_returns_not_found_for_unknown_ids() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/assessments/asm-unknown"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn rescore_and_delete_routes_update_storage() {
    let (service, repository) = build_service();
    let record = service
        .submit(submission("emp-001", 2025, axis_pair(50.0, 50.0)))
        .expect("stored");
    let router = router_with_service(service);

    let response = router
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/v1/assessments/{}/indicators", record.id.0),
            json!({ "indicators": axis_pair(85.0, 85.0) }),
        ))
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["snapshot"]["classification"]["box_number"], json!(9));

    let response = router
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/v1/assessments/{}", record.id.0))
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(repository
        .records
        .lock()
        .expect("repository mutex poisoned")
        .is_empty());
}

#[tokio::test]
async fn standard_route_generates_from_raw_scores() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/assessments/standard",
            json!({
                "employee_id": "emp-020",
                "year": 2025,
                "scores": crate::workflows::assessment::AssessmentBlueprint::sample_scores(),
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json_body(response).await;
    assert_eq!(body["snapshot"]["classification"]["box_number"], json!(5));
}

#[tokio::test]
async fn box_route_describes_valid_boxes() {
    let (service, _) = build_service();
    let router = router_with_service(service);

    let response = router
        .oneshot(get_request("/api/v1/matrix/boxes/9"))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["box_number"], json!(9));
    assert_eq!(body["performance_band"], json!("high"));
    assert_eq!(body["potential_band"], json!("high"));
    assert_eq!(
        body["recommendations"],
        json!([
            "Dipromosikan dan dipertahankan",
            "Masuk Kelompok Rencana Suksesi Instansi/Nasional",
            "Penghargaan"
        ])
    );
}

#[tokio::test]
async fn box_route_rejects_boxes_outside_the_grid() {
    for uri in ["/api/v1/matrix/boxes/0", "/api/v1/matrix/boxes/10", "/api/v1/matrix/boxes/nine"] {
        let (service, _) = build_service();
        let router = router_with_service(service);

        let response = router
            .oneshot(get_request(uri))
            .await
            .expect("router responds");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{uri}");
    }
}
