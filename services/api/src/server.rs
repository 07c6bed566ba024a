use crate::cli::ServeArgs;
use crate::infra::{AppState, TalentServices};
use crate::routes::with_talent_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use talent_matrix::config::AppConfig;
use talent_matrix::error::AppError;
use talent_matrix::telemetry;
use talent_matrix::workflows::assessment::ScoringEngine;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let services = TalentServices::in_memory(ScoringEngine::new(config.scoring));
    let employees = services.employees.list()?.len();
    let competencies = services.competencies.list_competencies()?.len();
    info!(employees, competencies, "in-memory stores seeded");

    let app = with_talent_routes(services)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        weight_tolerance = config.scoring.weight_tolerance,
        "talent matrix service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
