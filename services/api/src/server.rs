use crate::cli::ServeArgs;
use crate::infra::{in_memory_state, AppState};
use crate::routes::with_recruitment_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use dugout::config::AppConfig;
use dugout::error::AppError;
use dugout::recruitment::CoachRosterImporter;
use dugout::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(roster) = args.roster.take() {
        config.roster.csv_path = Some(roster);
    }

    telemetry::init(&config.telemetry)?;

    let state = in_memory_state(config.environment);
    if let Some(path) = config.roster.csv_path.as_ref() {
        let drafts = CoachRosterImporter::from_path(path)?;
        let coaches = state.recruitment.import_roster(drafts)?;
        info!(count = coaches.len(), path = %path.display(), "startup roster loaded");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        recruitment: state.recruitment.clone(),
    };

    let app = with_recruitment_routes(state)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "coach recruitment api ready");

    axum::serve(listener, app).await?;
    Ok(())
}
