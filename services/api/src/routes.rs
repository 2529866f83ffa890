use crate::infra::{AppState, MemoryState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use dugout::error::AppError;
use dugout::recruitment::{recruitment_router, Coach, CoachRosterImporter};
use serde::Deserialize;
use serde_json::json;
use std::io::Cursor;
use tracing::info;

#[derive(Debug, Deserialize)]
pub(crate) struct RosterImportRequest {
    pub(crate) csv: String,
}

pub(crate) fn with_recruitment_routes(state: MemoryState) -> axum::Router {
    recruitment_router(state)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/coaches/import",
            axum::routing::post(roster_import_endpoint),
        )
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

/// Bulk-load coaches from a roster CSV carried in the request body.
pub(crate) async fn roster_import_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<RosterImportRequest>,
) -> Result<(StatusCode, Json<Vec<Coach>>), AppError> {
    let drafts = CoachRosterImporter::from_reader(Cursor::new(payload.csv.into_bytes()))?;
    let coaches = state.recruitment.import_roster(drafts)?;
    info!(imported = coaches.len(), "roster imported over http");
    Ok((StatusCode::CREATED, Json(coaches)))
}
