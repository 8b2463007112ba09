//! Earthquake Routes

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use quake_model::{expand, time, Alert, Report};
use std::sync::Arc;

use crate::error::ApiError;
use crate::{metrics, ApiResponse, AppState};

/// Ingest one report; returns the newly promoted alerts (possibly none)
pub async fn create_earthquake(
    State(state): State<Arc<AppState>>,
    Json(report): Json<Report>,
) -> Result<Json<ApiResponse<Vec<Alert>>>, ApiError> {
    metrics::observe_report(&report);

    let events = expand(&report);
    metrics::observe_events(&events);

    let alerts = state.engine.promote(&events).await?;
    metrics::observe_alerts(&alerts);

    Ok(Json(ApiResponse::with_data(
        format!("Created earthquake {} successfully", report.id),
        alerts,
    )))
}

/// List open alerts, newest first, ties by region then source
pub async fn get_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<Alert>>>, ApiError> {
    let alerts = state.store.open_alerts().await?;
    Ok(Json(ApiResponse::with_data(
        format!("Found {} alerts data", alerts.len()),
        alerts,
    )))
}

/// Acknowledge an open alert with the caller-supplied payload
pub async fn acknowledge_alert(
    State(state): State<Arc<AppState>>,
    Path(alert_id): Path<String>,
    Json(submitted): Json<Alert>,
) -> Result<Json<ApiResponse<Alert>>, ApiError> {
    let processed = state.lifecycle.acknowledge(&alert_id, submitted).await?;
    metrics::observe_processed(&processed);
    Ok(Json(ApiResponse::with_data(
        format!("Processed alert {alert_id} successfully"),
        processed,
    )))
}

/// Manual autoclose trigger; the background sweeper runs the same sweep
pub async fn autoclose_alerts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<usize>>, ApiError> {
    let now = Utc::now().with_timezone(&time::reference_offset());
    let timeout = chrono::Duration::seconds(state.config.autoclose_timeout_secs as i64);
    let closed = state.lifecycle.autoclose(now, timeout).await?;
    metrics::observe_autoclosed(closed);
    Ok(Json(ApiResponse::with_data(
        format!("Autoclosed {closed} alerts"),
        closed,
    )))
}
