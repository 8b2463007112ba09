//! Settings Routes

use axum::extract::State;
use axum::Json;
use serde::Deserialize;
use std::sync::Arc;

use crate::error::ApiError;
use crate::{ApiResponse, AppState};

/// Payload for updating the suppression window
#[derive(Debug, Deserialize)]
pub struct SuppressWindowUpdate {
    pub alert_suppress_time: u64,
}

/// Current suppression window in seconds
pub async fn get_suppress_time(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    let secs = state.settings.suppress_window_secs().await?;
    Ok(Json(ApiResponse::with_data(
        format!("The current suppress time is {secs} seconds"),
        secs,
    )))
}

/// Set the suppression window in seconds
pub async fn set_suppress_time(
    State(state): State<Arc<AppState>>,
    Json(update): Json<SuppressWindowUpdate>,
) -> Result<Json<ApiResponse<u64>>, ApiError> {
    state
        .settings
        .set_suppress_window_secs(update.alert_suppress_time)
        .await?;
    Ok(Json(ApiResponse::with_data(
        format!(
            "Updated to {} seconds successfully",
            update.alert_suppress_time
        ),
        update.alert_suppress_time,
    )))
}
