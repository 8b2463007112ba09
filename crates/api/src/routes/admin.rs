//! Admin Routes

use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::{ApiResponse, AppState};

/// Drop every cached record, alerts and settings alike
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    state.cache.flush().await?;
    Ok(Json(ApiResponse::message(
        "Cleared cache successfully".to_string(),
    )))
}
