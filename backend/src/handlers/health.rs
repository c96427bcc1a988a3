use anyhow::anyhow;
use axum::{extract::State, Json};
use shared::api::HealthResponse;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Healthy once the compiled app is in place to be served.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let index = state.dist_dir.join("index.html");

    if tokio::fs::metadata(&index).await.is_err() {
        return Err(ApiError::Internal(anyhow!(
            "app bundle missing: {} not found",
            index.display()
        )));
    }

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
    }))
}
