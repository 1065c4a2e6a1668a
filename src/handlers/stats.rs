// src/handlers/stats.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{common::error::AppError, config::AppState, models::stats::StatsSnapshot};

// GET /api/stats
#[utoipa::path(
    get,
    path = "/api/stats",
    tag = "Stats",
    responses(
        (status = 200, description = "Indicadores do dashboard", body = StatsSnapshot),
        (status = 500, description = "Falha no store")
    )
)]
pub async fn get_stats(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let snapshot = app_state.stats_service.snapshot().await?;
    Ok((StatusCode::OK, Json(snapshot)))
}
