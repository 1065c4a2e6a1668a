// src/handlers/search.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::search::{SearchQuery, SearchResults},
};

// GET /api/search?q=
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "Search",
    params(SearchQuery),
    responses(
        (status = 200, description = "Até 5 resultados por tipo de entidade", body = SearchResults),
        (status = 500, description = "Falha no store")
    )
)]
pub async fn search(
    State(app_state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<impl IntoResponse, AppError> {
    let query = params.q.unwrap_or_default();
    let results = app_state.search_service.search(&query).await?;
    Ok((StatusCode::OK, Json(results)))
}
