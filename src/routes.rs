// src/routes.rs

use axum::{http::HeaderValue, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    config::{AppState, Config},
    docs::ApiDoc,
    handlers::{
        self,
        resource::{activities, contacts, invoices, leads, quotes, users},
    },
};

/// O router completo da API, já com o estado aplicado.
pub fn router(app_state: AppState) -> Router {
    // Uma entrada por coleção no controlador genérico
    let api = [
        contacts::routes,
        leads::routes,
        activities::routes,
        users::routes,
        quotes::routes,
        invoices::routes,
    ]
    .into_iter()
    .fold(Router::new(), |api, routes| routes(api));

    api.route("/api/search", get(handlers::search::search))
        .route("/api/stats", get(handlers::stats::get_stats))
        .route("/health", get(handlers::health::health))
        .route("/api/health", get(handlers::health::health))
        .with_state(app_state)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
}

/// CORS aberto por padrão; restrito a uma origem quando configurado.
pub fn cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let Some(origin) = &config.cors_allowed_origin else {
        return Ok(CorsLayer::permissive());
    };
    let origin: HeaderValue = origin
        .parse()
        .map_err(|_| anyhow::anyhow!("CORS_ALLOWED_ORIGIN is not a valid header value"))?;

    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods(Any)
        .allow_headers(Any))
}
