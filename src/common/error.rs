// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::common::validation::FieldError;
use crate::db::StoreError;

// Um único mapeamento erro -> status para toda a API.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Malformed request body: {0}")]
    MalformedBody(String),

    #[error("Invalid identifier '{0}'")]
    InvalidId(String),

    #[error("Not found")]
    NotFound,

    #[error("{0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(StoreError),

    // Qualquer outro erro inesperado
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { collection, field } => AppError::Conflict(format!(
                "A {} with this {} already exists",
                collection.singular(),
                field
            )),
            other => AppError::Store(other),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::MalformedBody(_)
            | AppError::InvalidId(_)
            | AppError::Conflict(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Store(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::Validation(errors) => json!({
                "message": "Validation failed",
                "errors": errors,
            }),
            // Detalhes de falhas internas vão para o log, nunca para o cliente.
            ref e @ (AppError::Store(_) | AppError::Internal(_)) => {
                tracing::error!("Erro interno do servidor: {}", e);
                json!({ "message": "Internal server error" })
            }
            other => json!({ "message": other.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
