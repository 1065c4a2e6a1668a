// src/handlers/resource.rs

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::Value;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::Resource};

// =============================================================================
//  CONTROLADOR GENÉRICO (list / get / create / update / delete)
// =============================================================================

// O id chega como texto: formato inválido vira 400, não 404.
fn parse_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| AppError::InvalidId(raw.to_string()))
}

fn body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, AppError> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| AppError::MalformedBody(rejection.body_text()))
}

// GET /api/{coleção}
pub async fn list<T: Resource>(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let docs = app_state.resources::<T>().list().await?;
    Ok((StatusCode::OK, Json(docs)))
}

// GET /api/{coleção}/{id}
pub async fn get_one<T: Resource>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let doc = app_state.resources::<T>().get(parse_id(&id)?).await?;
    Ok((StatusCode::OK, Json(doc)))
}

// POST /api/{coleção}
pub async fn create<T: Resource>(
    State(app_state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let doc = app_state.resources::<T>().create(body(payload)?).await?;
    Ok((StatusCode::CREATED, Json(doc)))
}

// PUT /api/{coleção}/{id}
pub async fn update<T: Resource>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_id(&id)?;
    let doc = app_state.resources::<T>().update(id, body(payload)?).await?;
    Ok((StatusCode::OK, Json(doc)))
}

// DELETE /api/{coleção}/{id}
pub async fn delete<T: Resource>(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    app_state.resources::<T>().delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
//  ROTAS POR COLEÇÃO
// =============================================================================

// Cada coleção ganha um módulo com as cinco rotas anotadas para o OpenAPI,
// todas delegando ao controlador genérico acima.
macro_rules! collection_routes {
    ($name:ident, $model:ident :: $entity:ident, $base:tt, $item:tt, $tag:tt) => {
        pub mod $name {
            use axum::{
                extract::{rejection::JsonRejection, Path, State},
                response::IntoResponse,
                routing::get,
                Json, Router,
            };
            use serde_json::Value;

            use crate::{common::error::AppError, config::AppState, models::$model::$entity};

            /// Registra `base` e `base/{id}` no router da API.
            pub fn routes(router: Router<AppState>) -> Router<AppState> {
                router
                    .route($base, get(list).post(create))
                    .route($item, get(get_one).put(update).delete(delete))
            }

            #[utoipa::path(
                get,
                path = $base,
                tag = $tag,
                responses(
                    (status = 200, description = "Documentos da coleção, mais recentes primeiro", body = Vec<$entity>),
                    (status = 500, description = "Falha no store")
                )
            )]
            pub async fn list(state: State<AppState>) -> Result<impl IntoResponse, AppError> {
                super::list::<$entity>(state).await
            }

            #[utoipa::path(
                get,
                path = $item,
                tag = $tag,
                params(("id" = String, Path, description = "UUID do documento")),
                responses(
                    (status = 200, description = "Documento encontrado", body = $entity),
                    (status = 400, description = "Id com formato inválido"),
                    (status = 404, description = "Documento não encontrado")
                )
            )]
            pub async fn get_one(
                state: State<AppState>,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                super::get_one::<$entity>(state, id).await
            }

            #[utoipa::path(
                post,
                path = $base,
                tag = $tag,
                request_body(content = $entity, description = "Campos obrigatórios e opcionais da entidade"),
                responses(
                    (status = 201, description = "Documento criado", body = $entity),
                    (status = 400, description = "Falha de validação, corpo malformado ou e-mail duplicado")
                )
            )]
            pub async fn create(
                state: State<AppState>,
                payload: Result<Json<Value>, JsonRejection>,
            ) -> Result<impl IntoResponse, AppError> {
                super::create::<$entity>(state, payload).await
            }

            #[utoipa::path(
                put,
                path = $item,
                tag = $tag,
                params(("id" = String, Path, description = "UUID do documento")),
                request_body(content = $entity, description = "Apenas os campos a alterar; null limpa campos opcionais"),
                responses(
                    (status = 200, description = "Documento atualizado", body = $entity),
                    (status = 400, description = "Falha de validação ou id inválido"),
                    (status = 404, description = "Documento não encontrado")
                )
            )]
            pub async fn update(
                state: State<AppState>,
                id: Path<String>,
                payload: Result<Json<Value>, JsonRejection>,
            ) -> Result<impl IntoResponse, AppError> {
                super::update::<$entity>(state, id, payload).await
            }

            #[utoipa::path(
                delete,
                path = $item,
                tag = $tag,
                params(("id" = String, Path, description = "UUID do documento")),
                responses(
                    (status = 204, description = "Documento removido"),
                    (status = 400, description = "Id com formato inválido"),
                    (status = 404, description = "Documento não encontrado")
                )
            )]
            pub async fn delete(
                state: State<AppState>,
                id: Path<String>,
            ) -> Result<impl IntoResponse, AppError> {
                super::delete::<$entity>(state, id).await
            }
        }
    };
}

collection_routes!(contacts, contact::Contact, "/api/contacts", "/api/contacts/{id}", "Contacts");
collection_routes!(leads, lead::Lead, "/api/leads", "/api/leads/{id}", "Leads");
collection_routes!(activities, activity::Activity, "/api/activities", "/api/activities/{id}", "Activities");
collection_routes!(users, user::User, "/api/users", "/api/users/{id}", "Users");
collection_routes!(quotes, finance::Quote, "/api/quotes", "/api/quotes/{id}", "Quotes");
collection_routes!(invoices, finance::Invoice, "/api/invoices", "/api/invoices/{id}", "Invoices");
