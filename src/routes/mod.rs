//! Router assembly and HTTP error mapping.
//!
//! SYSTEM CONTEXT
//! ==============
//! One Axum router binds every resource's endpoints. Handlers live in the
//! per-resource modules; each one delegates to a single service call and
//! converts [`ServiceError`] into a status code plus `{"erro": "..."}` body
//! through [`ApiError`].

pub mod areas;
pub mod comunicado;
pub mod condominio;
pub mod ocorrencias;
pub mod usuarios;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::services::ServiceError;
use crate::state::AppState;

const ERRO_INTERNO: &str = "Erro interno do servidor";

// =============================================================================
// ERRORS
// =============================================================================

/// Handler error: a [`ServiceError`] on its way to becoming a response.
#[derive(Debug)]
pub struct ApiError(pub ServiceError);

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        Self(err)
    }
}

pub(crate) fn service_error_to_status(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
        ServiceError::NotFound { .. } | ServiceError::NotFoundMessage(_) => StatusCode::NOT_FOUND,
        ServiceError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = service_error_to_status(&self.0);
        let message = match &self.0 {
            ServiceError::Database(e) => {
                error!(error = %e, "database error");
                ERRO_INTERNO.to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(serde_json::json!({ "erro": message }))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// ROUTER
// =============================================================================

/// Build the full application router.
pub fn app(state: AppState, cors_allow_any: bool) -> Router {
    let router = Router::new()
        .route("/comunicado/enviar", post(comunicado::enviar))
        .route("/comunicado/listar", get(comunicado::listar))
        .route("/comunicado/atualizar/{id}", put(comunicado::atualizar))
        .route("/comunicado/excluir/{id}", delete(comunicado::excluir))
        .route("/condominio/criar", post(condominio::criar))
        .route("/condominio/listar", get(condominio::listar))
        .route(
            "/condominio/{id}",
            get(condominio::buscar)
                .put(condominio::atualizar)
                .delete(condominio::excluir),
        )
        .route("/ocorrencias", get(ocorrencias::listar).post(ocorrencias::criar))
        .route(
            "/ocorrencias/{id}",
            get(ocorrencias::buscar)
                .put(ocorrencias::atualizar)
                .delete(ocorrencias::deletar),
        )
        .route("/usuarios/cadastro", post(usuarios::cadastrar))
        .route("/usuarios/listar", get(usuarios::listar))
        .route("/usuarios/{id}", get(usuarios::buscar))
        .route("/usuarios/atualizar/{id}", put(usuarios::atualizar))
        .route("/usuarios/deletar/{id}", delete(usuarios::deletar))
        .route("/areas", get(areas::listar).post(areas::criar))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    if cors_allow_any {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        router.layer(cors)
    } else {
        router
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
pub(crate) mod test_client;

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
