//! Ocorrencia (incident report) routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;

use super::ApiResult;
use crate::services::ocorrencia::{OcorrenciaDto, OcorrenciaInput};
use crate::state::AppState;

/// `POST /ocorrencias`
pub async fn criar(
    State(state): State<AppState>,
    Json(body): Json<OcorrenciaInput>,
) -> ApiResult<(StatusCode, Json<OcorrenciaDto>)> {
    body.validate_new()?;
    let created = state.ocorrencias.create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /ocorrencias`
pub async fn listar(State(state): State<AppState>) -> ApiResult<Json<Vec<OcorrenciaDto>>> {
    Ok(Json(state.ocorrencias.list().await?))
}

/// `GET /ocorrencias/:id`
pub async fn buscar(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<OcorrenciaDto>> {
    Ok(Json(state.ocorrencias.get(id).await?))
}

/// `PUT /ocorrencias/:id`
pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Option<OcorrenciaInput>>,
) -> ApiResult<Json<OcorrenciaDto>> {
    let body = body.unwrap_or_default();
    body.validate_patch()?;
    Ok(Json(state.ocorrencias.update(id, body).await?))
}

/// `DELETE /ocorrencias/:id` — 204 with no body.
pub async fn deletar(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.ocorrencias.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
#[path = "ocorrencias_test.rs"]
mod tests;
