//! Comunicado (announcement) routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::Serialize;

use super::ApiResult;
use crate::services::comunicado::{ComunicadoDto, validate_mensagem};
use crate::state::AppState;

pub const EXCLUIDO: &str = "Comunicado excluído com sucesso.";

#[derive(Debug, Serialize)]
pub struct MensagemResponse {
    pub mensagem: &'static str,
}

/// `POST /comunicado/enviar`
pub async fn enviar(
    State(state): State<AppState>,
    Json(body): Json<ComunicadoDto>,
) -> ApiResult<(StatusCode, Json<ComunicadoDto>)> {
    body.validate()?;
    let sent = state.comunicados.send(body).await?;
    Ok((StatusCode::CREATED, Json(sent)))
}

/// `GET /comunicado/listar`
pub async fn listar(State(state): State<AppState>) -> ApiResult<Json<Vec<ComunicadoDto>>> {
    Ok(Json(state.comunicados.list().await?))
}

/// `PUT /comunicado/atualizar/:id` — only `mensagem` is read from the body.
pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<ComunicadoDto>,
) -> ApiResult<Json<ComunicadoDto>> {
    validate_mensagem(&body.mensagem)?;
    Ok(Json(state.comunicados.update(id, body.mensagem).await?))
}

/// `DELETE /comunicado/excluir/:id`
pub async fn excluir(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<MensagemResponse>> {
    state.comunicados.delete(id).await?;
    Ok(Json(MensagemResponse { mensagem: EXCLUIDO }))
}

#[cfg(test)]
#[path = "comunicado_test.rs"]
mod tests;
