//! Condominio routes.
//!
//! Create and delete answer with a plain-text confirmation rather than the
//! entity; the other endpoints return the entity itself.

use axum::extract::{Path, State};
use axum::response::Json;

use super::ApiResult;
use crate::services::condominio::{Condominio, CondominioDto, CondominioPatch};
use crate::state::AppState;

/// `POST /condominio/criar` — validate, create, confirm by name.
pub async fn criar(State(state): State<AppState>, Json(body): Json<CondominioDto>) -> ApiResult<String> {
    body.validate()?;
    let created = state.condominios.create(body).await?;
    Ok(format!("Condomínio {} criado com sucesso!", created.nome))
}

/// `GET /condominio/listar`
pub async fn listar(State(state): State<AppState>) -> ApiResult<Json<Vec<Condominio>>> {
    Ok(Json(state.condominios.list().await?))
}

/// `GET /condominio/:id`
pub async fn buscar(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Condominio>> {
    Ok(Json(state.condominios.get(id).await?))
}

/// `PUT /condominio/:id` — merge the supplied fields. A `null` body changes nothing.
pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Option<CondominioPatch>>,
) -> ApiResult<Json<Condominio>> {
    let patch = body.unwrap_or_default();
    patch.validate()?;
    Ok(Json(state.condominios.update(id, patch).await?))
}

/// `DELETE /condominio/:id`
pub async fn excluir(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<String> {
    state.condominios.delete(id).await?;
    Ok(format!("Condomínio {id} excluído."))
}

#[cfg(test)]
#[path = "condominio_test.rs"]
mod tests;
