//! Usuario routes.

use axum::extract::{Path, State};
use axum::response::Json;

use super::ApiResult;
use crate::services::{Entity, ServiceError};
use crate::services::usuario::{UsuarioDto, UsuarioInput};
use crate::state::AppState;

/// `POST /usuarios/cadastro` — body is the full user record, answer is the DTO.
pub async fn cadastrar(State(state): State<AppState>, Json(body): Json<UsuarioInput>) -> ApiResult<Json<UsuarioDto>> {
    body.validate_new()?;
    let created = state.usuarios.create(body).await?;
    Ok(Json(state.usuarios.to_dto(&created)))
}

/// `GET /usuarios/listar`
pub async fn listar(State(state): State<AppState>) -> ApiResult<Json<Vec<UsuarioDto>>> {
    Ok(Json(state.usuarios.list().await?))
}

/// `GET /usuarios/:id`
pub async fn buscar(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<UsuarioDto>> {
    let found = state
        .usuarios
        .find(id)
        .await?
        .ok_or(ServiceError::NotFound { entity: Entity::Usuario, id })?;
    Ok(Json(found))
}

/// `PUT /usuarios/atualizar/:id`
pub async fn atualizar(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Option<UsuarioInput>>,
) -> ApiResult<Json<UsuarioDto>> {
    let body = body.unwrap_or_default();
    body.validate_patch()?;
    let updated = state.usuarios.update(id, body).await?;
    Ok(Json(state.usuarios.to_dto(&updated)))
}

/// `DELETE /usuarios/deletar/:id` — plain-text confirmation naming the user.
pub async fn deletar(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<String> {
    let removed = state.usuarios.delete(id).await?;
    Ok(format!("{} Foi Deletado Com Sucesso!", removed.nome))
}

#[cfg(test)]
#[path = "usuarios_test.rs"]
mod tests;
