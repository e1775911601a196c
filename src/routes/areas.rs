//! Common area routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;

use super::ApiResult;
use crate::services::area::{AreaComum, NovaArea};
use crate::state::AppState;

/// `POST /areas`
pub async fn criar(State(state): State<AppState>, Json(body): Json<NovaArea>) -> ApiResult<(StatusCode, Json<AreaComum>)> {
    body.validate()?;
    let created = state.areas.create(body).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /areas`
pub async fn listar(State(state): State<AppState>) -> ApiResult<Json<Vec<AreaComum>>> {
    Ok(Json(state.areas.list().await?))
}

#[cfg(test)]
#[path = "areas_test.rs"]
mod tests;
