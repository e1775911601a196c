//! Comunicado service — announcements broadcast to a whole condominio.
//!
//! DESIGN
//! ======
//! Clients address the target building by name (`condominioNome`), not id.
//! The name is resolved once at send time and the row stores the foreign
//! key, so renaming a condominio renames it on every past announcement too.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::{info, warn};

use super::condominio::{self, find_id_by_nome};
use super::{ServiceError, require_text};

pub const MENSAGEM_VAZIA: &str = "Mensagem do comunicado não pode ser vazia";
pub const NAO_ENCONTRADO: &str = "Comunicado não encontrado.";
const CONDOMINIO_NAO_ENCONTRADO: &str = "Condomínio não encontrado.";

// =============================================================================
// TYPES
// =============================================================================

/// Boundary representation of an announcement. `id` is ignored on input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(default, rename_all = "camelCase")]
pub struct ComunicadoDto {
    pub id: i64,
    pub condominio_nome: String,
    pub mensagem: String,
}

impl ComunicadoDto {
    #[cfg(test)]
    #[must_use]
    pub fn new(id: i64, condominio_nome: impl Into<String>, mensagem: impl Into<String>) -> Self {
        Self { id, condominio_nome: condominio_nome.into(), mensagem: mensagem.into() }
    }

    /// # Errors
    ///
    /// Returns a validation error if the building name or the message is blank.
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.condominio_nome, condominio::NOME_VAZIO)?;
        validate_mensagem(&self.mensagem)
    }
}

/// # Errors
///
/// Returns a validation error if `mensagem` is blank.
pub fn validate_mensagem(mensagem: &str) -> Result<(), ServiceError> {
    require_text(mensagem, MENSAGEM_VAZIA)
}

#[async_trait::async_trait]
pub trait ComunicadoService: Send + Sync {
    async fn send(&self, dto: ComunicadoDto) -> Result<ComunicadoDto, ServiceError>;
    async fn list(&self) -> Result<Vec<ComunicadoDto>, ServiceError>;
    async fn update(&self, id: i64, mensagem: String) -> Result<ComunicadoDto, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

// =============================================================================
// POSTGRES
// =============================================================================

pub struct PgComunicadoService {
    pool: PgPool,
}

impl PgComunicadoService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl ComunicadoService for PgComunicadoService {
    async fn send(&self, dto: ComunicadoDto) -> Result<ComunicadoDto, ServiceError> {
        let Some(condominio_id) = find_id_by_nome(&self.pool, &dto.condominio_nome).await? else {
            warn!(condominio = %dto.condominio_nome, "comunicado for unknown condominio");
            return Err(ServiceError::NotFoundMessage(CONDOMINIO_NAO_ENCONTRADO.into()));
        };

        let row = sqlx::query_as::<_, ComunicadoDto>(
            "WITH ins AS (
                INSERT INTO comunicados (condominio_id, mensagem) VALUES ($1, $2)
                RETURNING id, condominio_id, mensagem
             )
             SELECT ins.id, c.nome AS condominio_nome, ins.mensagem
             FROM ins JOIN condominios c ON c.id = ins.condominio_id",
        )
        .bind(condominio_id)
        .bind(dto.mensagem.trim())
        .fetch_one(&self.pool)
        .await?;

        info!(id = row.id, condominio_id, "comunicado sent");
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<ComunicadoDto>, ServiceError> {
        let rows = sqlx::query_as::<_, ComunicadoDto>(
            "SELECT m.id, c.nome AS condominio_nome, m.mensagem
             FROM comunicados m JOIN condominios c ON c.id = m.condominio_id
             ORDER BY m.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, mensagem: String) -> Result<ComunicadoDto, ServiceError> {
        let row = sqlx::query_as::<_, ComunicadoDto>(
            "WITH upd AS (
                UPDATE comunicados SET mensagem = $2 WHERE id = $1
                RETURNING id, condominio_id, mensagem
             )
             SELECT upd.id, c.nome AS condominio_nome, upd.mensagem
             FROM upd JOIN condominios c ON c.id = upd.condominio_id",
        )
        .bind(id)
        .bind(mensagem.trim())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| ServiceError::NotFoundMessage(NAO_ENCONTRADO.into()))?;

        info!(id, "comunicado updated");
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM comunicados WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFoundMessage(NAO_ENCONTRADO.into()));
        }
        info!(id, "comunicado deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "comunicado_test.rs"]
mod tests;
