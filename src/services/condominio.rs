//! Condominio service — CRUD over the `condominios` table.
//!
//! Every other resource hangs off a condominio (residents, announcements,
//! common areas), and deleting one cascades through the foreign keys.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

use super::{Entity, ServiceError, is_unique_violation, reject_blank, require_text};

pub const NOME_VAZIO: &str = "Nome do condomínio não pode ser vazio";
pub const ENDERECO_VAZIO: &str = "Endereço do condomínio não pode ser vazio";
const NOME_DUPLICADO: &str = "Já existe um condomínio com esse nome";

// =============================================================================
// TYPES
// =============================================================================

/// Persisted condominio. Also the response body for get/list/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Condominio {
    pub id: i64,
    pub nome: String,
    pub endereco: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Create payload. Missing fields deserialize as blank and fail validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CondominioDto {
    pub nome: String,
    pub endereco: String,
}

impl CondominioDto {
    /// # Errors
    ///
    /// Returns a validation error naming the first blank field.
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.nome, NOME_VAZIO)?;
        require_text(&self.endereco, ENDERECO_VAZIO)
    }
}

/// Update payload: absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CondominioPatch {
    pub nome: Option<String>,
    pub endereco: Option<String>,
}

impl CondominioPatch {
    /// # Errors
    ///
    /// Returns a validation error if a present field is blank.
    pub fn validate(&self) -> Result<(), ServiceError> {
        reject_blank(self.nome.as_deref(), NOME_VAZIO)?;
        reject_blank(self.endereco.as_deref(), ENDERECO_VAZIO)
    }
}

#[async_trait::async_trait]
pub trait CondominioService: Send + Sync {
    async fn create(&self, dto: CondominioDto) -> Result<Condominio, ServiceError>;
    async fn list(&self) -> Result<Vec<Condominio>, ServiceError>;
    async fn get(&self, id: i64) -> Result<Condominio, ServiceError>;
    async fn update(&self, id: i64, patch: CondominioPatch) -> Result<Condominio, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

// =============================================================================
// POSTGRES
// =============================================================================

pub struct PgCondominioService {
    pool: PgPool,
}

impl PgCondominioService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "id, nome, endereco, created_at, updated_at";

#[async_trait::async_trait]
impl CondominioService for PgCondominioService {
    async fn create(&self, dto: CondominioDto) -> Result<Condominio, ServiceError> {
        let row = sqlx::query_as::<_, Condominio>(&format!(
            "INSERT INTO condominios (nome, endereco) VALUES ($1, $2) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(dto.nome.trim())
        .bind(dto.endereco.trim())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) { ServiceError::validation(NOME_DUPLICADO) } else { e.into() }
        })?;

        info!(id = row.id, nome = %row.nome, "condominio created");
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<Condominio>, ServiceError> {
        let rows = sqlx::query_as::<_, Condominio>(&format!("SELECT {SELECT_COLUMNS} FROM condominios ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get(&self, id: i64) -> Result<Condominio, ServiceError> {
        sqlx::query_as::<_, Condominio>(&format!("SELECT {SELECT_COLUMNS} FROM condominios WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ServiceError::NotFound { entity: Entity::Condominio, id })
    }

    async fn update(&self, id: i64, patch: CondominioPatch) -> Result<Condominio, ServiceError> {
        let row = sqlx::query_as::<_, Condominio>(&format!(
            "UPDATE condominios
             SET nome = COALESCE($2, nome),
                 endereco = COALESCE($3, endereco),
                 updated_at = now()
             WHERE id = $1
             RETURNING {SELECT_COLUMNS}"
        ))
        .bind(id)
        .bind(patch.nome.as_deref().map(str::trim))
        .bind(patch.endereco.as_deref().map(str::trim))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) { ServiceError::validation(NOME_DUPLICADO) } else { e.into() }
        })?
        .ok_or(ServiceError::NotFound { entity: Entity::Condominio, id })?;

        info!(id, "condominio updated");
        Ok(row)
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM condominios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound { entity: Entity::Condominio, id });
        }
        info!(id, "condominio deleted");
        Ok(())
    }
}

/// Look up a condominio id by its (unique) name.
pub(crate) async fn find_id_by_nome(pool: &PgPool, nome: &str) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>("SELECT id FROM condominios WHERE nome = $1")
        .bind(nome.trim())
        .fetch_optional(pool)
        .await
}

#[cfg(test)]
#[path = "condominio_test.rs"]
mod tests;
