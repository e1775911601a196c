//! Common areas (pool, hall, gym) that incident reports point at.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tracing::info;

use super::{Entity, ServiceError, require_text};

pub const NOME_VAZIO: &str = "Nome da área comum não pode ser vazio";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AreaComum {
    pub id: i64,
    pub nome: String,
    pub condominio_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NovaArea {
    pub nome: String,
    pub condominio_id: Option<i64>,
}

impl NovaArea {
    /// # Errors
    ///
    /// Returns a validation error if `nome` is blank.
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_text(&self.nome, NOME_VAZIO)
    }
}

#[async_trait::async_trait]
pub trait AreaService: Send + Sync {
    async fn create(&self, area: NovaArea) -> Result<AreaComum, ServiceError>;
    async fn list(&self) -> Result<Vec<AreaComum>, ServiceError>;
}

pub struct PgAreaService {
    pool: PgPool,
}

impl PgAreaService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl AreaService for PgAreaService {
    async fn create(&self, area: NovaArea) -> Result<AreaComum, ServiceError> {
        if let Some(condominio_id) = area.condominio_id {
            let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM condominios WHERE id = $1)")
                .bind(condominio_id)
                .fetch_one(&self.pool)
                .await?;
            if !exists {
                return Err(ServiceError::NotFound { entity: Entity::Condominio, id: condominio_id });
            }
        }

        let row = sqlx::query_as::<_, AreaComum>(
            "INSERT INTO areas_comuns (nome, condominio_id) VALUES ($1, $2) RETURNING id, nome, condominio_id",
        )
        .bind(area.nome.trim())
        .bind(area.condominio_id)
        .fetch_one(&self.pool)
        .await?;

        info!(id = row.id, "area comum created");
        Ok(row)
    }

    async fn list(&self) -> Result<Vec<AreaComum>, ServiceError> {
        let rows = sqlx::query_as::<_, AreaComum>("SELECT id, nome, condominio_id FROM areas_comuns ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}
