//! Ocorrencia service — incident and maintenance reports.
//!
//! DESIGN
//! ======
//! A report is filed by a resident against a common area. It carries two
//! independent workflows: approval by the building management
//! ([`StatusAprovacao`]) and resolution of the underlying problem
//! ([`StatusResolucao`]). New reports start at `AGUARDANDO` / `PENDENTE`
//! unless the request says otherwise.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::info;

use super::{Entity, ServiceError, decode_error, reject_blank, require_text};

pub const TITULO_VAZIO: &str = "Título da ocorrência não pode ser vazio";
pub const DESCRICAO_VAZIA: &str = "Descrição da ocorrência não pode ser vazia";
pub const TIPO_OBRIGATORIO: &str = "Tipo da ocorrência é obrigatório";
pub const USUARIO_OBRIGATORIO: &str = "Usuário da ocorrência é obrigatório";
pub const AREA_OBRIGATORIA: &str = "Área da ocorrência é obrigatória";

// =============================================================================
// ENUMS
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoOcorrencia {
    ProblemaDeInfraestrutura,
    Barulho,
    Seguranca,
    Limpeza,
    Outro,
}

impl TipoOcorrencia {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::ProblemaDeInfraestrutura => "PROBLEMA_DE_INFRAESTRUTURA",
            Self::Barulho => "BARULHO",
            Self::Seguranca => "SEGURANCA",
            Self::Limpeza => "LIMPEZA",
            Self::Outro => "OUTRO",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PROBLEMA_DE_INFRAESTRUTURA" => Some(Self::ProblemaDeInfraestrutura),
            "BARULHO" => Some(Self::Barulho),
            "SEGURANCA" => Some(Self::Seguranca),
            "LIMPEZA" => Some(Self::Limpeza),
            "OUTRO" => Some(Self::Outro),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusAprovacao {
    #[default]
    Aguardando,
    Aprovada,
    Rejeitada,
}

impl StatusAprovacao {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Aguardando => "AGUARDANDO",
            Self::Aprovada => "APROVADA",
            Self::Rejeitada => "REJEITADA",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "AGUARDANDO" => Some(Self::Aguardando),
            "APROVADA" => Some(Self::Aprovada),
            "REJEITADA" => Some(Self::Rejeitada),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusResolucao {
    #[default]
    Pendente,
    EmAndamento,
    Resolvida,
}

impl StatusResolucao {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pendente => "PENDENTE",
            Self::EmAndamento => "EM_ANDAMENTO",
            Self::Resolvida => "RESOLVIDA",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PENDENTE" => Some(Self::Pendente),
            "EM_ANDAMENTO" => Some(Self::EmAndamento),
            "RESOLVIDA" => Some(Self::Resolvida),
            _ => None,
        }
    }
}

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcorrenciaDto {
    pub id: i64,
    pub titulo: String,
    pub descricao: String,
    pub tipo: TipoOcorrencia,
    pub status_aprovacao: StatusAprovacao,
    pub status_resolucao: StatusResolucao,
    #[serde(with = "time::serde::rfc3339")]
    pub data_criacao: OffsetDateTime,
    pub id_usuario: i64,
    pub id_area: i64,
}

/// Request body for create and update. `id` and `dataCriacao` are
/// server-assigned and ignored if sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OcorrenciaInput {
    pub titulo: Option<String>,
    pub descricao: Option<String>,
    pub tipo: Option<TipoOcorrencia>,
    pub status_aprovacao: Option<StatusAprovacao>,
    pub status_resolucao: Option<StatusResolucao>,
    pub id_usuario: Option<i64>,
    pub id_area: Option<i64>,
}

impl OcorrenciaInput {
    /// # Errors
    ///
    /// Returns a validation error naming the first missing required field.
    pub fn validate_new(&self) -> Result<(), ServiceError> {
        require_text(self.titulo.as_deref().unwrap_or_default(), TITULO_VAZIO)?;
        require_text(self.descricao.as_deref().unwrap_or_default(), DESCRICAO_VAZIA)?;
        if self.tipo.is_none() {
            return Err(ServiceError::validation(TIPO_OBRIGATORIO));
        }
        if self.id_usuario.is_none() {
            return Err(ServiceError::validation(USUARIO_OBRIGATORIO));
        }
        if self.id_area.is_none() {
            return Err(ServiceError::validation(AREA_OBRIGATORIA));
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns a validation error if a present text field is blank.
    pub fn validate_patch(&self) -> Result<(), ServiceError> {
        reject_blank(self.titulo.as_deref(), TITULO_VAZIO)?;
        reject_blank(self.descricao.as_deref(), DESCRICAO_VAZIA)
    }
}

#[async_trait::async_trait]
pub trait OcorrenciaService: Send + Sync {
    async fn create(&self, input: OcorrenciaInput) -> Result<OcorrenciaDto, ServiceError>;
    async fn list(&self) -> Result<Vec<OcorrenciaDto>, ServiceError>;
    async fn get(&self, id: i64) -> Result<OcorrenciaDto, ServiceError>;
    async fn update(&self, id: i64, input: OcorrenciaInput) -> Result<OcorrenciaDto, ServiceError>;
    async fn delete(&self, id: i64) -> Result<(), ServiceError>;
}

// =============================================================================
// POSTGRES
// =============================================================================

#[derive(sqlx::FromRow)]
struct OcorrenciaRow {
    id: i64,
    titulo: String,
    descricao: String,
    tipo: String,
    status_aprovacao: String,
    status_resolucao: String,
    data_criacao: OffsetDateTime,
    usuario_id: i64,
    area_id: i64,
}

impl TryFrom<OcorrenciaRow> for OcorrenciaDto {
    type Error = ServiceError;

    fn try_from(row: OcorrenciaRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: row.id,
            tipo: TipoOcorrencia::parse(&row.tipo).ok_or_else(|| decode_error("tipo", &row.tipo))?,
            status_aprovacao: StatusAprovacao::parse(&row.status_aprovacao)
                .ok_or_else(|| decode_error("status_aprovacao", &row.status_aprovacao))?,
            status_resolucao: StatusResolucao::parse(&row.status_resolucao)
                .ok_or_else(|| decode_error("status_resolucao", &row.status_resolucao))?,
            titulo: row.titulo,
            descricao: row.descricao,
            data_criacao: row.data_criacao,
            id_usuario: row.usuario_id,
            id_area: row.area_id,
        })
    }
}

const OCORRENCIA_COLUMNS: &str =
    "id, titulo, descricao, tipo, status_aprovacao, status_resolucao, data_criacao, usuario_id, area_id";

pub struct PgOcorrenciaService {
    pool: PgPool,
}

impl PgOcorrenciaService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn ensure_exists(&self, table: &'static str, entity: Entity, id: i64) -> Result<(), ServiceError> {
        let exists = sqlx::query_scalar::<_, bool>(&format!("SELECT EXISTS (SELECT 1 FROM {table} WHERE id = $1)"))
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if exists { Ok(()) } else { Err(ServiceError::NotFound { entity, id }) }
    }

    async fn ensure_references(&self, input: &OcorrenciaInput) -> Result<(), ServiceError> {
        if let Some(id) = input.id_usuario {
            self.ensure_exists("usuarios", Entity::Usuario, id).await?;
        }
        if let Some(id) = input.id_area {
            self.ensure_exists("areas_comuns", Entity::AreaComum, id).await?;
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl OcorrenciaService for PgOcorrenciaService {
    async fn create(&self, input: OcorrenciaInput) -> Result<OcorrenciaDto, ServiceError> {
        input.validate_new()?;
        self.ensure_references(&input).await?;

        let row = sqlx::query_as::<_, OcorrenciaRow>(&format!(
            "INSERT INTO ocorrencias
                (titulo, descricao, tipo, status_aprovacao, status_resolucao, usuario_id, area_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {OCORRENCIA_COLUMNS}"
        ))
        .bind(input.titulo.as_deref().map(str::trim))
        .bind(input.descricao.as_deref().map(str::trim))
        .bind(input.tipo.map(TipoOcorrencia::as_str))
        .bind(input.status_aprovacao.unwrap_or_default().as_str())
        .bind(input.status_resolucao.unwrap_or_default().as_str())
        .bind(input.id_usuario)
        .bind(input.id_area)
        .fetch_one(&self.pool)
        .await?;

        info!(id = row.id, usuario_id = row.usuario_id, area_id = row.area_id, "ocorrencia created");
        OcorrenciaDto::try_from(row)
    }

    async fn list(&self) -> Result<Vec<OcorrenciaDto>, ServiceError> {
        let rows = sqlx::query_as::<_, OcorrenciaRow>(&format!("SELECT {OCORRENCIA_COLUMNS} FROM ocorrencias ORDER BY id"))
            .fetch_all(&self.pool)
            .await?;
        rows.into_iter().map(OcorrenciaDto::try_from).collect()
    }

    async fn get(&self, id: i64) -> Result<OcorrenciaDto, ServiceError> {
        let row = sqlx::query_as::<_, OcorrenciaRow>(&format!("SELECT {OCORRENCIA_COLUMNS} FROM ocorrencias WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(ServiceError::NotFound { entity: Entity::Ocorrencia, id })?;
        OcorrenciaDto::try_from(row)
    }

    async fn update(&self, id: i64, input: OcorrenciaInput) -> Result<OcorrenciaDto, ServiceError> {
        input.validate_patch()?;
        self.ensure_references(&input).await?;

        let row = sqlx::query_as::<_, OcorrenciaRow>(&format!(
            "UPDATE ocorrencias
             SET titulo = COALESCE($2, titulo),
                 descricao = COALESCE($3, descricao),
                 tipo = COALESCE($4, tipo),
                 status_aprovacao = COALESCE($5, status_aprovacao),
                 status_resolucao = COALESCE($6, status_resolucao),
                 usuario_id = COALESCE($7, usuario_id),
                 area_id = COALESCE($8, area_id)
             WHERE id = $1
             RETURNING {OCORRENCIA_COLUMNS}"
        ))
        .bind(id)
        .bind(input.titulo.as_deref().map(str::trim))
        .bind(input.descricao.as_deref().map(str::trim))
        .bind(input.tipo.map(TipoOcorrencia::as_str))
        .bind(input.status_aprovacao.map(StatusAprovacao::as_str))
        .bind(input.status_resolucao.map(StatusResolucao::as_str))
        .bind(input.id_usuario)
        .bind(input.id_area)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ServiceError::NotFound { entity: Entity::Ocorrencia, id })?;

        info!(id, "ocorrencia updated");
        OcorrenciaDto::try_from(row)
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM ocorrencias WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound { entity: Entity::Ocorrencia, id });
        }
        info!(id, "ocorrencia deleted");
        Ok(())
    }
}

#[cfg(test)]
#[path = "ocorrencia_test.rs"]
mod tests;
