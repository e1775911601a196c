//! Usuario service — residents and staff of a condominio.
//!
//! DESIGN
//! ======
//! The persisted [`Usuario`] carries the CPF and the password hash; the
//! boundary [`UsuarioDto`] carries neither. Conversion goes through
//! [`UsuarioService::to_dto`] so handlers never build the DTO themselves.
//!
//! Create and update share one input type: on create every field is
//! required, on update absent fields keep their stored value.

use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use time::OffsetDateTime;
use tracing::{info, warn};

use super::password::hash_password;
use super::{Entity, ServiceError, decode_error, is_unique_violation, reject_blank, require_text};

pub const NOME_VAZIO: &str = "Nome do usuário não pode ser vazio";
pub const CPF_VAZIO: &str = "CPF não pode ser vazio";
pub const CPF_INVALIDO: &str = "CPF deve conter 11 dígitos";
pub const SENHA_VAZIA: &str = "Senha não pode ser vazia";
pub const TELEFONE_VAZIO: &str = "Telefone não pode ser vazio";
pub const TIPO_OBRIGATORIO: &str = "Tipo do usuário é obrigatório";
pub const BLOCO_OBRIGATORIO: &str = "Bloco é obrigatório";
pub const APARTAMENTO_INVALIDO: &str = "Apartamento deve ser um número positivo";
pub const CONDOMINIO_OBRIGATORIO: &str = "Condomínio do usuário é obrigatório";
const CPF_DUPLICADO: &str = "CPF já cadastrado";

// =============================================================================
// TYPES
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TipoDoUsuario {
    Morador,
    Sindico,
    Porteiro,
    Administrador,
}

impl TipoDoUsuario {
    /// Column form stored in `usuarios.tipo_do_usuario`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Morador => "MORADOR",
            Self::Sindico => "SINDICO",
            Self::Porteiro => "PORTEIRO",
            Self::Administrador => "ADMINISTRADOR",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "MORADOR" => Some(Self::Morador),
            "SINDICO" => Some(Self::Sindico),
            "PORTEIRO" => Some(Self::Porteiro),
            "ADMINISTRADOR" => Some(Self::Administrador),
            _ => None,
        }
    }

    /// Human label shown in [`UsuarioDto::tipo_do_usuario`].
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Morador => "Morador",
            Self::Sindico => "Síndico",
            Self::Porteiro => "Porteiro",
            Self::Administrador => "Administrador",
        }
    }
}

/// Building a user belongs to, denormalized for DTO conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CondominioResumo {
    pub id: i64,
    pub nome: String,
    pub endereco: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    pub id: i64,
    pub nome: String,
    pub cpf: String,
    pub senha_hash: String,
    pub telefone: String,
    pub tipo_do_usuario: TipoDoUsuario,
    pub bloco: char,
    pub apartamento: i32,
    pub condominio: CondominioResumo,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsuarioDto {
    pub id: i64,
    pub nome: String,
    pub telefone: String,
    pub tipo_do_usuario: String,
    pub bloco: char,
    pub apartamento: i32,
    pub condominio_nome: String,
    pub condominio_endereco: String,
}

impl From<&Usuario> for UsuarioDto {
    fn from(u: &Usuario) -> Self {
        Self {
            id: u.id,
            nome: u.nome.clone(),
            telefone: u.telefone.clone(),
            tipo_do_usuario: u.tipo_do_usuario.label().to_owned(),
            bloco: u.bloco,
            apartamento: u.apartamento,
            condominio_nome: u.condominio.nome.clone(),
            condominio_endereco: u.condominio.endereco.clone(),
        }
    }
}

/// Reference to the owning building inside a request body: `{"id": 1, ...}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CondominioRef {
    pub id: i64,
}

/// Request body for create and update. Unknown fields (`id`, timestamps,
/// the rest of the nested condominio) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UsuarioInput {
    pub nome: Option<String>,
    pub cpf: Option<String>,
    pub senha: Option<String>,
    pub telefone: Option<String>,
    pub tipo_do_usuario: Option<TipoDoUsuario>,
    pub bloco: Option<char>,
    pub apartamento: Option<i32>,
    pub condominio: Option<CondominioRef>,
}

impl UsuarioInput {
    /// Validation for create: every field must be present.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing or malformed field.
    pub fn validate_new(&self) -> Result<(), ServiceError> {
        require_text(self.nome.as_deref().unwrap_or_default(), NOME_VAZIO)?;
        require_text(self.cpf.as_deref().unwrap_or_default(), CPF_VAZIO)?;
        require_text(self.senha.as_deref().unwrap_or_default(), SENHA_VAZIA)?;
        require_text(self.telefone.as_deref().unwrap_or_default(), TELEFONE_VAZIO)?;
        if self.tipo_do_usuario.is_none() {
            return Err(ServiceError::validation(TIPO_OBRIGATORIO));
        }
        if self.bloco.is_none() {
            return Err(ServiceError::validation(BLOCO_OBRIGATORIO));
        }
        if self.apartamento.is_none() {
            return Err(ServiceError::validation(APARTAMENTO_INVALIDO));
        }
        if self.condominio.is_none() {
            return Err(ServiceError::validation(CONDOMINIO_OBRIGATORIO));
        }
        self.validate_patch()
    }

    /// Validation for update: present fields must be well-formed.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first malformed field.
    pub fn validate_patch(&self) -> Result<(), ServiceError> {
        reject_blank(self.nome.as_deref(), NOME_VAZIO)?;
        reject_blank(self.cpf.as_deref(), CPF_VAZIO)?;
        reject_blank(self.senha.as_deref(), SENHA_VAZIA)?;
        reject_blank(self.telefone.as_deref(), TELEFONE_VAZIO)?;
        if let Some(cpf) = self.cpf.as_deref() {
            normalize_cpf(cpf).ok_or_else(|| ServiceError::validation(CPF_INVALIDO))?;
        }
        if self.bloco.is_some_and(|b| !b.is_ascii_alphanumeric()) {
            return Err(ServiceError::validation(BLOCO_OBRIGATORIO));
        }
        if self.apartamento.is_some_and(|a| a <= 0) {
            return Err(ServiceError::validation(APARTAMENTO_INVALIDO));
        }
        Ok(())
    }
}

/// Strip `.`, `-` and spaces from a CPF; `None` unless exactly 11 digits remain.
#[must_use]
pub fn normalize_cpf(raw: &str) -> Option<String> {
    let digits: String = raw
        .chars()
        .filter(|c| !matches!(c, '.' | '-' | ' '))
        .collect();
    (digits.len() == 11 && digits.chars().all(|c| c.is_ascii_digit())).then_some(digits)
}

#[async_trait::async_trait]
pub trait UsuarioService: Send + Sync {
    async fn create(&self, input: UsuarioInput) -> Result<Usuario, ServiceError>;
    async fn list(&self) -> Result<Vec<UsuarioDto>, ServiceError>;
    async fn find(&self, id: i64) -> Result<Option<UsuarioDto>, ServiceError>;
    async fn update(&self, id: i64, input: UsuarioInput) -> Result<Usuario, ServiceError>;
    /// Delete and return what was removed, so callers can name the user.
    async fn delete(&self, id: i64) -> Result<UsuarioDto, ServiceError>;

    fn to_dto(&self, usuario: &Usuario) -> UsuarioDto {
        UsuarioDto::from(usuario)
    }
}

// =============================================================================
// POSTGRES
// =============================================================================

#[derive(sqlx::FromRow)]
struct UsuarioRow {
    id: i64,
    nome: String,
    cpf: String,
    senha_hash: String,
    telefone: String,
    tipo_do_usuario: String,
    bloco: String,
    apartamento: i32,
    condominio_id: i64,
    condominio_nome: String,
    condominio_endereco: String,
    created_at: OffsetDateTime,
    updated_at: OffsetDateTime,
}

impl TryFrom<UsuarioRow> for Usuario {
    type Error = ServiceError;

    fn try_from(row: UsuarioRow) -> Result<Self, Self::Error> {
        let tipo_do_usuario =
            TipoDoUsuario::parse(&row.tipo_do_usuario).ok_or_else(|| decode_error("tipo_do_usuario", &row.tipo_do_usuario))?;
        let bloco = row
            .bloco
            .chars()
            .next()
            .ok_or_else(|| decode_error("bloco", &row.bloco))?;
        Ok(Self {
            id: row.id,
            nome: row.nome,
            cpf: row.cpf,
            senha_hash: row.senha_hash,
            telefone: row.telefone,
            tipo_do_usuario,
            bloco,
            apartamento: row.apartamento,
            condominio: CondominioResumo {
                id: row.condominio_id,
                nome: row.condominio_nome,
                endereco: row.condominio_endereco,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USUARIO_COLUMNS: &str = "u.id, u.nome, u.cpf, u.senha_hash, u.telefone, u.tipo_do_usuario, u.bloco,
        u.apartamento, u.condominio_id, c.nome AS condominio_nome, c.endereco AS condominio_endereco,
        u.created_at, u.updated_at";

pub struct PgUsuarioService {
    pool: PgPool,
}

impl PgUsuarioService {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, id: i64) -> Result<Option<Usuario>, ServiceError> {
        let row = sqlx::query_as::<_, UsuarioRow>(&format!(
            "SELECT {USUARIO_COLUMNS} FROM usuarios u JOIN condominios c ON c.id = u.condominio_id WHERE u.id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        row.map(Usuario::try_from).transpose()
    }

    async fn ensure_condominio(&self, id: i64) -> Result<(), ServiceError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM condominios WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        if exists { Ok(()) } else { Err(ServiceError::NotFound { entity: Entity::Condominio, id }) }
    }
}

fn map_write_error(err: sqlx::Error) -> ServiceError {
    if is_unique_violation(&err) { ServiceError::validation(CPF_DUPLICADO) } else { err.into() }
}

#[async_trait::async_trait]
impl UsuarioService for PgUsuarioService {
    async fn create(&self, input: UsuarioInput) -> Result<Usuario, ServiceError> {
        input.validate_new()?;
        let condominio = input.condominio.ok_or_else(|| ServiceError::validation(CONDOMINIO_OBRIGATORIO))?;
        self.ensure_condominio(condominio.id).await?;

        let cpf = input.cpf.as_deref().and_then(normalize_cpf);
        let senha_hash = input.senha.as_deref().map(hash_password);
        let id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO usuarios (nome, cpf, senha_hash, telefone, tipo_do_usuario, bloco, apartamento, condominio_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING id",
        )
        .bind(input.nome.as_deref().map(str::trim))
        .bind(cpf)
        .bind(senha_hash)
        .bind(input.telefone.as_deref().map(str::trim))
        .bind(input.tipo_do_usuario.map(TipoDoUsuario::as_str))
        .bind(input.bloco.map(|b| b.to_ascii_uppercase().to_string()))
        .bind(input.apartamento)
        .bind(condominio.id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        info!(id, condominio_id = condominio.id, "usuario created");
        self.fetch(id)
            .await?
            .ok_or(ServiceError::NotFound { entity: Entity::Usuario, id })
    }

    async fn list(&self) -> Result<Vec<UsuarioDto>, ServiceError> {
        let rows = sqlx::query_as::<_, UsuarioRow>(&format!(
            "SELECT {USUARIO_COLUMNS} FROM usuarios u JOIN condominios c ON c.id = u.condominio_id ORDER BY u.id"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| Usuario::try_from(row).map(|u| UsuarioDto::from(&u)))
            .collect()
    }

    async fn find(&self, id: i64) -> Result<Option<UsuarioDto>, ServiceError> {
        Ok(self.fetch(id).await?.as_ref().map(UsuarioDto::from))
    }

    async fn update(&self, id: i64, input: UsuarioInput) -> Result<Usuario, ServiceError> {
        input.validate_patch()?;
        if let Some(condominio) = input.condominio {
            self.ensure_condominio(condominio.id).await?;
        }

        let updated = sqlx::query_scalar::<_, i64>(
            "UPDATE usuarios
             SET nome = COALESCE($2, nome),
                 cpf = COALESCE($3, cpf),
                 senha_hash = COALESCE($4, senha_hash),
                 telefone = COALESCE($5, telefone),
                 tipo_do_usuario = COALESCE($6, tipo_do_usuario),
                 bloco = COALESCE($7, bloco),
                 apartamento = COALESCE($8, apartamento),
                 condominio_id = COALESCE($9, condominio_id),
                 updated_at = now()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(input.nome.as_deref().map(str::trim))
        .bind(input.cpf.as_deref().and_then(normalize_cpf))
        .bind(input.senha.as_deref().map(hash_password))
        .bind(input.telefone.as_deref().map(str::trim))
        .bind(input.tipo_do_usuario.map(TipoDoUsuario::as_str))
        .bind(input.bloco.map(|b| b.to_ascii_uppercase().to_string()))
        .bind(input.apartamento)
        .bind(input.condominio.map(|c| c.id))
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        if updated.is_none() {
            warn!(id, "update for unknown usuario");
            return Err(ServiceError::NotFound { entity: Entity::Usuario, id });
        }
        info!(id, "usuario updated");
        self.fetch(id)
            .await?
            .ok_or(ServiceError::NotFound { entity: Entity::Usuario, id })
    }

    async fn delete(&self, id: i64) -> Result<UsuarioDto, ServiceError> {
        let row = sqlx::query_as::<_, UsuarioRow>(&format!(
            "WITH u AS (DELETE FROM usuarios WHERE id = $1 RETURNING *)
             SELECT {USUARIO_COLUMNS} FROM u JOIN condominios c ON c.id = u.condominio_id"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ServiceError::NotFound { entity: Entity::Usuario, id })?;

        info!(id, "usuario deleted");
        Ok(UsuarioDto::from(&Usuario::try_from(row)?))
    }
}

#[cfg(test)]
#[path = "usuario_test.rs"]
mod tests;
