//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Each resource exposes an `async_trait` service trait and a Postgres-backed
//! implementation. Route handlers only see `Arc<dyn ...Service>` from
//! [`crate::state::AppState`], which keeps them focused on protocol
//! translation and lets handler tests swap in recording mocks.

pub mod area;
pub mod comunicado;
pub mod condominio;
pub mod ocorrencia;
pub mod password;
pub mod usuario;

#[cfg(test)]
pub mod mock;

// =============================================================================
// ERROR
// =============================================================================

/// Errors shared by every resource service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required field is missing, blank, or malformed. The message is user-facing.
    #[error("{0}")]
    Validation(String),
    /// No row with this id exists for the named entity.
    #[error("{entity} {id} não {}", .entity.encontrado())]
    NotFound { entity: Entity, id: i64 },
    /// Not-found with a resource-specific, user-facing message.
    #[error("{0}")]
    NotFoundMessage(String),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Resources addressed by id, named the way error messages show them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Condominio,
    Usuario,
    Ocorrencia,
    AreaComum,
}

impl Entity {
    #[must_use]
    pub fn nome(self) -> &'static str {
        match self {
            Self::Condominio => "Condomínio",
            Self::Usuario => "Usuário",
            Self::Ocorrencia => "Ocorrência",
            Self::AreaComum => "Área comum",
        }
    }

    /// Participle agreeing with the entity's grammatical gender.
    fn encontrado(self) -> &'static str {
        match self {
            Self::Condominio | Self::Usuario => "encontrado",
            Self::Ocorrencia | Self::AreaComum => "encontrada",
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.nome())
    }
}

impl ServiceError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}

/// Reject blank required strings with a user-facing message.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] when `value` is empty after trimming.
pub fn require_text(value: &str, message: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::validation(message));
    }
    Ok(())
}

/// Same as [`require_text`] but for optional patch fields: `None` is allowed,
/// a present blank value is not.
///
/// # Errors
///
/// Returns [`ServiceError::Validation`] when `value` is present and blank.
pub fn reject_blank(value: Option<&str>, message: &str) -> Result<(), ServiceError> {
    match value {
        Some(v) => require_text(v, message),
        None => Ok(()),
    }
}

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db| db.is_unique_violation())
}

/// A TEXT column held a value no enum variant maps to.
pub(crate) fn decode_error(column: &str, value: &str) -> ServiceError {
    ServiceError::Database(sqlx::Error::Decode(format!("unexpected {column} value: {value:?}").into()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
