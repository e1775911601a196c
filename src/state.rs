//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds one trait object per resource service; production wires the
//! Postgres implementations, tests wire the recording mocks.

use std::sync::Arc;

use sqlx::PgPool;

use crate::services::area::{AreaService, PgAreaService};
use crate::services::comunicado::{ComunicadoService, PgComunicadoService};
use crate::services::condominio::{CondominioService, PgCondominioService};
use crate::services::ocorrencia::{OcorrenciaService, PgOcorrenciaService};
use crate::services::usuario::{PgUsuarioService, UsuarioService};

/// Clone is required by Axum; every field is an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub condominios: Arc<dyn CondominioService>,
    pub comunicados: Arc<dyn ComunicadoService>,
    pub ocorrencias: Arc<dyn OcorrenciaService>,
    pub usuarios: Arc<dyn UsuarioService>,
    pub areas: Arc<dyn AreaService>,
}

impl AppState {
    /// Wire every service to the same Postgres pool.
    #[must_use]
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            condominios: Arc::new(PgCondominioService::new(pool.clone())),
            comunicados: Arc::new(PgComunicadoService::new(pool.clone())),
            ocorrencias: Arc::new(PgOcorrenciaService::new(pool.clone())),
            usuarios: Arc::new(PgUsuarioService::new(pool.clone())),
            areas: Arc::new(PgAreaService::new(pool)),
        }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
