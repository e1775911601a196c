//! Recording service mocks for handler tests.
//!
//! Each mock holds one reply queue per method plus a shared call log. Tests
//! push the replies a handler should receive, drive the router, then assert
//! on the log (`calls.count("create") == 1`, argument strings, ordering).
//! An empty queue for a unit-returning method replies `Ok(())`; any other
//! empty queue panics so a missing script fails loudly.

use std::collections::VecDeque;
use std::sync::Mutex;

use super::ServiceError;
use super::area::{AreaComum, AreaService, NovaArea};
use super::comunicado::{ComunicadoDto, ComunicadoService};
use super::condominio::{Condominio, CondominioDto, CondominioPatch, CondominioService};
use super::ocorrencia::{OcorrenciaDto, OcorrenciaInput, OcorrenciaService};
use super::usuario::{Usuario, UsuarioDto, UsuarioInput, UsuarioService};

#[derive(Default)]
pub struct Calls(Mutex<Vec<String>>);

impl Calls {
    fn record(&self, call: impl Into<String>) {
        self.0.lock().unwrap().push(call.into());
    }

    /// Number of recorded calls whose name (text before `(`) is `method`.
    pub fn count(&self, method: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split('(').next() == Some(method))
            .count()
    }

    pub fn all(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }
}

pub struct Replies<T>(Mutex<VecDeque<Result<T, ServiceError>>>);

impl<T> Default for Replies<T> {
    fn default() -> Self {
        Self(Mutex::new(VecDeque::new()))
    }
}

impl<T> Replies<T> {
    pub fn ok(&self, value: T) {
        self.0.lock().unwrap().push_back(Ok(value));
    }

    pub fn err(&self, err: ServiceError) {
        self.0.lock().unwrap().push_back(Err(err));
    }

    fn next(&self, method: &str) -> Result<T, ServiceError> {
        self.0
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| panic!("no scripted reply for {method}"))
    }
}

impl Replies<()> {
    fn next_or_ok(&self) -> Result<(), ServiceError> {
        self.0.lock().unwrap().pop_front().unwrap_or(Ok(()))
    }
}

// =============================================================================
// CONDOMINIO
// =============================================================================

#[derive(Default)]
pub struct MockCondominios {
    pub calls: Calls,
    pub create: Replies<Condominio>,
    pub list: Replies<Vec<Condominio>>,
    pub get: Replies<Condominio>,
    pub update: Replies<Condominio>,
    pub delete: Replies<()>,
}

#[async_trait::async_trait]
impl CondominioService for MockCondominios {
    async fn create(&self, dto: CondominioDto) -> Result<Condominio, ServiceError> {
        self.calls.record(format!("create({})", dto.nome));
        self.create.next("create")
    }

    async fn list(&self) -> Result<Vec<Condominio>, ServiceError> {
        self.calls.record("list");
        self.list.next("list")
    }

    async fn get(&self, id: i64) -> Result<Condominio, ServiceError> {
        self.calls.record(format!("get({id})"));
        self.get.next("get")
    }

    async fn update(&self, id: i64, _patch: CondominioPatch) -> Result<Condominio, ServiceError> {
        self.calls.record(format!("update({id})"));
        self.update.next("update")
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.calls.record(format!("delete({id})"));
        self.delete.next_or_ok()
    }
}

// =============================================================================
// COMUNICADO
// =============================================================================

#[derive(Default)]
pub struct MockComunicados {
    pub calls: Calls,
    pub send: Replies<ComunicadoDto>,
    pub list: Replies<Vec<ComunicadoDto>>,
    pub update: Replies<ComunicadoDto>,
    pub delete: Replies<()>,
}

#[async_trait::async_trait]
impl ComunicadoService for MockComunicados {
    async fn send(&self, dto: ComunicadoDto) -> Result<ComunicadoDto, ServiceError> {
        self.calls.record(format!("send({})", dto.condominio_nome));
        self.send.next("send")
    }

    async fn list(&self) -> Result<Vec<ComunicadoDto>, ServiceError> {
        self.calls.record("list");
        self.list.next("list")
    }

    async fn update(&self, id: i64, mensagem: String) -> Result<ComunicadoDto, ServiceError> {
        self.calls.record(format!("update({id}, {mensagem})"));
        self.update.next("update")
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.calls.record(format!("delete({id})"));
        self.delete.next_or_ok()
    }
}

// =============================================================================
// OCORRENCIA
// =============================================================================

#[derive(Default)]
pub struct MockOcorrencias {
    pub calls: Calls,
    pub create: Replies<OcorrenciaDto>,
    pub list: Replies<Vec<OcorrenciaDto>>,
    pub get: Replies<OcorrenciaDto>,
    pub update: Replies<OcorrenciaDto>,
    pub delete: Replies<()>,
}

#[async_trait::async_trait]
impl OcorrenciaService for MockOcorrencias {
    async fn create(&self, input: OcorrenciaInput) -> Result<OcorrenciaDto, ServiceError> {
        self.calls.record(format!("create({})", input.titulo.unwrap_or_default()));
        self.create.next("create")
    }

    async fn list(&self) -> Result<Vec<OcorrenciaDto>, ServiceError> {
        self.calls.record("list");
        self.list.next("list")
    }

    async fn get(&self, id: i64) -> Result<OcorrenciaDto, ServiceError> {
        self.calls.record(format!("get({id})"));
        self.get.next("get")
    }

    async fn update(&self, id: i64, input: OcorrenciaInput) -> Result<OcorrenciaDto, ServiceError> {
        self.calls.record(format!("update({id}, {})", input.titulo.unwrap_or_default()));
        self.update.next("update")
    }

    async fn delete(&self, id: i64) -> Result<(), ServiceError> {
        self.calls.record(format!("delete({id})"));
        self.delete.next_or_ok()
    }
}

// =============================================================================
// USUARIO
// =============================================================================

#[derive(Default)]
pub struct MockUsuarios {
    pub calls: Calls,
    pub create: Replies<Usuario>,
    pub list: Replies<Vec<UsuarioDto>>,
    pub find: Replies<Option<UsuarioDto>>,
    pub update: Replies<Usuario>,
    pub delete: Replies<UsuarioDto>,
}

#[async_trait::async_trait]
impl UsuarioService for MockUsuarios {
    async fn create(&self, input: UsuarioInput) -> Result<Usuario, ServiceError> {
        self.calls.record(format!("create({})", input.nome.unwrap_or_default()));
        self.create.next("create")
    }

    async fn list(&self) -> Result<Vec<UsuarioDto>, ServiceError> {
        self.calls.record("list");
        self.list.next("list")
    }

    async fn find(&self, id: i64) -> Result<Option<UsuarioDto>, ServiceError> {
        self.calls.record(format!("find({id})"));
        self.find.next("find")
    }

    async fn update(&self, id: i64, input: UsuarioInput) -> Result<Usuario, ServiceError> {
        self.calls.record(format!("update({id}, {})", input.nome.unwrap_or_default()));
        self.update.next("update")
    }

    async fn delete(&self, id: i64) -> Result<UsuarioDto, ServiceError> {
        self.calls.record(format!("delete({id})"));
        self.delete.next("delete")
    }

    fn to_dto(&self, usuario: &Usuario) -> UsuarioDto {
        self.calls.record(format!("to_dto({})", usuario.id));
        UsuarioDto::from(usuario)
    }
}

// =============================================================================
// AREA
// =============================================================================

#[derive(Default)]
pub struct MockAreas {
    pub calls: Calls,
    pub create: Replies<AreaComum>,
    pub list: Replies<Vec<AreaComum>>,
}

#[async_trait::async_trait]
impl AreaService for MockAreas {
    async fn create(&self, area: NovaArea) -> Result<AreaComum, ServiceError> {
        self.calls.record(format!("create({})", area.nome));
        self.create.next("create")
    }

    async fn list(&self) -> Result<Vec<AreaComum>, ServiceError> {
        self.calls.record("list");
        self.list.next("list")
    }
}
