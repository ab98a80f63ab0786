use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

use crate::{EngineError, ResultEngine, backend::Backend, session::SessionProvider, sync::CycleSeq};

mod aggregate;
mod auth;
mod mutations;

pub use auth::AuthOutcome;
pub use mutations::{MutationOp, MutationReport};

/// Aggregation engine and mutation handlers over one backend and session.
///
/// All reads go through [`Engine::refresh`]; every mutation ends by calling
/// it, whatever the write's outcome.
pub struct Engine {
    backend: Arc<dyn Backend>,
    session: Arc<dyn SessionProvider>,
    sequence: AtomicU64,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.token().is_some()
    }

    fn next_seq(&self) -> CycleSeq {
        CycleSeq::new(self.sequence.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    backend: Option<Arc<dyn Backend>>,
    session: Option<Arc<dyn SessionProvider>>,
}

impl EngineBuilder {
    /// Pass the required backend
    pub fn backend(mut self, backend: Arc<dyn Backend>) -> EngineBuilder {
        self.backend = Some(backend);
        self
    }

    /// Pass the required session holder
    pub fn session(mut self, session: Arc<dyn SessionProvider>) -> EngineBuilder {
        self.session = Some(session);
        self
    }

    /// Construct `Engine`
    pub fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            backend: self.backend.ok_or(EngineError::Builder("backend"))?,
            session: self.session.ok_or(EngineError::Builder("session"))?,
            sequence: AtomicU64::new(0),
        })
    }
}
