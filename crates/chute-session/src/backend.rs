use std::io;

use chute_engine::{DecompressEngine, ZstdEngine};

use crate::config::SessionConfig;
use crate::error::SessionError;

/// Outcome of a backend acquisition step (`open` or `setup`).
///
/// `AlreadyInitialized` is the idempotent-success case: a previous or
/// concurrent caller already brought the backend up, which is as good as
/// `Ready`. Only `Unavailable` is a failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Acquire {
    Ready,
    AlreadyInitialized,
    Unavailable { code: i32 },
}

impl Acquire {
    /// Whether this outcome counts as success for session establishment.
    #[must_use]
    pub fn is_success(self) -> bool {
        !matches!(self, Acquire::Unavailable { .. })
    }
}

/// Backend that can acquire, configure, and release one decompression
/// engine instance.
///
/// This is the seam between the session layer and whatever actually does
/// the work — a hardware accelerator, the software [`ZstdEngine`], or a
/// test double. [`Session`](crate::Session) owns the calling order:
///
/// ```text
///   defaults() ──▶ open(cfg) ──▶ setup(cfg) ──▶ engine_mut() … ──▶ close()
/// ```
///
/// `close()` must be idempotent and safe to call after a failed or
/// partial `open`/`setup` — the session guard calls it unconditionally.
pub trait EngineBackend {
    type Engine: DecompressEngine;

    /// Produce the backend's default session parameters.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Config`] when defaults cannot be obtained.
    fn defaults(&self) -> Result<SessionConfig, SessionError>;

    /// Acquire engine resources (hardware or software).
    fn open(&mut self, config: &SessionConfig) -> Acquire;

    /// Bind the configuration to the session.
    fn setup(&mut self, config: &SessionConfig) -> Acquire;

    /// The engine this backend drives. Only called between a successful
    /// `setup` and `close`.
    fn engine_mut(&mut self) -> &mut Self::Engine;

    /// Release backend resources.
    fn close(&mut self);
}

/// Always-available software backend over [`ZstdEngine`].
///
/// The engine context is allocated up front in [`SoftwareBackend::new`],
/// so `open` and `setup` only report status — there is no hardware to
/// negotiate with. `close` drops nothing eagerly; the engine is released
/// with the backend itself.
pub struct SoftwareBackend {
    engine: ZstdEngine,
}

impl SoftwareBackend {
    /// Allocate a software engine context.
    ///
    /// # Errors
    ///
    /// Returns an error if the zstd decoder context cannot be allocated.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            engine: ZstdEngine::new()?,
        })
    }
}

impl EngineBackend for SoftwareBackend {
    type Engine = ZstdEngine;

    fn defaults(&self) -> Result<SessionConfig, SessionError> {
        Ok(SessionConfig::default())
    }

    fn open(&mut self, _config: &SessionConfig) -> Acquire {
        Acquire::Ready
    }

    fn setup(&mut self, _config: &SessionConfig) -> Acquire {
        Acquire::Ready
    }

    fn engine_mut(&mut self) -> &mut ZstdEngine {
        &mut self.engine
    }

    fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_is_not_success() {
        assert!(Acquire::Ready.is_success());
        assert!(Acquire::AlreadyInitialized.is_success());
        assert!(!Acquire::Unavailable { code: -1 }.is_success());
    }

    #[test]
    fn software_backend_is_always_ready() {
        let mut backend = SoftwareBackend::new().unwrap();
        let config = backend.defaults().unwrap();
        assert_eq!(backend.open(&config), Acquire::Ready);
        assert_eq!(backend.setup(&config), Acquire::Ready);
    }
}
