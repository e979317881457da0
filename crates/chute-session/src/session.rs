use crate::backend::{Acquire, EngineBackend};
use crate::config::{ConfigOverrides, SessionConfig};
use crate::error::{SessionError, Stage};

/// Scoped handle to one configured engine instance.
///
/// A session is created once per run, hands its engine to the stream
/// driver, and is torn down once. Teardown is expressed as scoped
/// acquisition with guaranteed release: `Drop` calls the backend's
/// `close()` exactly once on every exit path, whether the run succeeded,
/// the driver failed mid-stream, or establishment itself bailed out after
/// partially acquiring the backend.
///
/// ```text
///   Session::establish(backend, overrides)
///       │  defaults() + overrides        (ConfigError on failure)
///       │  open(cfg)                     (idempotent-success tolerant)
///       │  setup(cfg)                    (idempotent-success tolerant)
///       ▼
///   Session ── engine_mut() ──▶ driver runs
///       │
///       ▼ drop / close()
///   backend.close()                      (exactly once, always)
/// ```
///
/// The session is exclusively owned by one driver run at a time; nothing
/// here is shared or locked (single-threaded by design).
pub struct Session<B: EngineBackend> {
    backend: B,
    config: SessionConfig,
    closed: bool,
}

impl<B: EngineBackend> Session<B> {
    /// Initialize, open, and set up a session over `backend`.
    ///
    /// Defaults come from the backend, then `overrides` are applied on
    /// top. `open` and `setup` tolerate the already-initialized case — a
    /// backend brought up by a previous caller counts as success.
    ///
    /// # Errors
    ///
    /// - [`SessionError::Config`] if the backend cannot produce defaults.
    ///   Nothing was acquired; no teardown runs.
    /// - [`SessionError::BackendUnavailable`] if `open` or `setup` fails.
    ///   The backend is closed before the error is returned.
    pub fn establish(backend: B, overrides: ConfigOverrides) -> Result<Self, SessionError> {
        let config = overrides.apply(backend.defaults()?);

        // From here on the guard owns teardown: an early return drops
        // `session`, which closes the backend.
        let mut session = Self {
            backend,
            config,
            closed: false,
        };

        if let Acquire::Unavailable { code } = session.backend.open(&session.config) {
            return Err(SessionError::BackendUnavailable {
                stage: Stage::Open,
                code,
            });
        }

        if let Acquire::Unavailable { code } = session.backend.setup(&session.config) {
            return Err(SessionError::BackendUnavailable {
                stage: Stage::Setup,
                code,
            });
        }

        Ok(session)
    }

    /// The configuration bound to this session.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The engine this session drives.
    pub fn engine_mut(&mut self) -> &mut B::Engine {
        self.backend.engine_mut()
    }

    /// Release the backend now instead of at end of scope.
    pub fn close(mut self) {
        self.close_inner();
    }

    fn close_inner(&mut self) {
        if !self.closed {
            self.closed = true;
            self.backend.close();
        }
    }
}

impl<B: EngineBackend> std::fmt::Debug for Session<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("closed", &self.closed)
            .finish_non_exhaustive()
    }
}

impl<B: EngineBackend> Drop for Session<B> {
    fn drop(&mut self) {
        self.close_inner();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use chute_engine::{DecompressEngine, EngineFault, EngineStep};

    use super::*;
    use crate::config::Direction;

    /// Engine stub: consumes everything, produces nothing.
    struct NoopEngine;

    impl DecompressEngine for NoopEngine {
        fn decompress(
            &mut self,
            input: &[u8],
            _output: &mut [u8],
            _last_slice: bool,
        ) -> Result<EngineStep, EngineFault> {
            Ok(EngineStep {
                consumed: input.len(),
                produced: 0,
                pending_out: 0,
            })
        }
    }

    /// Backend double that replays scripted open/setup outcomes and logs
    /// every lifecycle call.
    struct ScriptedBackend {
        open_outcome: Acquire,
        setup_outcome: Acquire,
        log: Rc<RefCell<Vec<&'static str>>>,
        engine: NoopEngine,
    }

    impl ScriptedBackend {
        fn new(open: Acquire, setup: Acquire) -> (Self, Rc<RefCell<Vec<&'static str>>>) {
            let log = Rc::new(RefCell::new(Vec::new()));
            let backend = Self {
                open_outcome: open,
                setup_outcome: setup,
                log: Rc::clone(&log),
                engine: NoopEngine,
            };
            (backend, log)
        }
    }

    impl EngineBackend for ScriptedBackend {
        type Engine = NoopEngine;

        fn defaults(&self) -> Result<SessionConfig, SessionError> {
            self.log.borrow_mut().push("defaults");
            Ok(SessionConfig::default())
        }

        fn open(&mut self, _config: &SessionConfig) -> Acquire {
            self.log.borrow_mut().push("open");
            self.open_outcome
        }

        fn setup(&mut self, _config: &SessionConfig) -> Acquire {
            self.log.borrow_mut().push("setup");
            self.setup_outcome
        }

        fn engine_mut(&mut self) -> &mut NoopEngine {
            &mut self.engine
        }

        fn close(&mut self) {
            self.log.borrow_mut().push("close");
        }
    }

    #[test]
    fn establish_then_drop_closes_exactly_once() {
        let (backend, log) = ScriptedBackend::new(Acquire::Ready, Acquire::Ready);
        {
            let _session = Session::establish(backend, ConfigOverrides::default()).unwrap();
        }
        assert_eq!(*log.borrow(), vec!["defaults", "open", "setup", "close"]);
    }

    #[test]
    fn already_initialized_counts_as_success() {
        let (backend, _log) =
            ScriptedBackend::new(Acquire::AlreadyInitialized, Acquire::AlreadyInitialized);
        assert!(Session::establish(backend, ConfigOverrides::default()).is_ok());
    }

    #[test]
    fn open_failure_reports_stage_and_still_closes() {
        let (backend, log) =
            ScriptedBackend::new(Acquire::Unavailable { code: -7 }, Acquire::Ready);
        let err = Session::establish(backend, ConfigOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::BackendUnavailable {
                stage: Stage::Open,
                code: -7
            }
        ));
        // setup is never reached, close still runs
        assert_eq!(*log.borrow(), vec!["defaults", "open", "close"]);
    }

    #[test]
    fn setup_failure_still_closes() {
        let (backend, log) =
            ScriptedBackend::new(Acquire::Ready, Acquire::Unavailable { code: -3 });
        let err = Session::establish(backend, ConfigOverrides::default()).unwrap_err();
        assert!(matches!(
            err,
            SessionError::BackendUnavailable {
                stage: Stage::Setup,
                ..
            }
        ));
        assert_eq!(*log.borrow(), vec!["defaults", "open", "setup", "close"]);
    }

    #[test]
    fn explicit_close_does_not_double_close() {
        let (backend, log) = ScriptedBackend::new(Acquire::Ready, Acquire::Ready);
        let session = Session::establish(backend, ConfigOverrides::default()).unwrap();
        session.close();
        assert_eq!(
            log.borrow().iter().filter(|&&c| c == "close").count(),
            1
        );
    }

    #[test]
    fn overrides_are_bound_to_the_session() {
        let (backend, _log) = ScriptedBackend::new(Acquire::Ready, Acquire::Ready);
        let overrides = ConfigOverrides {
            direction: Some(Direction::Decompress),
            output_hint: Some(64 * 1024),
            software_fallback: Some(false),
        };
        let session = Session::establish(backend, overrides).unwrap();
        assert_eq!(session.config().output_hint, 64 * 1024);
    }
}
