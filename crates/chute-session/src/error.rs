/// Session lifecycle stage at which backend acquisition failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    /// `open()` — acquiring the backend's engine resources.
    Open,
    /// `setup()` — binding the session configuration.
    Setup,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Open => write!(f, "open"),
            Stage::Setup => write!(f, "setup"),
        }
    }
}

/// Errors from session establishment.
///
/// Both variants are terminal: the session is never partially usable, and
/// the backend has already been closed by the time the error surfaces.
///
/// ```text
/// ┌────────────────────┬───────────────────────────────────────────────┐
/// │ Variant            │ Cause                                         │
/// ├────────────────────┼───────────────────────────────────────────────┤
/// │ Config             │ Backend defaults could not be obtained        │
/// │ BackendUnavailable │ open()/setup() reported a non-success status  │
/// │                    │ other than already-initialized                │
/// └────────────────────┴───────────────────────────────────────────────┘
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("engine defaults could not be obtained: {reason}")]
    Config { reason: String },

    #[error("decompression backend unavailable during {stage}: status {code}")]
    BackendUnavailable { stage: Stage, code: i32 },
}
