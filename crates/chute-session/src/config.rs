/// Direction a session is configured for.
///
/// This crate only drives decompression, but the underlying backends are
/// bidirectional and the direction is part of their session parameters,
/// so it is carried explicitly rather than assumed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    Compress,
    #[default]
    Decompress,
}

/// Configuration bound to one engine session.
///
/// ```text
/// ┌───────────────────┬───────────────────────────────────────────────┐
/// │ Field             │ Purpose                                       │
/// ├───────────────────┼───────────────────────────────────────────────┤
/// │ direction         │ Compress or Decompress                        │
/// │ output_hint       │ Backend output-buffer size hint, in bytes     │
/// │ software_fallback │ Fall back to software when hardware is busy   │
/// └───────────────────┴───────────────────────────────────────────────┘
/// ```
///
/// `output_hint` is advisory: backends may round it or ignore it, and it
/// does not constrain the driver's chunk size. Defaults come from the
/// backend (`EngineBackend::defaults`), then [`ConfigOverrides`] are
/// applied on top.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    pub direction: Direction,
    pub output_hint: usize,
    pub software_fallback: bool,
}

impl Default for SessionConfig {
    /// Decompression, a 64 KiB output hint, no software fallback.
    fn default() -> Self {
        Self {
            direction: Direction::Decompress,
            output_hint: 64 * 1024,
            software_fallback: false,
        }
    }
}

/// Per-field overrides applied on top of backend defaults.
///
/// `None` keeps the backend's default for that field. This is the
/// "apply defaults, then overrides" half of session initialization.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConfigOverrides {
    pub direction: Option<Direction>,
    pub output_hint: Option<usize>,
    pub software_fallback: Option<bool>,
}

impl ConfigOverrides {
    /// Fold these overrides into `config`, field by field.
    #[must_use]
    pub fn apply(self, mut config: SessionConfig) -> SessionConfig {
        if let Some(direction) = self.direction {
            config.direction = direction;
        }
        if let Some(output_hint) = self.output_hint {
            config.output_hint = output_hint;
        }
        if let Some(software_fallback) = self.software_fallback {
            config.software_fallback = software_fallback;
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_overrides_keep_defaults() {
        let config = ConfigOverrides::default().apply(SessionConfig::default());
        assert_eq!(config, SessionConfig::default());
    }

    #[test]
    fn overrides_replace_only_set_fields() {
        let overrides = ConfigOverrides {
            output_hint: Some(4096),
            ..ConfigOverrides::default()
        };
        let config = overrides.apply(SessionConfig::default());
        assert_eq!(config.output_hint, 4096);
        assert_eq!(config.direction, Direction::Decompress);
        assert!(!config.software_fallback);
    }
}
