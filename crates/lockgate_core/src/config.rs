use std::env;

use crate::error::{CoreError, Result};
use crate::gate::SourceId;

pub const ENV_DEFAULT_SOURCE: &str = "LOCKGATE_DEFAULT_SOURCE";
pub const ENV_RELOCK: &str = "LOCKGATE_RELOCK";
pub const ENV_DIAGNOSTICS: &str = "LOCKGATE_DIAGNOSTICS";

/// What a lock request does when its source already holds the lock.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum RelockPolicy {
    /// Every lock request delivers `transition(false)`, held or not.
    #[default]
    Always,
    /// A lock from a source that already holds one is a silent no-op.
    SuppressHeld,
}

impl RelockPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "always" => Some(RelockPolicy::Always),
            "suppress" | "suppress-held" | "suppress_held" => Some(RelockPolicy::SuppressHeld),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            RelockPolicy::Always => "always",
            RelockPolicy::SuppressHeld => "suppress",
        }
    }
}

/// Per-gate settings.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GateConfig {
    /// Source used by `Gate::request_default`.
    pub default_source: SourceId,
    pub relock: RelockPolicy,
    /// Log redundant locks and releases of unheld sources at `warn`.
    pub diagnostics: bool,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            default_source: SourceId::COMMON,
            relock: RelockPolicy::Always,
            diagnostics: false,
        }
    }
}

impl GateConfig {
    pub fn with_default_source(mut self, source: impl Into<SourceId>) -> Self {
        self.default_source = source.into();
        self
    }

    pub fn with_relock(mut self, relock: RelockPolicy) -> Self {
        self.relock = relock;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: bool) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// Defaults overridden by `LOCKGATE_*` variables from the process environment.
    ///
    /// Only the `LOCKGATE_*` keys are read; a non-UTF-8 value in one of them is
    /// reported as an invalid value.
    pub fn from_env() -> Result<Self> {
        let mut pairs = Vec::new();

        for key in [ENV_DEFAULT_SOURCE, ENV_RELOCK, ENV_DIAGNOSTICS] {
            if let Some(raw) = env::var_os(key) {
                let value = raw.into_string().map_err(|raw| {
                    CoreError::invalid_config(key, raw.to_string_lossy().into_owned())
                })?;
                pairs.push((key, value));
            }
        }

        Self::from_env_iter(pairs)
    }

    /// Defaults overridden by any `LOCKGATE_*` pairs in `iter`. Other keys are ignored.
    pub fn from_env_iter<I, K, V>(iter: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();

        for (key, value) in iter {
            let value = value.as_ref();
            match key.as_ref() {
                ENV_DEFAULT_SOURCE => {
                    let trimmed = value.trim();
                    if trimmed.is_empty() {
                        return Err(CoreError::invalid_config(
                            ENV_DEFAULT_SOURCE,
                            value.to_owned(),
                        ));
                    }
                    config.default_source = SourceId::from(trimmed.to_owned());
                }
                ENV_RELOCK => {
                    config.relock = RelockPolicy::parse(value)
                        .ok_or_else(|| CoreError::invalid_config(ENV_RELOCK, value.to_owned()))?;
                }
                ENV_DIAGNOSTICS => {
                    config.diagnostics = parse_bool(value).ok_or_else(|| {
                        CoreError::invalid_config(ENV_DIAGNOSTICS, value.to_owned())
                    })?;
                }
                _ => {}
            }
        }

        Ok(config)
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
