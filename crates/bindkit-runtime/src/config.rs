#![forbid(unsafe_code)]

//! Runtime configuration for the reactive core.
//!
//! Values come from defaults, explicit builders, or environment variables
//! prefixed with `BINDKIT_`. Environment parsing never fails: unparseable or
//! out-of-range values are reported as [`ConfigError`] diagnostics and the
//! default is kept.
//!
//! | Variable | Field | Default |
//! |----------|-------|---------|
//! | `BINDKIT_MAX_NOTIFY_PASSES` | [`ReactiveConfig::max_notify_passes`] | 1024 |

use std::env;
use std::fmt;
use std::sync::OnceLock;

/// Default bound on notification passes driven by one outermost mutation.
pub const DEFAULT_MAX_NOTIFY_PASSES: usize = 1024;

const ENV_MAX_NOTIFY_PASSES: &str = "BINDKIT_MAX_NOTIFY_PASSES";

/// Tunables shared by [`ObservableRecord`](crate::ObservableRecord) and
/// [`Observable`](crate::Observable).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReactiveConfig {
    /// Maximum number of notification passes a single outermost `set` may
    /// run, counting the passes queued by re-entrant mutations. Hitting the
    /// limit is treated as a runaway feedback loop.
    pub max_notify_passes: usize,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            max_notify_passes: DEFAULT_MAX_NOTIFY_PASSES,
        }
    }
}

/// A rejected configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError {
    pub field: &'static str,
    pub value: String,
    pub message: &'static str,
}

impl ConfigError {
    fn new(field: &'static str, value: impl Into<String>, message: &'static str) -> Self {
        Self {
            field,
            value: value.into(),
            message,
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={} ({})", self.field, self.value, self.message)
    }
}

impl std::error::Error for ConfigError {}

/// Parsed config plus the diagnostics collected while parsing.
#[derive(Debug, Clone)]
pub struct ReactiveConfigParse {
    pub config: ReactiveConfig,
    pub errors: Vec<ConfigError>,
}

impl ReactiveConfig {
    /// Set the notification pass limit.
    #[must_use]
    pub fn with_max_notify_passes(mut self, passes: usize) -> Self {
        self.max_notify_passes = passes;
        self
    }

    /// Check invariants. A zero pass limit would reject every mutation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_notify_passes == 0 {
            return Err(ConfigError::new(
                "max_notify_passes",
                "0",
                "must allow at least one notification pass",
            ));
        }
        Ok(())
    }

    /// Parse config from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| env::var(key).ok()).config
    }

    /// Parse config through a custom lookup, returning diagnostics.
    pub fn from_env_with<F>(mut get: F) -> ReactiveConfigParse
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let mut errors = Vec::new();

        if let Some(raw) = get(ENV_MAX_NOTIFY_PASSES) {
            match raw.trim().parse::<usize>() {
                Ok(0) => errors.push(ConfigError::new(
                    "max_notify_passes",
                    raw,
                    "must allow at least one notification pass",
                )),
                Ok(passes) => config.max_notify_passes = passes,
                Err(_) => errors.push(ConfigError::new(
                    "max_notify_passes",
                    raw,
                    "expected a positive integer",
                )),
            }
        }

        for err in &errors {
            tracing::warn!(error = %err, "ignoring invalid reactive config value");
        }

        ReactiveConfigParse { config, errors }
    }

    /// Process-wide config, read from the environment once.
    #[must_use]
    pub fn global() -> Self {
        static GLOBAL: OnceLock<ReactiveConfig> = OnceLock::new();
        *GLOBAL.get_or_init(Self::from_env)
    }
}
