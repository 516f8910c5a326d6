//! Build mode: development vs. optimized execution.
//!
//! A [`BuildMode`] decides two things for the checker:
//!
//! - whether a call without a message template is rejected up front, and
//! - whether a failed check without a template falls back to the generic
//!   message (optimized) or is already rejected (development).
//!
//! Every [`Checker`](crate::Checker) carries its own mode. The process-wide
//! mode used by the free functions and macros is resolved once and never
//! changes afterwards:
//!
//! 1. an explicit [`BuildMode::install`] before first use, else
//! 2. `INVARIANT_BUILD_MODE` from the environment, else
//! 3. the compile-time default ([`BuildMode::compiled_default`]).

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::Deserialize;

/// Environment variable consulted when the process-wide mode is first read.
pub const MODE_ENV_VAR: &str = "INVARIANT_BUILD_MODE";

static PROCESS_MODE: OnceLock<BuildMode> = OnceLock::new();

// ---------------------------------------------------------------------------
// BuildMode
// ---------------------------------------------------------------------------

/// Development (full diagnostics) or optimized (generic messages) execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    /// Template validation on; violations carry formatted messages.
    #[serde(alias = "dev")]
    Development,
    /// Template validation skipped.
    #[serde(alias = "production", alias = "prod")]
    Optimized,
}

impl BuildMode {
    /// The mode this binary was compiled for.
    ///
    /// The `strip-messages` feature forces [`BuildMode::Optimized`];
    /// otherwise `debug_assertions` picks [`BuildMode::Development`].
    #[must_use]
    pub const fn compiled_default() -> Self {
        if cfg!(feature = "strip-messages") || !cfg!(debug_assertions) {
            Self::Optimized
        } else {
            Self::Development
        }
    }

    /// Resolve a mode from a raw environment value.
    ///
    /// `None`, empty, or unrecognised values yield the compile-time default.
    /// Unrecognised values are reported as a warning.
    #[must_use]
    pub fn from_env_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") => Self::compiled_default(),
            Some(raw) => raw.parse().unwrap_or_else(|e: UnknownMode| {
                tracing::warn!(
                    target: "invariant",
                    env = MODE_ENV_VAR,
                    value = %e.0,
                    "ignoring unrecognised build mode"
                );
                Self::compiled_default()
            }),
        }
    }

    /// Resolve a mode from `INVARIANT_BUILD_MODE`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(MODE_ENV_VAR).ok().as_deref())
    }

    /// The process-wide mode, resolving it on first call.
    #[must_use]
    pub fn current() -> Self {
        *PROCESS_MODE.get_or_init(Self::from_env)
    }

    /// Fix the process-wide mode.
    ///
    /// Must run before the first [`BuildMode::current`] (or any free
    /// [`check`](crate::check) call) to take effect.
    ///
    /// # Errors
    /// Returns the mode already in effect if one was installed or resolved.
    pub fn install(self) -> Result<(), Self> {
        PROCESS_MODE.set(self).map_err(|_| Self::current())
    }

    /// Whether missing templates are rejected.
    #[must_use]
    pub const fn validates_templates(self) -> bool {
        matches!(self, Self::Development)
    }
}

impl Default for BuildMode {
    fn default() -> Self {
        Self::compiled_default()
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Optimized => write!(f, "optimized"),
        }
    }
}

/// A build-mode string that matched no known spelling.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown build mode `{0}` (expected development or optimized)")]
pub struct UnknownMode(pub String);

impl FromStr for BuildMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "optimized" | "production" | "prod" => Ok(Self::Optimized),
            _ => Err(UnknownMode(s.to_owned())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
