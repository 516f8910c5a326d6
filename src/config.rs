//! Checker configuration (TOML).
//!
//! Lets a host pin the build mode and logging behaviour from a file instead
//! of code:
//!
//! ```toml
//! [checker]
//! mode = "optimized"     # or "development"; omitted -> process-wide mode
//! log_violations = true
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::check::Checker;
use crate::mode::BuildMode;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Top-level configuration.
///
/// Missing fields use defaults. Missing file → all defaults (no error).
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InvariantConfig {
    /// Checker settings.
    #[serde(default)]
    pub checker: CheckerConfig,
}

// ---------------------------------------------------------------------------
// CheckerConfig
// ---------------------------------------------------------------------------

/// The `[checker]` table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    /// Build mode override. `None` defers to [`BuildMode::current`].
    #[serde(default)]
    pub mode: Option<BuildMode>,

    /// Emit a `tracing` event for every failed check (default: `true`).
    #[serde(default = "default_log_violations")]
    pub log_violations: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            mode: None,
            log_violations: default_log_violations(),
        }
    }
}

const fn default_log_violations() -> bool {
    true
}

impl CheckerConfig {
    /// The mode this config selects, falling back to the process-wide one.
    #[must_use]
    pub fn effective_mode(&self) -> BuildMode {
        self.mode.unwrap_or_else(BuildMode::current)
    }

    /// Build a [`Checker`] from these settings.
    #[must_use]
    pub fn checker(&self) -> Checker {
        Checker::new(self.effective_mode()).with_logging(self.log_violations)
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A configuration file could not be read or parsed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{}: {message}", origin(.path))]
pub struct ConfigError {
    /// The file being loaded, if the config came from one.
    pub path: Option<PathBuf>,
    /// Human-readable message, prefixed with `line N:` when TOML reports a span.
    pub message: String,
}

#[allow(clippy::ref_option)]
fn origin(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map_or_else(|| "config error".to_owned(), |p| p.display().to_string())
}

impl ConfigError {
    fn unreadable(path: &Path, source: &std::io::Error) -> Self {
        Self {
            path: Some(path.to_owned()),
            message: format!("could not read file: {source}"),
        }
    }

    fn from_toml(input: &str, source: &toml::de::Error) -> Self {
        let message = match source.span() {
            Some(span) => {
                let line = input[..span.start].matches('\n').count() + 1;
                format!("line {line}: {}", source.message())
            }
            None => source.message().to_owned(),
        };
        Self {
            path: None,
            message,
        }
    }

    fn at(self, path: &Path) -> Self {
        Self {
            path: Some(path.to_owned()),
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

impl InvariantConfig {
    /// Read and parse `path`; a missing file yields the defaults.
    ///
    /// # Errors
    /// Returns [`ConfigError`] when the file exists but cannot be read, is not
    /// valid TOML, or contains unknown tables or keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Self::parse(&contents).map_err(|e| e.at(path)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no invariant config, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::unreadable(path, &e)),
        }
    }

    /// Parse a TOML document.
    ///
    /// # Errors
    /// Returns [`ConfigError`] on invalid TOML or unknown tables or keys.
    pub fn parse(input: &str) -> Result<Self, ConfigError> {
        toml::from_str(input).map_err(|e| ConfigError::from_toml(input, &e))
    }

    /// Shorthand for `self.checker.checker()`.
    #[must_use]
    pub fn checker(&self) -> Checker {
        self.checker.checker()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
