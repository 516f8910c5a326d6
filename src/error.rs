//! Error raised by a failed invariant check.
//!
//! [`InvariantError`] is the single error type returned by every checker entry
//! point. Its [`ErrorKind`] separates caller misuse from genuine violations so
//! that callers and tests can match on the failure mode without parsing
//! messages. Serialized, it takes the shape that generic error reporters
//! expect:
//!
//! ```json
//! { "message": "...", "name": "Invariant Violation", "skipFrames": 1 }
//! ```
//!
//! `name` and `skipFrames` are omitted when they do not apply.

use std::panic::Location;

use serde::Serialize;
use thiserror::Error;

/// Value of [`InvariantError::name`] for descriptive violations.
pub const VIOLATION_NAME: &str = "Invariant Violation";

/// Message used when a check fails in optimized mode or without a template.
pub const MINIFIED_MESSAGE: &str =
    "Minified exception occurred; use the non-minified dev environment \
     for the full error message and additional helpful warnings.";

/// Message of the misuse error raised in development mode.
pub const MISSING_TEMPLATE_MESSAGE: &str = "invariant(...): Second argument must be a string.";

/// Frames a reporter should skip to land on the caller.
pub const SKIP_FRAMES: u32 = 1;

// ---------------------------------------------------------------------------
// ErrorKind
// ---------------------------------------------------------------------------

/// What went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The caller supplied no template while development diagnostics were on.
    ///
    /// Raised before the condition is looked at, so a passing condition does
    /// not avoid it.
    MissingTemplate,
    /// A check failed in optimized mode or without a template; only the
    /// generic notice is reported.
    Minified,
    /// A check failed in development mode and its template was formatted
    /// into the message.
    Violation,
}

impl ErrorKind {
    /// Short stable label, used as a structured logging field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingTemplate => "missing-template",
            Self::Minified => "minified",
            Self::Violation => "violation",
        }
    }

    /// Whether this kind signals a failed condition rather than misuse.
    #[must_use]
    pub const fn is_violation(self) -> bool {
        matches!(self, Self::Minified | Self::Violation)
    }
}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// A failed invariant, or a misused checker.
#[derive(Clone, Debug, PartialEq, Eq, Error, Serialize)]
#[error("{message}")]
#[serde(rename_all = "camelCase")]
pub struct InvariantError {
    #[serde(skip)]
    kind: ErrorKind,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip_frames: Option<u32>,
    #[serde(skip)]
    location: &'static Location<'static>,
}

impl InvariantError {
    pub(crate) fn missing_template(location: &'static Location<'static>) -> Self {
        Self {
            kind: ErrorKind::MissingTemplate,
            message: MISSING_TEMPLATE_MESSAGE.to_owned(),
            name: None,
            skip_frames: None,
            location,
        }
    }

    pub(crate) fn minified(location: &'static Location<'static>) -> Self {
        Self {
            kind: ErrorKind::Minified,
            message: MINIFIED_MESSAGE.to_owned(),
            name: None,
            skip_frames: Some(SKIP_FRAMES),
            location,
        }
    }

    pub(crate) fn violation(message: String, location: &'static Location<'static>) -> Self {
        Self {
            kind: ErrorKind::Violation,
            message,
            name: Some(VIOLATION_NAME),
            skip_frames: Some(SKIP_FRAMES),
            location,
        }
    }

    /// The failure mode.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// The formatted diagnostic or the generic notice.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// `Some("Invariant Violation")` on [`ErrorKind::Violation`].
    #[must_use]
    pub const fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Frames to skip when attributing the error; `Some(1)` on violations.
    #[must_use]
    pub const fn skip_frames(&self) -> Option<u32> {
        self.skip_frames
    }

    /// Source location of the checker call that produced this error.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Panic with this error's message, reported at the original call site.
    ///
    /// # Panics
    /// Always.
    #[track_caller]
    pub fn raise(self) -> ! {
        let location = self.location;
        panic!(
            "{}: {} (at {}:{})",
            self.name.unwrap_or("Error"),
            self.message,
            location.file(),
            location.line()
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
