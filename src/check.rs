//! The invariant checker.
//!
//! [`Checker::check`] validates the call, then the condition:
//!
//! 1. In development mode a missing template is rejected *before* the
//!    condition is consulted, so `check(true, None, ..)` still fails there.
//! 2. A true condition returns `Ok(())` without formatting or allocating.
//! 3. A false condition yields a [`InvariantError`]: the formatted template
//!    in development mode, the generic notice in optimized mode or when no
//!    template was given.
//!
//! Errors record the caller's location through `#[track_caller]`; the
//! [`invariant!`](crate::invariant) and [`enforce_invariant!`](crate::enforce_invariant)
//! macros expand at the call site, so the location is the macro invocation.

use std::fmt::Display;
use std::panic::Location;

use crate::error::InvariantError;
use crate::format::format_template;
use crate::mode::BuildMode;

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

/// An invariant checker bound to one [`BuildMode`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Checker {
    mode: BuildMode,
    log_violations: bool,
}

impl Checker {
    /// A checker for `mode` that logs failures.
    #[must_use]
    pub const fn new(mode: BuildMode) -> Self {
        Self {
            mode,
            log_violations: true,
        }
    }

    /// A checker for the process-wide mode.
    #[must_use]
    pub fn global() -> Self {
        Self::new(BuildMode::current())
    }

    /// Enable or disable the `tracing` event emitted on failure.
    #[must_use]
    pub const fn with_logging(mut self, enabled: bool) -> Self {
        self.log_violations = enabled;
        self
    }

    /// The build mode this checker was created with.
    #[must_use]
    pub const fn mode(&self) -> BuildMode {
        self.mode
    }

    /// Whether failures emit a `tracing` event.
    #[must_use]
    pub const fn logs_violations(&self) -> bool {
        self.log_violations
    }

    /// Check `condition`, formatting `template` with `args` on failure.
    ///
    /// # Errors
    /// - [`MissingTemplate`] in development mode when `template` is `None`,
    ///   whatever the condition.
    /// - [`Minified`] when the condition is false and either the mode is
    ///   optimized or there is no template.
    /// - [`Violation`] when the condition is false in development mode; the
    ///   template is formatted with `args`.
    ///
    /// [`MissingTemplate`]: crate::ErrorKind::MissingTemplate
    /// [`Minified`]: crate::ErrorKind::Minified
    /// [`Violation`]: crate::ErrorKind::Violation
    #[track_caller]
    #[inline]
    pub fn check(
        &self,
        condition: bool,
        template: Option<&str>,
        args: &[&dyn Display],
    ) -> Result<(), InvariantError> {
        if self.mode.validates_templates() && template.is_none() {
            return Err(self.report(InvariantError::missing_template(Location::caller())));
        }
        if condition {
            return Ok(());
        }
        Err(self.fail(template, args, Location::caller()))
    }

    /// Like [`Checker::check`], but panics on failure.
    ///
    /// # Panics
    /// Whenever [`Checker::check`] would return an error. The panic is
    /// reported at the caller's location.
    #[track_caller]
    #[inline]
    pub fn enforce(&self, condition: bool, template: Option<&str>, args: &[&dyn Display]) {
        if let Err(err) = self.check(condition, template, args) {
            err.raise();
        }
    }

    #[cold]
    #[inline(never)]
    fn fail(
        &self,
        template: Option<&str>,
        args: &[&dyn Display],
        location: &'static Location<'static>,
    ) -> InvariantError {
        let err = match template {
            Some(template) if self.mode.validates_templates() => {
                InvariantError::violation(format_template(template, args), location)
            }
            _ => InvariantError::minified(location),
        };
        self.report(err)
    }

    fn report(&self, err: InvariantError) -> InvariantError {
        if self.log_violations {
            let location = err.location();
            if err.kind().is_violation() {
                tracing::error!(
                    target: "invariant",
                    kind = err.kind().as_str(),
                    mode = %self.mode,
                    file = location.file(),
                    line = location.line(),
                    "{}",
                    err.message()
                );
            } else {
                tracing::warn!(
                    target: "invariant",
                    kind = err.kind().as_str(),
                    mode = %self.mode,
                    file = location.file(),
                    line = location.line(),
                    "{}",
                    err.message()
                );
            }
        }
        err
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::global()
    }
}

// ---------------------------------------------------------------------------
// Process-wide entry points
// ---------------------------------------------------------------------------

/// [`Checker::check`] against the process-wide [`BuildMode`].
///
/// # Errors
/// See [`Checker::check`].
#[track_caller]
#[inline]
pub fn check(
    condition: bool,
    template: Option<&str>,
    args: &[&dyn Display],
) -> Result<(), InvariantError> {
    Checker::global().check(condition, template, args)
}

/// [`Checker::enforce`] against the process-wide [`BuildMode`].
///
/// # Panics
/// See [`Checker::enforce`].
#[track_caller]
#[inline]
pub fn enforce(condition: bool, template: Option<&str>, args: &[&dyn Display]) {
    Checker::global().enforce(condition, template, args);
}

/// Check an invariant against the process-wide mode.
///
/// Evaluates to `Result<(), InvariantError>`.
///
/// ```
/// use invariant::{invariant, ErrorKind};
///
/// let seen = 3;
/// assert!(invariant!(seen < 10, "too many: %s", seen).is_ok());
///
/// let err = invariant!(seen > 10, "expected more than %s, got %s", 10, seen).unwrap_err();
/// assert_eq!(err.kind(), ErrorKind::Violation);
/// assert_eq!(err.message(), "expected more than 10, got 3");
/// ```
#[macro_export]
macro_rules! invariant {
    ($condition:expr $(,)?) => {
        $crate::check($condition, ::core::option::Option::None, &[])
    };
    ($condition:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::check(
            $condition,
            ::core::option::Option::Some::<&str>(&$template),
            &[$(&$arg as &dyn ::core::fmt::Display),*],
        )
    };
}

/// Like [`invariant!`], but panics on failure.
#[macro_export]
macro_rules! enforce_invariant {
    ($condition:expr $(,)?) => {
        $crate::enforce($condition, ::core::option::Option::None, &[])
    };
    ($condition:expr, $template:expr $(, $arg:expr)* $(,)?) => {
        $crate::enforce(
            $condition,
            ::core::option::Option::Some::<&str>(&$template),
            &[$(&$arg as &dyn ::core::fmt::Display),*],
        )
    };
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
