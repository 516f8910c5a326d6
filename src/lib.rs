//! Runtime invariant checks with development and optimized modes.
//!
//! ```
//! use invariant::{BuildMode, Checker, ErrorKind};
//!
//! let checker = Checker::new(BuildMode::Development);
//! let err = checker
//!     .check(false, Some("Expected %s but got %s"), &[&"a", &"b"])
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Violation);
//! assert_eq!(err.message(), "Expected a but got b");
//! assert_eq!(err.name(), Some("Invariant Violation"));
//! ```
//!
//! The free [`check`] / [`enforce`] functions and the [`invariant!`] /
//! [`enforce_invariant!`] macros use the process-wide [`BuildMode`]; see
//! [`mode`] for how it is resolved.

pub mod check;
pub mod config;
pub mod error;
pub mod format;
pub mod mode;
pub mod telemetry;

pub use check::{Checker, check, enforce};
pub use config::{CheckerConfig, ConfigError, InvariantConfig};
pub use error::{ErrorKind, InvariantError};
pub use mode::BuildMode;
