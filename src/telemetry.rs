//! Subscriber installation for hosts that want violations rendered.
//!
//! The checker only emits `tracing` events (target `invariant`). Hosts that
//! already run a subscriber need nothing from here. Otherwise `INVARIANT_LOG`
//! selects one:
//! - unset or empty → nothing installed (events are dropped)
//! - `"stderr"` → JSON events to stderr
//! - `"pretty"` → human-readable events to stderr
//!
//! The filter comes from `RUST_LOG`, defaulting to `info`.

use std::fmt;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt as _;
use tracing_subscriber::util::SubscriberInitExt as _;

/// Environment variable selecting the subscriber.
pub const LOG_ENV_VAR: &str = "INVARIANT_LOG";

/// Which subscriber [`init`] installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogSink {
    /// Nothing installed, or another subscriber was already global.
    None,
    /// JSON lines on stderr.
    JsonStderr,
    /// Human-readable lines on stderr.
    PrettyStderr,
}

impl fmt::Display for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::JsonStderr => write!(f, "stderr"),
            Self::PrettyStderr => write!(f, "pretty"),
        }
    }
}

/// Install a subscriber according to `INVARIANT_LOG`.
///
/// Never panics if a global subscriber already exists; reports
/// [`LogSink::None`] instead.
#[must_use]
pub fn init() -> LogSink {
    init_from(std::env::var(LOG_ENV_VAR).ok().as_deref())
}

/// Install a subscriber for an explicit `INVARIANT_LOG` value.
#[must_use]
pub fn init_from(value: Option<&str>) -> LogSink {
    match value.map(str::trim) {
        None | Some("") => LogSink::None,
        Some("stderr") => init_json(),
        Some("pretty") => init_pretty(),
        Some(other) => {
            eprintln!("warning: {LOG_ENV_VAR}={other} not recognised (expected stderr or pretty)");
            LogSink::None
        }
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// JSON events to stderr via tracing-subscriber's JSON formatter.
fn init_json() -> LogSink {
    let installed = tracing_subscriber::registry()
        .with(filter())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .try_init();
    if installed.is_ok() {
        LogSink::JsonStderr
    } else {
        LogSink::None
    }
}

fn init_pretty() -> LogSink {
    let installed = tracing_subscriber::registry()
        .with(filter())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
    if installed.is_ok() {
        LogSink::PrettyStderr
    } else {
        LogSink::None
    }
}
