//! Diagnostic logging.
//!
//! Logs go to stderr so that `--no-browser` output on stdout stays clean.
//! Verbosity is controlled with `GIT_BROWSE_LOG`, which takes the usual
//! `tracing` filter directives (`debug`, `git_browse=trace`, ...).

use std::io::{self, IsTerminal};

use tracing::Subscriber;
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "GIT_BROWSE_LOG";

/// Filter applied when [`LOG_ENV_VAR`] is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Builds the log filter from `directives`, falling back to
/// [`DEFAULT_LOG_FILTER`] when they are absent or do not parse.
#[must_use]
pub fn env_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// Builds a subscriber that formats events matching `filter` into `writer`.
///
/// Colour escapes are written only when `ansi` is set.
#[must_use]
pub fn subscriber<W>(filter: EnvFilter, writer: W, ansi: bool) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_filter(filter);
    tracing_subscriber::registry().with(layer)
}

/// Installs the global stderr subscriber, coloured only when stderr is a
/// terminal.
///
/// A subscriber that is already installed is left in place.
pub fn init() {
    let directives = std::env::var(LOG_ENV_VAR).ok();
    let ansi = io::stderr().is_terminal();
    let _ignored = subscriber(env_filter(directives.as_deref()), io::stderr, ansi).try_init();
}
