use std::io::{self, IsTerminal};

use thiserror::Error;
use tracing::Level;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::fmt::format::{FmtSpan, Writer};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Targets of the workspace crates that get `level` when `RUST_LOG` is unset.
pub const WORKSPACE_TARGETS: &[&str] = &["ai_llm_service", "api", "structurer", "mission_ai_backend"];

/// Level for everything outside the workspace (hyper, reqwest, ...) by default.
const DEPENDENCY_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid RUST_LOG: {0}")]
    Filter(#[from] ParseError),

    #[error("tracing subscriber already installed: {0}")]
    Init(#[from] TryInitError),
}

/// Timestamps as `2025-09-12T10:20:30Z`.
#[derive(Clone, Copy, Debug, Default)]
struct UtcSeconds;

impl FormatTime for UtcSeconds {
    fn format_time(&self, w: &mut Writer<'_>) -> std::fmt::Result {
        let now = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        w.write_str(&now)
    }
}

/// Compact single-line events with `file:line`, plus span close timings so
/// each instrumented handler logs its duration. ANSI only on a terminal.
pub fn layer<S>() -> impl Layer<S> + Send + Sync
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_timer(UtcSeconds)
        .with_target(true)
        .with_ansi(io::stdout().is_terminal())
        .with_span_events(FmtSpan::CLOSE)
        .event_format(fmt::format().compact().with_source_location(true))
}

/// `warn,ai_llm_service=<level>,api=<level>,...`
fn workspace_defaults(level: Level) -> String {
    let level = level.as_str().to_lowercase();
    std::iter::once(DEPENDENCY_LEVEL.to_string())
        .chain(WORKSPACE_TARGETS.iter().map(|t| format!("{t}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Builds the filter from a `RUST_LOG` value.
///
/// A non-empty value is taken verbatim, so `RUST_LOG=ai_llm_service=debug`
/// really enables debug output. Otherwise the workspace crates log at
/// `level` and dependencies at `warn`.
pub fn filter_for(rust_log: Option<&str>, level: Level) -> Result<EnvFilter, ParseError> {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives),
        None => EnvFilter::try_new(workspace_defaults(level)),
    }
}

/// Installs the global subscriber. `level` applies only when `RUST_LOG` is unset.
pub fn init(level: Level) -> Result<(), TelemetryError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = filter_for(rust_log.as_deref(), level)?;

    tracing_subscriber::registry()
        .with(filter)
        .with(layer())
        .try_init()?;
    Ok(())
}
