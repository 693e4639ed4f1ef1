use crate::config::TelemetryConfig;
use std::env;
use std::fmt;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// HTTP stack targets held at `warn` unless `RUST_LOG` says otherwise, so a
/// `debug` scout run shows pipeline decisions rather than connection churn.
const QUIET_DEPENDENCIES: &str = "hyper=warn,reqwest=warn,rustls=warn";

#[derive(Debug)]
pub enum TelemetryError {
    EnvFilter { value: String, source: ParseError },
    Subscriber(Box<dyn std::error::Error + Send + Sync>),
}

impl fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TelemetryError::EnvFilter { value, .. } => {
                write!(f, "SCOUT_LOG_LEVEL '{value}' is not a valid log filter")
            }
            TelemetryError::Subscriber(err) => write!(f, "telemetry error: {err}"),
        }
    }
}

impl std::error::Error for TelemetryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TelemetryError::EnvFilter { source, .. } => Some(source),
            TelemetryError::Subscriber(err) => Some(&**err),
        }
    }
}

/// Picks the log filter. A parseable `RUST_LOG` is used verbatim; otherwise
/// the configured level applies with the HTTP stack quieted.
fn build_filter(rust_log: Option<&str>, log_level: &str) -> Result<EnvFilter, TelemetryError> {
    if let Some(filter) = rust_log
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
    {
        return Ok(filter);
    }

    EnvFilter::try_new(format!("{log_level},{QUIET_DEPENDENCIES}")).map_err(|source| {
        TelemetryError::EnvFilter {
            value: log_level.to_string(),
            source,
        }
    })
}

/// Installs the global subscriber on stderr. Stdout carries only command
/// output (reports, shortlist text or CSV) so it can be piped.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let rust_log = env::var("RUST_LOG").ok();
    let env_filter = build_filter(rust_log.as_deref(), &config.log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}
