use crate::config::ConfigError;
use crate::telemetry::TelemetryError;
use crate::workflows::discovery::DiscoveryError;
use crate::workflows::filing::FilingError;
use crate::workflows::screening::sources::{BrowseError, SourceError};
use crate::workflows::screening::CompletionError;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Source(SourceError),
    Browser(BrowseError),
    Completion(CompletionError),
    Filing(FilingError),
    Discovery(DiscoveryError),
    Csv(csv::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Source(err) => write!(f, "github client error: {}", err),
            AppError::Browser(err) => write!(f, "browser agent error: {}", err),
            AppError::Completion(err) => write!(f, "completion client error: {}", err),
            AppError::Filing(err) => write!(f, "filing error: {}", err),
            AppError::Discovery(err) => write!(f, "discovery error: {}", err),
            AppError::Csv(err) => write!(f, "csv error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Source(err) => Some(err),
            AppError::Browser(err) => Some(err),
            AppError::Completion(err) => Some(err),
            AppError::Filing(err) => Some(err),
            AppError::Discovery(err) => Some(err),
            AppError::Csv(err) => Some(err),
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<SourceError> for AppError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<BrowseError> for AppError {
    fn from(value: BrowseError) -> Self {
        Self::Browser(value)
    }
}

impl From<CompletionError> for AppError {
    fn from(value: CompletionError) -> Self {
        Self::Completion(value)
    }
}

impl From<FilingError> for AppError {
    fn from(value: FilingError) -> Self {
        Self::Filing(value)
    }
}

impl From<DiscoveryError> for AppError {
    fn from(value: DiscoveryError) -> Self {
        Self::Discovery(value)
    }
}

impl From<csv::Error> for AppError {
    fn from(value: csv::Error) -> Self {
        Self::Csv(value)
    }
}
