use std::io;

use thiserror::Error;

use crate::{config::LoadError, telemetry::TelemetryError};

/// Failures surfaced by the `fencemark` binary.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] LoadError),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error("failed to read {path}: {source}")]
    Read { path: String, source: io::Error },
    #[error("failed to write {path}: {source}")]
    Write { path: String, source: io::Error },
}

impl AppError {
    pub fn read(path: impl Into<String>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<String>, source: io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}
