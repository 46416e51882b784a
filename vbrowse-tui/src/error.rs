use std::io;
use std::path::PathBuf;

use thiserror::Error;
use vbrowse::OverlayError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid data file {path}: {source}")]
    Data {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to initialize logging: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Overlay(#[from] OverlayError),
}
