//! Error types

use thiserror::Error;

/// Errors raised while attaching an overlay to a host table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OverlayError {
    /// The host table exposes no column metadata.
    #[error("columns is required")]
    MissingColumns,
}

/// Errors raised while parsing configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid color '{0}': expected #rgb, #rgba, #rrggbb or #rrggbbaa")]
    InvalidColor(String),

    #[error("invalid position '{0}': expected '<left|right|center> <top|bottom>'")]
    InvalidPosition(String),
}

/// The host table has no page mutator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("host table does not support changing pages")]
pub struct Unsupported;
