//! Startup error types
//!
//! Request-time failures never surface here: they are mapped to HTTP status
//! codes inside the handler. These errors abort the process before the
//! listener is bound.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StartupError {
    /// The build directory does not contain the entry document
    #[error("No {entry} found in '{}'", root.display())]
    MissingEntryFile { root: PathBuf, entry: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid listen address: {0}")]
    InvalidAddress(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
