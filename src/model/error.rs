//! Error types for the calgrid application.
//!
//! A small `thiserror` hierarchy composing via `From` and `?`:
//!
//! - [`AppError`] - top-level error wrapping all domain-specific failures
//!   - [`DataError`] - item file reading/parsing failures
//!   - `ConfigError` - config file loading failures
//!   - `std::io::Error` - terminal/TUI failures
//!
//! Per-record parse failures inside an otherwise readable item file are
//! deliberately NOT errors: malformed records are skipped and reported
//! alongside the good ones (see [`crate::parser::MalformedItem`]), so the
//! viewer stays usable with partial data. Only a file that cannot be read
//! or is not JSON at all is fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error encompassing all failure modes.
#[derive(Debug, Error)]
pub enum AppError {
    /// Failed to load or resolve configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Failed to read or parse the item data file.
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    /// Failed to initialize logging.
    #[error("Logging error: {0}")]
    Logging(#[from] crate::logging::LoggingError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors encountered when loading the item data file.
///
/// These are fatal: without an item list there is nothing to lay out.
/// Individual malformed records within a readable file are non-fatal and
/// never surface here.
#[derive(Debug, Error)]
pub enum DataError {
    /// The item file does not exist at the given path.
    #[error("Item file not found: {path}")]
    FileNotFound {
        /// Path that was attempted.
        path: PathBuf,
    },

    /// I/O failure while reading the item file.
    #[error("Failed to read item file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The item file is not a JSON array at the top level.
    #[error("Item file {path} is not a JSON array: {reason}")]
    NotAnArray {
        /// Path with the invalid document.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },
}
