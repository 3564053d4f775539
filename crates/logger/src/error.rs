//! Error types for the logging pipeline

use std::io;
use std::path::PathBuf;

/// Result type for logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while setting up or driving the pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create the log directory
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The path that failed to be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to rotate the log file
    #[error("failed to rotate log file: {0}")]
    Rotation(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A pipeline is already installed; shut it down before re-initializing
    #[error("logger already initialized")]
    AlreadyInitialized,

    /// The facade was used before a pipeline was installed
    #[error("logger not initialized")]
    NotInitialized,
}
