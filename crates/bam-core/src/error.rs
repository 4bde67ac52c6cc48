//! Error types for bam-core

use std::path::PathBuf;

/// Result type for bam-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in bam-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found at expected path
    #[error("Configuration not found at {path}")]
    ConfigNotFound { path: PathBuf },

    /// A `bamrc` line could not be understood
    #[error("{path}:{line}: {message}")]
    ConfigParse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A TOML configuration could not be deserialized
    #[error("Failed to parse TOML config at {path}: {message}")]
    ConfigToml { path: PathBuf, message: String },

    /// The configuration parsed but is inconsistent
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A profile maps a source that was never declared
    #[error("Unknown source: {name}")]
    UnknownSource { name: String },

    /// A source path (or glob) resolves to nothing
    #[error("Source {name} not available: {path}")]
    SourceUnavailable { name: String, path: String },

    /// A source path is not a valid glob
    #[error("Invalid source pattern {path}: {message}")]
    SourcePattern { path: String, message: String },

    /// The sync tool could not be started
    #[error("Failed to start {program}: {source}")]
    SyncSpawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sync tool exited with a failing status
    #[error("{program} failed (exit code {code}): {stderr}")]
    SyncFailed {
        program: PathBuf,
        code: i32,
        stderr: String,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },

    /// Sync output could not be normalized
    #[error(transparent)]
    Output(#[from] bam_output::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
