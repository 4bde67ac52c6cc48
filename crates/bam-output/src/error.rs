//! Error types for bam-output

/// Result type for bam-output operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while normalizing sync-tool output
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The output ended, or changed shape, before an expected section boundary
    #[error("Malformed sync output at line {line}: {reason}")]
    MalformedOutput { reason: String, line: usize },

    /// A collapse pattern could not be compiled
    #[error("Invalid collapse pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl Error {
    pub fn malformed(reason: impl Into<String>, line: usize) -> Self {
        Self::MalformedOutput {
            reason: reason.into(),
            line,
        }
    }
}
