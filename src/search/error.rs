//! Search error types

use thiserror::Error;

/// Errors raised while composing or running a search process
#[derive(Debug, Error)]
pub enum SearchError {
    /// An exclusion glob could not be parsed
    #[error("Invalid exclusion glob '{glob}': {message}")]
    InvalidGlob {
        /// The offending glob
        glob: String,
        /// Parser message
        message: String,
    },

    /// The search executable could not be started
    #[error("Failed to run '{program}': {source}")]
    Spawn {
        /// Executable name
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The search process exited unsuccessfully
    #[error("'{program}' exited with status {}: {stderr}", status.map_or_else(|| "signal".to_string(), |s| s.to_string()))]
    Failed {
        /// Executable name
        program: String,
        /// Exit code, `None` if killed by a signal
        status: Option<i32>,
        /// Captured stderr
        stderr: String,
    },
}

/// Result type for search operations
pub type Result<T> = std::result::Result<T, SearchError>;
