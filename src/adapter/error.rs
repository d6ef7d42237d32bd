//! Adapter error taxonomy

use crate::host::MessageLevel;
use crate::picker::PickerError;
use crate::search::SearchError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can end a picker invocation other than a selection or a cancel
///
/// Cancellation is deliberately absent: it is a normal outcome, not an error.
#[derive(Debug, Error)]
pub enum PickError {
    /// The candidate list was empty; the picker was never started
    #[error("No results")]
    NoResults,

    /// The search stage failed to compose, start, or finish
    #[error(transparent)]
    Search(#[from] SearchError),

    /// The picker failed to start or exited abnormally
    #[error(transparent)]
    Picker(#[from] PickerError),

    /// The selected path is neither a file nor a directory
    #[error("Neither directory nor file: {}", .0.display())]
    NeitherFileNorDirectory(PathBuf),
}

impl PickError {
    /// Severity used when the error is shown to the user
    #[must_use]
    pub const fn level(&self) -> MessageLevel {
        match self {
            Self::NoResults => MessageLevel::Info,
            Self::Search(_) | Self::Picker(_) | Self::NeitherFileNorDirectory(_) => {
                MessageLevel::Error
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_levels() {
        assert_eq!(PickError::NoResults.level(), MessageLevel::Info);
        let failed = PickError::Picker(PickerError::Failed {
            program: "fzf".into(),
            status: Some(2),
        });
        assert_eq!(failed.level(), MessageLevel::Error);
    }

    #[test]
    fn test_search_failure_message_includes_stderr() {
        let err = PickError::from(SearchError::Failed {
            program: "rg".into(),
            status: Some(2),
            stderr: "rg: error parsing flag".into(),
        });
        assert_eq!(err.to_string(), "'rg' exited with status 2: rg: error parsing flag");
    }

    #[test]
    fn test_neither_message() {
        let err = PickError::NeitherFileNorDirectory(PathBuf::from("/dev/null"));
        assert_eq!(err.to_string(), "Neither directory nor file: /dev/null");
    }
}
