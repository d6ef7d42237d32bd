//! Notification output
//!
//! Stdout is reserved for navigation targets, so every user-facing notice
//! goes to stderr (or into a buffer when a caller wants to inspect them).

use colored::Colorize;
use std::sync::{Arc, Mutex};

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    /// Informational message
    Info,
    /// Success message
    Success,
    /// Warning message
    Warning,
    /// Error message
    Error,
}

/// Trait for notice output
///
/// # Examples
///
/// ```
/// use navpick::host::output::{OutputWriter, StderrWriter};
///
/// let output = StderrWriter::new();
/// output.success("Opened in vim");
/// output.error("fzf_select failed");
/// ```
pub trait OutputWriter: Send + Sync {
    /// Write an error message
    fn error(&self, message: &str);

    /// Write a success message
    fn success(&self, message: &str);

    /// Write a warning message
    fn warning(&self, message: &str);

    /// Write an info message (dimmed/secondary)
    fn info(&self, message: &str);

    /// Dispatch on `level`
    fn emit(&self, message: &str, level: MessageLevel) {
        match level {
            MessageLevel::Info => self.info(message),
            MessageLevel::Success => self.success(message),
            MessageLevel::Warning => self.warning(message),
            MessageLevel::Error => self.error(message),
        }
    }
}

/// CLI implementation - colored notices on stderr
pub struct StderrWriter;

impl StderrWriter {
    /// Create a new stderr writer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for StderrWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputWriter for StderrWriter {
    fn error(&self, message: &str) {
        eprintln!("{} {}", "❌".red(), message);
    }

    fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    fn warning(&self, message: &str) {
        eprintln!("{} {}", "⚠️".yellow(), message);
    }

    fn info(&self, message: &str) {
        eprintln!("{}", message.dimmed());
    }
}

/// Buffered writer that keeps every notice in memory
///
/// Clones share the same buffer.
///
/// ```
/// use navpick::host::output::{MessageLevel, NoticeLog, OutputWriter};
///
/// let log = NoticeLog::new();
/// log.error("Neither directory nor file: /gone");
/// assert_eq!(log.messages(), vec![(MessageLevel::Error, "Neither directory nor file: /gone".to_string())]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoticeLog {
    messages: Arc<Mutex<Vec<(MessageLevel, String)>>>,
}

impl NoticeLog {
    /// Create an empty log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices recorded so far, oldest first
    #[must_use]
    pub fn messages(&self) -> Vec<(MessageLevel, String)> {
        self.messages
            .lock()
            .map(|messages| messages.clone())
            .unwrap_or_default()
    }

    /// Number of notices at `level`
    #[must_use]
    pub fn count(&self, level: MessageLevel) -> usize {
        self.messages()
            .iter()
            .filter(|(l, _)| *l == level)
            .count()
    }

    fn add_message(&self, level: MessageLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

impl OutputWriter for NoticeLog {
    fn error(&self, message: &str) {
        self.add_message(MessageLevel::Error, message);
    }

    fn success(&self, message: &str) {
        self.add_message(MessageLevel::Success, message);
    }

    fn warning(&self, message: &str) {
        self.add_message(MessageLevel::Warning, message);
    }

    fn info(&self, message: &str) {
        self.add_message(MessageLevel::Info, message);
    }
}
