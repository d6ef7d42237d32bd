//! Host abstraction
//!
//! Everything navpick needs from the application it navigates for goes
//! through the [`Host`] trait: display suspension, the two navigation
//! primitives, notifications and settings. Commands receive the host as a
//! parameter instead of reaching for a global application object.
//!
//! # Implementations
//!
//! - [`TerminalHost`] - the CLI host; prints navigation targets on stdout
//!   for a shell wrapper and notices on stderr
//! - test doubles record every call for assertions
//!
//! ```text
//! ┌──────────────┐   suspend/restore    ┌──────────────┐
//! │   commands   │ ───────────────────▶ │     Host     │
//! │   adapter    │   cd / select / msg  │ (injected)   │
//! └──────────────┘                      └──────────────┘
//! ```

mod guard;
pub mod output;
mod terminal;

pub use guard::DisplayGuard;
pub use output::{MessageLevel, NoticeLog, OutputWriter, StderrWriter};
pub use terminal::TerminalHost;

use std::io;
use std::path::{Path, PathBuf};

/// Host settings read by commands
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Include hidden entries in searches
    pub show_hidden: bool,
    /// Directory the host is currently in
    pub current_dir: PathBuf,
}

impl Settings {
    /// Create settings
    #[must_use]
    pub fn new(show_hidden: bool, current_dir: impl Into<PathBuf>) -> Self {
        Self {
            show_hidden,
            current_dir: current_dir.into(),
        }
    }
}

/// Operations consumed from the host application
pub trait Host {
    /// Hand the terminal over to a child process.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the terminal mode cannot be changed.
    fn suspend(&mut self) -> io::Result<()>;

    /// Take the terminal back after a child process finished.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the terminal mode cannot be changed.
    fn restore(&mut self) -> io::Result<()>;

    /// Make `path` the current directory
    fn change_directory(&mut self, path: &Path);

    /// Make `path` the current selection
    fn select_file(&mut self, path: &Path);

    /// Show a message to the user
    fn notify(&mut self, message: &str, level: MessageLevel);

    /// Current settings
    fn settings(&self) -> &Settings;
}
