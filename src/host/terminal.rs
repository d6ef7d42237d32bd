//! Terminal host for the CLI
//!
//! navpick runs as a child of the user's shell, so it cannot change the
//! shell's directory itself. The terminal host prints the chosen path on
//! stdout instead; a wrapper such as
//!
//! ```sh
//! nd() { local dir; dir="$(navpick select --dirs-only)" && cd "$dir"; }
//! ```
//!
//! does the rest. Notices go to the configured [`OutputWriter`].

use super::output::{MessageLevel, OutputWriter, StderrWriter};
use super::{Host, Settings};
use crossterm::terminal;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// [`Host`] implementation for a plain terminal
pub struct TerminalHost {
    settings: Settings,
    writer: Box<dyn OutputWriter>,
    target: Box<dyn Write + Send>,
    quiet: bool,
    resume_raw_mode: bool,
    last_target: Option<PathBuf>,
}

impl TerminalHost {
    /// Create a host printing targets on stdout and notices on stderr
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            writer: Box::new(StderrWriter::new()),
            target: Box::new(io::stdout()),
            quiet: false,
            resume_raw_mode: false,
            last_target: None,
        }
    }

    /// Replace the notice writer
    #[must_use]
    pub fn with_writer(mut self, writer: impl OutputWriter + 'static) -> Self {
        self.writer = Box::new(writer);
        self
    }

    /// Replace the stream navigation targets are printed to
    #[must_use]
    pub fn with_target(mut self, target: impl Write + Send + 'static) -> Self {
        self.target = Box::new(target);
        self
    }

    /// Suppress info and success notices
    #[must_use]
    pub const fn with_quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    /// Path most recently handed to `change_directory` or `select_file`
    #[must_use]
    pub fn last_target(&self) -> Option<&Path> {
        self.last_target.as_deref()
    }

    fn emit_target(&mut self, path: &Path) {
        if let Err(e) = writeln!(self.target, "{}", path.display()).and_then(|()| self.target.flush()) {
            tracing::warn!(error = %e, "failed to write navigation target");
        }
        self.last_target = Some(path.to_path_buf());
    }
}

impl Host for TerminalHost {
    fn suspend(&mut self) -> io::Result<()> {
        io::stderr().flush()?;
        if terminal::is_raw_mode_enabled()? {
            terminal::disable_raw_mode()?;
            self.resume_raw_mode = true;
        }
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        if std::mem::take(&mut self.resume_raw_mode) {
            terminal::enable_raw_mode()?;
        }
        Ok(())
    }

    fn change_directory(&mut self, path: &Path) {
        tracing::info!(path = %path.display(), "change directory");
        self.settings.current_dir = path.to_path_buf();
        self.emit_target(path);
    }

    fn select_file(&mut self, path: &Path) {
        tracing::info!(path = %path.display(), "select file");
        self.emit_target(path);
    }

    fn notify(&mut self, message: &str, level: MessageLevel) {
        if self.quiet && matches!(level, MessageLevel::Info | MessageLevel::Success) {
            return;
        }
        self.writer.emit(message, level);
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}
