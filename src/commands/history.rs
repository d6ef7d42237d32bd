//! Directory history
//!
//! The history is a plain text file with one absolute directory per line,
//! oldest first. A shell hook calls `navpick record` on every directory
//! change; `navpick history` offers the entries most recent first.

use super::{CommandContext, Invocation};
use crate::adapter::{self, PickRequest};
use crate::host::{Host, MessageLevel};
use crate::navigate;
use crate::picker::PickerSpec;
use crate::search;
use crate::{NavpickError, Result};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A bounded, line-oriented history file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFile {
    path: PathBuf,
    limit: usize,
}

impl HistoryFile {
    /// History stored at `path`, keeping at most `limit` entries
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, limit: usize) -> Self {
        Self {
            path: path.into(),
            limit,
        }
    }

    /// Location of the file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries in file order, oldest first
    ///
    /// A missing file is an empty history.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file exists but cannot be read.
    pub fn load(&self) -> io::Result<Vec<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(text
                .lines()
                .map(str::trim_end)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e),
        }
    }

    /// Entries most recent first, without repeats
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn recent(&self) -> io::Result<Vec<String>> {
        let mut entries = self.load()?;
        entries.reverse();
        Ok(search::dedup(entries))
    }

    /// Append `dir`, dropping the oldest entries beyond the limit
    ///
    /// Recording the directory that is already the newest entry is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read or written.
    pub fn record(&self, dir: &Path) -> io::Result<()> {
        let entry = dir.to_string_lossy().into_owned();
        if entry.contains('\n') {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "history entries cannot contain newlines",
            ));
        }

        let mut entries = self.load()?;
        if entries.last() == Some(&entry) {
            return Ok(());
        }
        entries.push(entry);
        if entries.len() > self.limit {
            entries = entries.split_off(entries.len() - self.limit);
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut text = entries.join("\n");
        text.push('\n');
        fs::write(&self.path, text)
    }
}

fn history_file(ctx: &CommandContext<'_>) -> Result<HistoryFile> {
    let path = ctx.config.history_file().ok_or_else(|| {
        NavpickError::InvalidInput("Could not determine history file location".to_string())
    })?;
    Ok(HistoryFile::new(path, ctx.config.history_limit))
}

/// Execute the history command
///
/// # Errors
///
/// Returns an error if the history file location is unknown or unreadable.
pub fn execute(host: &mut dyn Host, ctx: &CommandContext<'_>, invocation: &Invocation) -> Result<()> {
    let entries = history_file(ctx)?.recent()?;
    let picker = PickerSpec::new(ctx.config.finder.as_str()).with_no_sort(true);
    let request = PickRequest::literal(entries, picker).with_dirs_only(invocation.dirs_only);
    adapter::invoke_picker(host, ctx.runner, &request);
    Ok(())
}

/// Execute the record command
///
/// Records the given directory, or the host's current directory.
///
/// # Errors
///
/// Returns an error if the history file cannot be written.
pub fn record(host: &mut dyn Host, ctx: &CommandContext<'_>, invocation: &Invocation) -> Result<()> {
    let cwd = host.settings().current_dir.clone();
    let dir = invocation.root.as_ref().map_or_else(
        || cwd.clone(),
        |dir| navigate::absolutize(&dir.to_string_lossy(), &cwd),
    );

    if !dir.is_dir() {
        host.notify(
            &format!("Not a directory: {}", dir.display()),
            MessageLevel::Warning,
        );
        return Ok(());
    }

    let history = history_file(ctx)?;
    history.record(&dir)?;
    tracing::debug!(dir = %dir.display(), file = %history.path().display(), "recorded directory");
    Ok(())
}
