//! Candidate search
//!
//! Describes the non-interactive process that enumerates candidate paths
//! and turns its buffered output into an ordered candidate list.
//!
//! # Argument order
//!
//! [`SearchSpec::command`] always emits arguments in the same order:
//!
//! 1. tool-specific listing flags and the record delimiter flag
//! 2. exclusion globs, in the order given
//! 3. hidden-entry inclusion
//! 4. type filter (only for tools that have one)
//! 5. extra flags supplied by the caller
//! 6. the root path, last (omitted when searching the working directory)
//!
//! Tests rely on this order when asserting on full command lines.

mod error;

pub use error::{Result, SearchError};

use crate::process::{CommandLine, ProcessOutput, ProcessRunner};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Record separator shared by a search process and the picker reading its output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// One record per line
    #[default]
    Newline,
    /// NUL-terminated records (safe for paths containing newlines)
    Nul,
}

impl Delimiter {
    /// The separator byte
    #[must_use]
    pub const fn byte(self) -> u8 {
        match self {
            Self::Newline => b'\n',
            Self::Nul => b'\0',
        }
    }

    /// Split raw process output into records, dropping empty ones
    #[must_use]
    pub fn split(self, raw: &[u8]) -> Vec<String> {
        raw.split(|b| *b == self.byte())
            .map(|record| {
                let text = String::from_utf8_lossy(record);
                match self {
                    Self::Newline => text.trim_end_matches('\r').to_string(),
                    Self::Nul => text.into_owned(),
                }
            })
            .filter(|record| !record.is_empty())
            .collect()
    }

    /// Join records into a byte stream, terminating every record
    #[must_use]
    pub fn join(self, records: &[String]) -> Vec<u8> {
        let mut out = Vec::with_capacity(records.iter().map(|r| r.len() + 1).sum());
        for record in records {
            out.extend_from_slice(record.as_bytes());
            out.push(self.byte());
        }
        out
    }
}

/// External search tools navpick knows how to drive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchTool {
    /// ripgrep in `--files` mode
    #[default]
    Ripgrep,
    /// fd
    Fd,
    /// zoxide's frecency database (directories only, already ranked)
    Zoxide,
}

impl SearchTool {
    /// Default executable name
    #[must_use]
    pub const fn program(self) -> &'static str {
        match self {
            Self::Ripgrep => "rg",
            Self::Fd => "fd",
            Self::Zoxide => "zoxide",
        }
    }

    /// Whether the tool can restrict output to directories itself
    ///
    /// Tools without a directory filter get their records mapped to parent
    /// directories by the caller instead.
    #[must_use]
    pub const fn filters_directories(self) -> bool {
        matches!(self, Self::Fd | Self::Zoxide)
    }

    /// Whether the tool walks the filesystem (as opposed to a ranked database)
    #[must_use]
    pub const fn lists_files(self) -> bool {
        matches!(self, Self::Ripgrep | Self::Fd)
    }

    /// Exit status the tool uses for "nothing found"
    const fn no_match_status(self) -> Option<i32> {
        match self {
            Self::Ripgrep | Self::Fd => Some(1),
            Self::Zoxide => None,
        }
    }

    /// Whether `status` means the walk hit errors but still listed entries
    ///
    /// rg exits 2 and fd exits 1 when some directory could not be read.
    /// Whatever they printed is still valid.
    const fn is_partial_status(self, status: i32) -> bool {
        match self {
            Self::Ripgrep => status == 2,
            Self::Fd => matches!(status, 1 | 2),
            Self::Zoxide => false,
        }
    }
}

/// Description of a search process invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSpec {
    /// Which tool to drive
    pub tool: SearchTool,
    /// Executable override (defaults to the tool's program name)
    pub program: Option<String>,
    /// Globs for paths or names to omit
    pub exclusions: Vec<String>,
    /// Restrict results to directories
    pub dirs_only: bool,
    /// Include hidden entries
    pub hidden: bool,
    /// Directory to search under, `None` for the working directory
    pub root: Option<PathBuf>,
    /// Additional tool flags, appended before the root
    pub extra_args: Vec<String>,
    /// Record separator the tool is asked to emit
    pub delimiter: Delimiter,
}

impl SearchSpec {
    /// Create a spec for `tool` searching the working directory
    #[must_use]
    pub const fn new(tool: SearchTool) -> Self {
        Self {
            tool,
            program: None,
            exclusions: Vec::new(),
            dirs_only: false,
            hidden: false,
            root: None,
            extra_args: Vec::new(),
            delimiter: Delimiter::Newline,
        }
    }

    /// Search under `root` instead of the working directory
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Override the executable
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// Set exclusion globs
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclusions = exclusions.into_iter().map(Into::into).collect();
        self
    }

    /// Include hidden entries
    #[must_use]
    pub const fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// Restrict to directories
    #[must_use]
    pub const fn with_dirs_only(mut self, dirs_only: bool) -> Self {
        self.dirs_only = dirs_only;
        self
    }

    /// Append tool flags
    #[must_use]
    pub fn with_extra_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set the record delimiter
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// The executable to run
    #[must_use]
    pub fn program(&self) -> &str {
        self.program.as_deref().unwrap_or_else(|| self.tool.program())
    }

    /// Check that every exclusion is a well-formed glob
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidGlob` for the first glob that fails to parse.
    pub fn validate(&self) -> Result<()> {
        for glob in &self.exclusions {
            glob::Pattern::new(glob).map_err(|e| SearchError::InvalidGlob {
                glob: glob.clone(),
                message: e.to_string(),
            })?;
        }
        Ok(())
    }

    /// Compose the argument vector for this search
    ///
    /// # Errors
    ///
    /// Returns `SearchError::InvalidGlob` if an exclusion is malformed.
    pub fn command(&self) -> Result<CommandLine> {
        self.validate()?;
        let cmd = CommandLine::new(self.program());

        let cmd = match self.tool {
            SearchTool::Ripgrep => {
                let mut cmd = cmd.arg("--files");
                if self.delimiter == Delimiter::Nul {
                    cmd = cmd.arg("--null");
                }
                for glob in &self.exclusions {
                    cmd = cmd.arg("--glob").arg(format!("!{glob}"));
                }
                if self.hidden {
                    cmd = cmd.arg("--hidden");
                }
                cmd.args(self.extra_args.iter().cloned())
                    .args(self.root_arg())
            }
            SearchTool::Fd => {
                let mut cmd = cmd;
                if self.delimiter == Delimiter::Nul {
                    cmd = cmd.arg("--print0");
                }
                for glob in &self.exclusions {
                    cmd = cmd.arg("--exclude").arg(glob.as_str());
                }
                if self.hidden {
                    cmd = cmd.arg("--hidden");
                }
                if self.dirs_only {
                    cmd = cmd.args(["--type", "d"]);
                }
                cmd.args(self.extra_args.iter().cloned())
                    .arg(".")
                    .args(self.root_arg())
            }
            // zoxide has no NUL output mode; records never contain newlines.
            SearchTool::Zoxide => cmd
                .args(["query", "--list"])
                .args(self.extra_args.iter().cloned()),
        };

        tracing::debug!(command = %cmd, "composed search command");
        Ok(cmd)
    }

    fn root_arg(&self) -> Option<String> {
        self.root
            .as_ref()
            .map(|root| root.to_string_lossy().into_owned())
    }

    /// Delimiter the tool will actually emit
    #[must_use]
    pub const fn output_delimiter(&self) -> Delimiter {
        match self.tool {
            SearchTool::Zoxide => Delimiter::Newline,
            SearchTool::Ripgrep | SearchTool::Fd => self.delimiter,
        }
    }

    /// Interpret a finished search process
    ///
    /// # Errors
    ///
    /// Returns `SearchError::Failed` when the process exited unsuccessfully
    /// with anything other than the tool's empty "no match" status.
    pub fn parse_output(&self, output: &ProcessOutput) -> Result<Vec<String>> {
        let no_match = output.status.is_some() && output.status == self.tool.no_match_status();
        if output.success() || (no_match && output.stdout.is_empty()) {
            return Ok(self.output_delimiter().split(&output.stdout));
        }
        if let Some(status) = output.status
            && self.tool.is_partial_status(status)
            && !output.stdout.is_empty()
        {
            tracing::warn!(
                program = self.program(),
                status,
                stderr = %output.stderr_text(),
                "search reported errors, keeping partial results"
            );
            return Ok(self.output_delimiter().split(&output.stdout));
        }

        Err(SearchError::Failed {
            program: self.program().to_string(),
            status: output.status,
            stderr: output.stderr_text(),
        })
    }

    /// Run the search in `base` and return its candidates
    ///
    /// Output is buffered in full. Relative records (including those under
    /// a relative root) are relative to `base`. In directories-only mode,
    /// tools without their own directory filter have each record mapped to
    /// its parent directory and the result deduplicated.
    ///
    /// # Errors
    ///
    /// Returns a `SearchError` if the command cannot be composed, spawned,
    /// or exits unsuccessfully.
    pub fn run(&self, runner: &dyn ProcessRunner, base: &Path) -> Result<Vec<String>> {
        let command = self.command()?.in_dir(base);
        let output = runner.capture(&command).map_err(|source| SearchError::Spawn {
            program: command.program.clone(),
            source,
        })?;

        let candidates = self.parse_output(&output)?;
        if self.dirs_only && !self.tool.filters_directories() {
            return Ok(parent_directories(&candidates, |record| {
                base.join(record).is_dir()
            }));
        }
        Ok(dedup(candidates))
    }
}

/// Remove repeated records, keeping first occurrences in order
#[must_use]
pub fn dedup(records: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| seen.insert(record.clone()))
        .collect()
}

/// Collapse records to directories, deduplicated in order of first appearance
///
/// A record counts as a directory when it ends with a separator, when it is
/// the parent of another listed record, or when `is_dir` says so. Every
/// other record is replaced by its parent directory.
#[must_use]
pub fn parent_directories(records: &[String], is_dir: impl Fn(&str) -> bool) -> Vec<String> {
    let parents: HashSet<String> = records
        .iter()
        .filter_map(|record| Path::new(record).parent())
        .map(|parent| parent.to_string_lossy().into_owned())
        .collect();

    let dirs = records.iter().map(|record| {
        let trimmed = record.trim_end_matches('/');
        if trimmed.len() != record.len() && !trimmed.is_empty() {
            return trimmed.to_string();
        }
        if parents.contains(record.as_str()) || is_dir(record) {
            return record.clone();
        }
        match Path::new(record).parent() {
            Some(parent) if parent.as_os_str().is_empty() => ".".to_string(),
            Some(parent) => parent.to_string_lossy().into_owned(),
            None => record.clone(),
        }
    });

    dedup(dirs.collect())
}
