//! Interactive picker
//!
//! Builds the argument vector for an fzf-compatible line picker and
//! interprets how it exited.

use crate::process::{CommandLine, EXIT_CANCELLED, ProcessOutput};
use crate::search::Delimiter;
use thiserror::Error;

/// Errors reported by the picker stage
#[derive(Debug, Error)]
pub enum PickerError {
    /// The picker executable could not be started
    #[error("Failed to run picker '{program}': {source}")]
    Spawn {
        /// Executable name
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The picker exited with an unexpected status
    #[error("Picker '{program}' failed with status {}", status.map_or_else(|| "signal".to_string(), |s| s.to_string()))]
    Failed {
        /// Executable name
        program: String,
        /// Exit code, `None` if killed by a signal
        status: Option<i32>,
    },
}

/// How the picker run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerOutcome {
    /// The user chose a line
    Selected(String),
    /// The user cancelled, or accepted nothing
    Cancelled,
}

/// Description of a picker invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSpec {
    /// Executable name or path
    pub program: String,
    /// Exact (non-fuzzy) matching
    pub exact: bool,
    /// Case-insensitive matching
    pub ignore_case: bool,
    /// Matching algorithm name (e.g. `v1`)
    pub algo: Option<String>,
    /// Interpret ANSI color codes in candidates
    pub ansi: bool,
    /// Keep input order instead of sorting by score
    pub no_sort: bool,
    /// Preview command template, `{}` is replaced by the picker
    pub preview: Option<String>,
    /// Preview window layout (e.g. `right:50%`)
    pub preview_window: Option<String>,
    /// Key bindings in `key:action` form
    pub bindings: Vec<String>,
    /// Header line
    pub header: Option<String>,
    /// Border style
    pub border: Option<String>,
    /// Margin around the finder
    pub margin: Option<String>,
    /// Info line style
    pub info: Option<String>,
    /// Hide the scrollbar
    pub no_scrollbar: bool,
    /// Prompt text
    pub prompt: Option<String>,
    /// Separator for multi-field output; the last field is the path
    pub field_separator: Option<char>,
}

impl PickerSpec {
    /// A picker with no options
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            exact: false,
            ignore_case: false,
            algo: None,
            ansi: false,
            no_sort: false,
            preview: None,
            preview_window: None,
            bindings: Vec::new(),
            header: None,
            border: None,
            margin: None,
            info: None,
            no_scrollbar: false,
            prompt: None,
            field_separator: None,
        }
    }

    /// Use exact matching
    #[must_use]
    pub const fn exact(mut self) -> Self {
        self.exact = true;
        self
    }

    /// Use case-insensitive matching
    #[must_use]
    pub const fn ignore_case(mut self) -> Self {
        self.ignore_case = true;
        self
    }

    /// Select a matching algorithm
    #[must_use]
    pub fn with_algo(mut self, algo: impl Into<String>) -> Self {
        self.algo = Some(algo.into());
        self
    }

    /// Enable ANSI colors
    #[must_use]
    pub const fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Preserve input order
    #[must_use]
    pub const fn with_no_sort(mut self, no_sort: bool) -> Self {
        self.no_sort = no_sort;
        self
    }

    /// Set the preview command template and window layout
    #[must_use]
    pub fn with_preview(mut self, command: impl Into<String>, window: impl Into<String>) -> Self {
        self.preview = Some(command.into());
        self.preview_window = Some(window.into());
        self
    }

    /// Add a key binding
    #[must_use]
    pub fn with_binding(mut self, binding: impl Into<String>) -> Self {
        self.bindings.push(binding.into());
        self
    }

    /// Set the header line
    #[must_use]
    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    /// Set border, margin and info styling
    #[must_use]
    pub fn with_layout(
        mut self,
        border: impl Into<String>,
        margin: impl Into<String>,
        info: impl Into<String>,
    ) -> Self {
        self.border = Some(border.into());
        self.margin = Some(margin.into());
        self.info = Some(info.into());
        self
    }

    /// Hide the scrollbar
    #[must_use]
    pub const fn with_no_scrollbar(mut self) -> Self {
        self.no_scrollbar = true;
        self
    }

    /// Set the prompt
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Take the last `separator`-delimited field of the selected line
    #[must_use]
    pub const fn with_field_separator(mut self, separator: char) -> Self {
        self.field_separator = Some(separator);
        self
    }

    /// Compose the argument vector
    ///
    /// The record flags are derived from `delimiter`, which must be the
    /// same delimiter used to encode the picker's stdin and to read its stdout.
    #[must_use]
    pub fn command(&self, delimiter: Delimiter) -> CommandLine {
        let mut cmd = CommandLine::new(self.program.as_str());

        if self.exact {
            cmd = cmd.arg("-e");
        }
        if self.ignore_case {
            cmd = cmd.arg("-i");
        }
        if let Some(algo) = &self.algo {
            cmd = cmd.arg(format!("--algo={algo}"));
        }
        if delimiter == Delimiter::Nul {
            cmd = cmd.args(["--read0", "--print0"]);
        }
        if self.ansi {
            cmd = cmd.arg("--ansi");
        }
        if self.no_sort {
            cmd = cmd.arg("--no-sort");
        }
        if let Some(preview) = &self.preview {
            cmd = cmd.arg("--preview").arg(preview.as_str());
        }
        if let Some(window) = &self.preview_window {
            cmd = cmd.arg(format!("--preview-window={window}"));
        }
        for binding in &self.bindings {
            cmd = cmd.arg("--bind").arg(binding.as_str());
        }
        if let Some(header) = &self.header {
            cmd = cmd.arg("--header").arg(header.as_str());
        }
        if let Some(border) = &self.border {
            cmd = cmd.arg(format!("--border={border}"));
        }
        if let Some(margin) = &self.margin {
            cmd = cmd.arg(format!("--margin={margin}"));
        }
        if let Some(info) = &self.info {
            cmd = cmd.arg(format!("--info={info}"));
        }
        if self.no_scrollbar {
            cmd = cmd.arg("--no-scrollbar");
        }
        if let Some(prompt) = &self.prompt {
            cmd = cmd.arg("--prompt").arg(prompt.as_str());
        }

        tracing::debug!(command = %cmd, "composed picker command");
        cmd
    }

    /// Apply the exit-status policy to a finished picker
    ///
    /// - `0` with output: the first record, trailing whitespace removed
    /// - `0` without output, or `130`: cancelled
    /// - anything else: failure
    ///
    /// # Errors
    ///
    /// Returns `PickerError::Failed` for any status other than 0 or 130.
    pub fn interpret(
        &self,
        output: &ProcessOutput,
        delimiter: Delimiter,
    ) -> Result<PickerOutcome, PickerError> {
        match output.status {
            Some(0) => {
                let records = delimiter.split(&output.stdout);
                let line = records.first().map_or("", String::as_str);
                let value = self.extract_field(line).trim_end();
                if value.is_empty() {
                    Ok(PickerOutcome::Cancelled)
                } else {
                    Ok(PickerOutcome::Selected(value.to_string()))
                }
            }
            Some(EXIT_CANCELLED) => Ok(PickerOutcome::Cancelled),
            status => Err(PickerError::Failed {
                program: self.program.clone(),
                status,
            }),
        }
    }

    fn extract_field<'a>(&self, line: &'a str) -> &'a str {
        match self.field_separator {
            Some(separator) => line.rsplit(separator).next().unwrap_or(line).trim_start(),
            None => line,
        }
    }
}
