//! Picker invocation adapter
//!
//! Runs a candidate-producing search, hands the candidates to an
//! interactive picker, and turns the chosen line into a navigation action
//! on the host.
//!
//! # Pipeline
//!
//! ```text
//!   DisplayGuard::acquire ──────────────────────────────────┐
//!   │                                                       │
//!   │  search (buffered) ──▶ candidates ──▶ picker (stdin)  │
//!   │        │                   │               │          │
//!   │   SearchError          NoResults      130 = cancel    │
//!   │                                                       │
//!   └────────────────────────────────── restore (Drop) ─────┘
//!   classify ──▶ change_directory | select_file | notice
//! ```
//!
//! The two processes are orchestrated from this process rather than through
//! a shell pipeline: search output is buffered, then written to the
//! picker's stdin. One [`Delimiter`] per request drives the search flags,
//! the candidate parser, the picker's stdin encoding and its record flags,
//! so the two stages cannot disagree on record boundaries.

mod error;

pub use error::PickError;

use crate::host::{DisplayGuard, Host};
use crate::navigate::{self, PathResult};
use crate::picker::{PickerError, PickerOutcome, PickerSpec};
use crate::process::ProcessRunner;
use crate::search::{self, Delimiter, SearchSpec};
use std::path::Path;

/// Where candidates come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CandidateSource {
    /// Output of an external search process
    Search(SearchSpec),
    /// Candidates already in memory (e.g. directory history)
    Literal(Vec<String>),
}

/// A complete picker invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickRequest {
    /// Candidate source
    pub source: CandidateSource,
    /// Picker description
    pub picker: PickerSpec,
    /// Restrict results to directories
    pub dirs_only: bool,
}

impl PickRequest {
    /// Build a request around a search process
    #[must_use]
    pub fn search(spec: SearchSpec, picker: PickerSpec) -> Self {
        let dirs_only = spec.dirs_only;
        Self {
            source: CandidateSource::Search(spec),
            picker,
            dirs_only,
        }
    }

    /// Build a request around in-memory candidates
    #[must_use]
    pub fn literal(candidates: Vec<String>, picker: PickerSpec) -> Self {
        Self {
            source: CandidateSource::Literal(candidates),
            picker,
            dirs_only: false,
        }
    }

    /// Restrict results to directories
    #[must_use]
    pub fn with_dirs_only(mut self, dirs_only: bool) -> Self {
        self.dirs_only = dirs_only;
        if let CandidateSource::Search(spec) = &mut self.source {
            spec.dirs_only = dirs_only;
        }
        self
    }

    /// The record delimiter shared by both pipeline stages
    ///
    /// Search requests use whatever the search tool emits. In-memory
    /// candidates switch to NUL records as soon as one contains a newline.
    #[must_use]
    pub fn delimiter(&self) -> Delimiter {
        match &self.source {
            CandidateSource::Search(spec) => spec.output_delimiter(),
            CandidateSource::Literal(candidates) => {
                if candidates.iter().any(|c| c.contains('\n')) {
                    Delimiter::Nul
                } else {
                    Delimiter::Newline
                }
            }
        }
    }

    /// Produce the candidate list, deduplicated to directories if requested
    ///
    /// Searches run in `base`, and relative candidates are relative to it.
    ///
    /// # Errors
    ///
    /// Returns a `SearchError` if the search process fails.
    pub fn candidates(
        &self,
        runner: &dyn ProcessRunner,
        base: &Path,
    ) -> Result<Vec<String>, search::SearchError> {
        match &self.source {
            CandidateSource::Search(spec) => spec.run(runner, base),
            CandidateSource::Literal(records) => {
                let records: Vec<String> =
                    records.iter().filter(|r| !r.is_empty()).cloned().collect();
                if self.dirs_only {
                    Ok(search::parent_directories(&records, |record| {
                        base.join(record).is_dir()
                    }))
                } else {
                    Ok(search::dedup(records))
                }
            }
        }
    }
}

/// Run the search and picker with the host display suspended
///
/// Returns the raw selected line, or `None` when the user cancelled.
///
/// # Errors
///
/// Returns `PickError::NoResults` when there is nothing to pick from (the
/// picker is not started), or the search/picker error that ended the run.
pub fn pick<H: Host + ?Sized>(
    host: &mut H,
    runner: &dyn ProcessRunner,
    request: &PickRequest,
) -> Result<Option<String>, PickError> {
    let base = host.settings().current_dir.clone();
    let delimiter = request.delimiter();

    let _guard = DisplayGuard::acquire(host);

    let candidates = request.candidates(runner, &base)?;
    if candidates.is_empty() {
        return Err(PickError::NoResults);
    }
    tracing::debug!(count = candidates.len(), "candidates collected");

    let command = request.picker.command(delimiter);
    let input = delimiter.join(&candidates);
    let output = runner
        .interactive(&command, &input)
        .map_err(|source| PickerError::Spawn {
            program: command.program.clone(),
            source,
        })?;

    match request.picker.interpret(&output, delimiter)? {
        PickerOutcome::Selected(line) => Ok(Some(line)),
        PickerOutcome::Cancelled => {
            tracing::debug!("picker cancelled");
            Ok(None)
        }
    }
}

/// Run the pipeline and classify the selection without navigating
///
/// # Errors
///
/// Same as [`pick`].
pub fn pick_path<H: Host + ?Sized>(
    host: &mut H,
    runner: &dyn ProcessRunner,
    request: &PickRequest,
) -> Result<Option<PathResult>, PickError> {
    let base = host.settings().current_dir.clone();

    let selection = pick(host, runner, request)?;
    Ok(selection.map(|line| {
        let result = navigate::resolve(&line, &base);
        tracing::info!(path = %result.path.display(), kind = %result.kind, "picked");
        result
    }))
}

/// Show a pipeline error to the user as a single notice
pub fn report<H: Host + ?Sized>(host: &mut H, error: &PickError) {
    match error {
        PickError::NoResults => tracing::info!("no candidates"),
        other => tracing::warn!(error = %other, "picker invocation failed"),
    }
    host.notify(&error.to_string(), error.level());
}

/// Pick a path and navigate to it
///
/// Every failure is converted into exactly one host notice; cancellation is
/// silent. Directories are opened, files selected, and anything else
/// reported. The classified selection is returned whatever its kind.
pub fn invoke_picker<H: Host + ?Sized>(
    host: &mut H,
    runner: &dyn ProcessRunner,
    request: &PickRequest,
) -> Option<PathResult> {
    match pick_path(host, runner, request) {
        Ok(Some(result)) => {
            navigate::dispatch(host, &result);
            Some(result)
        }
        Ok(None) => None,
        Err(error) => {
            report(host, &error);
            None
        }
    }
}
