//! Testing utilities for navpick
//!
//! Test doubles for the two seams of the picker pipeline: a [`RecordingHost`]
//! that logs every host call in order, and a [`MockRunner`] that returns
//! scripted process results and remembers what it was asked to run.
//!
//! Only available when compiled with `cfg(test)`.

use crate::host::{Host, MessageLevel, Settings};
use crate::process::{CommandLine, ProcessOutput, ProcessRunner};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

/// One call made on a [`RecordingHost`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostEvent {
    Suspend,
    Restore,
    ChangeDirectory(PathBuf),
    SelectFile(PathBuf),
    Notify(MessageLevel, String),
}

/// Host double that records calls
pub struct RecordingHost {
    pub events: Vec<HostEvent>,
    settings: Settings,
    fail_suspend: bool,
}

impl RecordingHost {
    /// Create a host whose current directory is `cwd`
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        Self {
            events: Vec::new(),
            settings: Settings::new(false, cwd),
            fail_suspend: false,
        }
    }

    /// Make `suspend` return an error
    pub fn failing_suspend(mut self) -> Self {
        self.fail_suspend = true;
        self
    }

    /// Enable hidden entries in settings
    pub fn with_hidden(mut self) -> Self {
        self.settings.show_hidden = true;
        self
    }

    /// Notices emitted so far
    pub fn notices(&self) -> Vec<(MessageLevel, String)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                HostEvent::Notify(level, message) => Some((*level, message.clone())),
                _ => None,
            })
            .collect()
    }

    /// Navigation events emitted so far
    pub fn navigations(&self) -> Vec<HostEvent> {
        self.events
            .iter()
            .filter(|event| {
                matches!(event, HostEvent::ChangeDirectory(_) | HostEvent::SelectFile(_))
            })
            .cloned()
            .collect()
    }

    /// Count of an exact event
    pub fn count(&self, wanted: &HostEvent) -> usize {
        self.events.iter().filter(|event| *event == wanted).count()
    }
}

impl Host for RecordingHost {
    fn suspend(&mut self) -> io::Result<()> {
        self.events.push(HostEvent::Suspend);
        if self.fail_suspend {
            return Err(io::Error::other("no terminal"));
        }
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.events.push(HostEvent::Restore);
        Ok(())
    }

    fn change_directory(&mut self, path: &Path) {
        self.events.push(HostEvent::ChangeDirectory(path.to_path_buf()));
    }

    fn select_file(&mut self, path: &Path) {
        self.events.push(HostEvent::SelectFile(path.to_path_buf()));
    }

    fn notify(&mut self, message: &str, level: MessageLevel) {
        self.events.push(HostEvent::Notify(level, message.to_string()));
    }

    fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Scripted result for one process invocation
pub enum Scripted {
    Output(ProcessOutput),
    Missing,
}

/// Process runner double
///
/// `capture` and `interactive` results are consumed from separate queues.
/// An empty queue behaves like a missing executable.
#[derive(Default)]
pub struct MockRunner {
    captures: RefCell<VecDeque<Scripted>>,
    interactives: RefCell<VecDeque<Scripted>>,
    attached_status: Option<i32>,
    pub captured: RefCell<Vec<CommandLine>>,
    pub pickers: RefCell<Vec<(CommandLine, Vec<u8>)>>,
    pub attached_runs: RefCell<Vec<CommandLine>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a search result
    pub fn search(self, status: i32, stdout: impl Into<Vec<u8>>) -> Self {
        self.captures
            .borrow_mut()
            .push_back(Scripted::Output(ProcessOutput::new(status, stdout)));
        self
    }

    /// Queue a search result with stderr
    pub fn search_failing(self, status: i32, stderr: &str) -> Self {
        self.captures
            .borrow_mut()
            .push_back(Scripted::Output(ProcessOutput::new(status, "").with_stderr(stderr)));
        self
    }

    /// Queue a missing search executable
    pub fn search_missing(self) -> Self {
        self.captures.borrow_mut().push_back(Scripted::Missing);
        self
    }

    /// Queue a picker result
    pub fn picker(self, status: i32, stdout: impl Into<Vec<u8>>) -> Self {
        self.interactives
            .borrow_mut()
            .push_back(Scripted::Output(ProcessOutput::new(status, stdout)));
        self
    }

    /// Queue a missing picker executable
    pub fn picker_missing(self) -> Self {
        self.interactives.borrow_mut().push_back(Scripted::Missing);
        self
    }

    /// Exit status for attached runs (editor)
    pub fn attached_status(mut self, status: i32) -> Self {
        self.attached_status = Some(status);
        self
    }

    /// Number of picker launches
    pub fn picker_runs(&self) -> usize {
        self.pickers.borrow().len()
    }

    fn next(queue: &RefCell<VecDeque<Scripted>>, program: &str) -> io::Result<ProcessOutput> {
        match queue.borrow_mut().pop_front() {
            Some(Scripted::Output(output)) => Ok(output),
            Some(Scripted::Missing) | None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{program}: not found"),
            )),
        }
    }
}

impl ProcessRunner for MockRunner {
    fn capture(&self, command: &CommandLine) -> io::Result<ProcessOutput> {
        self.captured.borrow_mut().push(command.clone());
        Self::next(&self.captures, &command.program)
    }

    fn interactive(&self, command: &CommandLine, input: &[u8]) -> io::Result<ProcessOutput> {
        self.pickers.borrow_mut().push((command.clone(), input.to_vec()));
        Self::next(&self.interactives, &command.program)
    }

    fn attached(&self, command: &CommandLine) -> io::Result<Option<i32>> {
        self.attached_runs.borrow_mut().push(command.clone());
        self.attached_status.map_or_else(
            || Err(io::Error::new(io::ErrorKind::NotFound, "editor: not found")),
            |status| Ok(Some(status)),
        )
    }
}
