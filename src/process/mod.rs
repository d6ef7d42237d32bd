//! Child process execution
//!
//! Every external tool navpick drives (search tools, the fuzzy finder, the
//! editor) is started through the [`ProcessRunner`] trait. Commands are built
//! as argument vectors and handed straight to the OS; nothing goes through a
//! shell.
//!
//! The real implementation is [`SystemRunner`]. Tests substitute a scripted
//! runner so the pipeline can be exercised without any tool installed.

use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

/// Exit status interactive tools use when the user cancels (ESC / Ctrl-C)
pub const EXIT_CANCELLED: i32 = 130;

/// A program and its argument vector
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    /// Executable name or path
    pub program: String,
    /// Arguments, in order
    pub args: Vec<String>,
    /// Working directory, `None` to inherit
    pub current_dir: Option<PathBuf>,
}

impl CommandLine {
    /// Create a command line with no arguments
    #[must_use]
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Run the process in `dir`
    #[must_use]
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(dir) = &self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished child process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Exit code, `None` if the process was terminated by a signal
    pub status: Option<i32>,
    /// Raw stdout bytes
    pub stdout: Vec<u8>,
    /// Raw stderr bytes (empty when stderr was inherited)
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    /// Build an output from an exit code and stdout text
    #[must_use]
    pub fn new(status: i32, stdout: impl Into<Vec<u8>>) -> Self {
        Self {
            status: Some(status),
            stdout: stdout.into(),
            stderr: Vec::new(),
        }
    }

    /// Attach stderr text
    #[must_use]
    pub fn with_stderr(mut self, stderr: impl Into<Vec<u8>>) -> Self {
        self.stderr = stderr.into();
        self
    }

    /// Whether the process exited with status 0
    #[must_use]
    pub const fn success(&self) -> bool {
        matches!(self.status, Some(0))
    }

    /// Stderr decoded lossily and trimmed
    #[must_use]
    pub fn stderr_text(&self) -> String {
        String::from_utf8_lossy(&self.stderr).trim().to_string()
    }
}

/// Abstraction over process creation
pub trait ProcessRunner {
    /// Run a non-interactive process to completion, capturing stdout and stderr.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the process cannot be spawned (e.g. missing executable).
    fn capture(&self, command: &CommandLine) -> io::Result<ProcessOutput>;

    /// Run an interactive process that owns the terminal.
    ///
    /// `input` is written to the child's stdin, which is then closed. Stdout
    /// is captured; stderr stays attached to the terminal since interactive
    /// pickers draw their UI there.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the process cannot be spawned or waited on.
    fn interactive(&self, command: &CommandLine, input: &[u8]) -> io::Result<ProcessOutput>;

    /// Run a process with all standard streams inherited, returning its exit code.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the process cannot be spawned or waited on.
    fn attached(&self, command: &CommandLine) -> io::Result<Option<i32>>;
}

/// [`ProcessRunner`] backed by `std::process`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    /// Create a new system runner
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn capture(&self, command: &CommandLine) -> io::Result<ProcessOutput> {
        tracing::debug!(%command, "running search process");
        let output = command.to_command().stdin(Stdio::null()).output()?;
        tracing::debug!(status = ?output.status.code(), bytes = output.stdout.len(), "search process exited");

        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }

    fn interactive(&self, command: &CommandLine, input: &[u8]) -> io::Result<ProcessOutput> {
        tracing::debug!(%command, "starting picker");
        let mut child = command
            .to_command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()?;

        let stdin = child.stdin.take();
        // The picker may exit before reading all input; feed it from a
        // separate thread so a full pipe never blocks the wait below.
        let output = thread::scope(|scope| {
            let writer = scope.spawn(move || -> io::Result<()> {
                if let Some(mut stdin) = stdin {
                    match stdin.write_all(input) {
                        Err(e) if e.kind() != io::ErrorKind::BrokenPipe => return Err(e),
                        _ => {}
                    }
                }
                Ok(())
            });
            let output = child.wait_with_output();
            match writer.join() {
                Ok(Err(e)) => tracing::warn!(error = %e, "failed to write picker input"),
                Err(_) => tracing::warn!("picker input writer panicked"),
                Ok(Ok(())) => {}
            }
            output
        })?;
        tracing::debug!(status = ?output.status.code(), "picker exited");

        Ok(ProcessOutput {
            status: output.status.code(),
            stdout: output.stdout,
            stderr: Vec::new(),
        })
    }

    fn attached(&self, command: &CommandLine) -> io::Result<Option<i32>> {
        tracing::debug!(%command, "running attached process");
        let status = command.to_command().status()?;
        Ok(status.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_display() {
        let cmd = CommandLine::new("rg").arg("--files").args(["--glob", "!.git"]);
        assert_eq!(cmd.to_string(), "rg --files --glob !.git");
    }

    #[test]
    fn test_process_output_success() {
        assert!(ProcessOutput::new(0, "x").success());
        assert!(!ProcessOutput::new(1, "").success());
        assert!(!ProcessOutput::default().success());
    }

    #[test]
    fn test_stderr_text_is_trimmed() {
        let output = ProcessOutput::new(2, "").with_stderr("rg: bad flag\n");
        assert_eq!(output.stderr_text(), "rg: bad flag");
    }

    #[test]
    fn test_capture_missing_executable_fails() {
        let runner = SystemRunner::new();
        let result = runner.capture(&CommandLine::new("navpick-definitely-not-installed"));
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_collects_stdout_and_status() {
        let runner = SystemRunner::new();
        let output = runner
            .capture(&CommandLine::new("sh").args(["-c", "printf 'a\\nb\\n'; exit 3"]))
            .unwrap();
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout, b"a\nb\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_capture_runs_in_given_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();

        let runner = SystemRunner::new();
        let output = runner
            .capture(&CommandLine::new("ls").in_dir(dir.path()))
            .unwrap();
        assert_eq!(output.stdout, b"marker\n");
    }

    #[test]
    fn test_display_omits_directory() {
        let cmd = CommandLine::new("rg").arg("--files").in_dir("/work");
        assert_eq!(cmd.to_string(), "rg --files");
        assert_eq!(cmd.current_dir, Some(PathBuf::from("/work")));
    }

    #[cfg(unix)]
    #[test]
    fn test_interactive_feeds_stdin() {
        let runner = SystemRunner::new();
        let output = runner
            .interactive(&CommandLine::new("head").args(["-n", "1"]), b"first\nsecond\n")
            .unwrap();
        assert_eq!(output.status, Some(0));
        assert_eq!(output.stdout, b"first\n");
    }
}
