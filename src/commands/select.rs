//! Pick a file or directory below the current directory

use super::{CommandContext, Invocation};
use crate::Result;
use crate::adapter::{self, PickRequest};
use crate::config::NavpickConfig;
use crate::host::{Host, Settings};
use crate::picker::PickerSpec;
use crate::search::{SearchSpec, SearchTool};

const HEADER: &str = "Search Files in CD/";

/// Build the `select` request
#[must_use]
pub fn request(config: &NavpickConfig, settings: &Settings, invocation: &Invocation) -> PickRequest {
    let hidden = invocation.hidden.unwrap_or(settings.show_hidden);
    let extra: &[&str] = match config.search_tool {
        SearchTool::Ripgrep => &["--no-messages", "--no-ignore-vcs"],
        SearchTool::Fd => &["--no-ignore-vcs"],
        SearchTool::Zoxide => &[],
    };

    let mut spec = SearchSpec::new(config.search_tool)
        .with_exclusions(config.select_excludes.iter().cloned())
        .with_hidden(hidden)
        .with_extra_args(extra.iter().copied());
    if let Some(root) = &invocation.root {
        spec = spec.with_root(root);
    }

    let picker = PickerSpec::new(config.finder.as_str())
        .with_ansi(true)
        .with_preview(config.preview_command.as_str(), "right:50%")
        .with_binding("ctrl-/:toggle-preview")
        .with_header(HEADER)
        .with_layout("sharp", "1", "inline-right")
        .with_no_scrollbar()
        .with_prompt("");

    PickRequest::search(spec, picker).with_dirs_only(invocation.dirs_only)
}

/// Execute the select command
///
/// # Errors
///
/// Never fails; pipeline errors are reported as notices on the host.
pub fn execute(host: &mut dyn Host, ctx: &CommandContext<'_>, invocation: &Invocation) -> Result<()> {
    let request = request(ctx.config, host.settings(), invocation);
    adapter::invoke_picker(host, ctx.runner, &request);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HostEvent, MockRunner, RecordingHost};
    use std::path::PathBuf;

    fn run(host: &mut RecordingHost, runner: &MockRunner, invocation: &Invocation) {
        let config = NavpickConfig::default();
        let ctx = CommandContext {
            config: &config,
            runner,
        };
        execute(host, &ctx, invocation).unwrap();
    }

    #[test]
    fn test_search_command_line() {
        let config = NavpickConfig::default();
        let settings = Settings::new(false, "/tmp");
        let request = request(&config, &settings, &Invocation::default());

        let crate::adapter::CandidateSource::Search(spec) = &request.source else {
            panic!("Expected a search source");
        };
        let cmd = spec.command().unwrap();
        assert_eq!(cmd.program, "rg");
        assert_eq!(
            cmd.args,
            vec![
                "--files",
                "--glob",
                "!.git",
                "--glob",
                "!*.py[co]",
                "--glob",
                "!__pycache__",
                "--glob",
                "!node_modules",
                "--glob",
                "!.vscode",
                "--glob",
                "!.Trash",
                "--no-messages",
                "--no-ignore-vcs",
            ]
        );
    }

    #[test]
    fn test_hidden_follows_settings_unless_overridden() {
        let config = NavpickConfig::default();

        let shown = Settings::new(true, "/tmp");
        assert!(matches!(
            request(&config, &shown, &Invocation::default()).source,
            crate::adapter::CandidateSource::Search(SearchSpec { hidden: true, .. })
        ));

        let hidden = Settings::new(false, "/tmp");
        let invocation = Invocation {
            hidden: Some(true),
            ..Invocation::default()
        };
        assert!(matches!(
            request(&config, &hidden, &invocation).source,
            crate::adapter::CandidateSource::Search(SearchSpec { hidden: true, .. })
        ));
    }

    #[test]
    fn test_picker_styling() {
        let config = NavpickConfig::default();
        let settings = Settings::new(false, "/tmp");
        let request = request(&config, &settings, &Invocation::default());
        let args = request.picker.command(request.delimiter()).args;

        assert_eq!(args[0], "--ansi");
        assert!(args.contains(&"--preview-window=right:50%".to_string()));
        assert!(args.contains(&"ctrl-/:toggle-preview".to_string()));
        assert!(args.contains(&HEADER.to_string()));
        assert!(args.contains(&"--no-scrollbar".to_string()));
        assert!(!args.contains(&"--read0".to_string()));
    }

    #[test]
    fn test_selected_file_is_selected_on_host() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("main.rs"), "fn main() {}").unwrap();

        let runner = MockRunner::new().search(0, "main.rs\n").picker(0, "main.rs\n");
        let mut host = RecordingHost::new(dir.path());
        run(&mut host, &runner, &Invocation::default());

        assert_eq!(
            host.navigations(),
            vec![HostEvent::SelectFile(dir.path().join("main.rs"))]
        );
        assert_eq!(host.count(&HostEvent::Suspend), 1);
        assert_eq!(host.count(&HostEvent::Restore), 1);
    }

    #[test]
    fn test_relative_root_selection_selects_file() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("src")).unwrap();
        std::fs::write(dir.path().join("src").join("lib.rs"), "").unwrap();

        let runner = MockRunner::new()
            .search(0, "src/lib.rs\n")
            .picker(0, "src/lib.rs\n");
        let mut host = RecordingHost::new(dir.path());
        let invocation = Invocation {
            root: Some(PathBuf::from("src")),
            ..Invocation::default()
        };
        run(&mut host, &runner, &invocation);

        let captured = runner.captured.borrow();
        assert_eq!(captured[0].args.last().map(String::as_str), Some("src"));
        assert_eq!(captured[0].current_dir.as_deref(), Some(dir.path()));
        assert_eq!(
            host.navigations(),
            vec![HostEvent::SelectFile(dir.path().join("src").join("lib.rs"))]
        );
        assert!(host.notices().is_empty());
    }

    #[test]
    fn test_hidden_entries_follow_host_setting() {
        let runner = MockRunner::new().search(1, "");
        let mut host = RecordingHost::new("/tmp").with_hidden();
        run(&mut host, &runner, &Invocation::default());

        assert!(runner.captured.borrow()[0].args.contains(&"--hidden".to_string()));
    }

    #[test]
    fn test_no_results_notice() {
        let runner = MockRunner::new().search(1, "");
        let mut host = RecordingHost::new("/tmp");
        run(&mut host, &runner, &Invocation::default());

        assert_eq!(runner.picker_runs(), 0);
        assert_eq!(host.notices().len(), 1);
        assert_eq!(host.notices()[0].1, "No results");
    }
}
