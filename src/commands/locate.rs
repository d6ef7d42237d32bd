//! Pick from everything under the home directory

use super::{CommandContext, Invocation};
use crate::adapter::{self, PickRequest};
use crate::config::NavpickConfig;
use crate::host::Host;
use crate::picker::PickerSpec;
use crate::search::{Delimiter, SearchSpec};
use crate::{NavpickError, Result};

/// Build the `locate` request
///
/// # Errors
///
/// Returns `NavpickError::InvalidInput` when no root was given and the home
/// directory cannot be determined.
pub fn request(config: &NavpickConfig, invocation: &Invocation) -> Result<PickRequest> {
    let root = invocation
        .root
        .clone()
        .or_else(|| config.locate_root())
        .ok_or_else(|| {
            NavpickError::InvalidInput("Could not determine home directory".to_string())
        })?;

    let spec = SearchSpec::new(config.search_tool)
        .with_root(root)
        .with_hidden(true)
        .with_exclusions(config.locate_excludes.iter().cloned())
        .with_delimiter(Delimiter::Nul);

    let picker = PickerSpec::new(config.finder.as_str())
        .exact()
        .ignore_case()
        .with_algo("v1");

    Ok(PickRequest::search(spec, picker).with_dirs_only(invocation.dirs_only))
}

/// Execute the locate command
///
/// # Errors
///
/// Returns `NavpickError::InvalidInput` if there is no root to search.
/// Pipeline errors are reported as notices on the host.
pub fn execute(host: &mut dyn Host, ctx: &CommandContext<'_>, invocation: &Invocation) -> Result<()> {
    let request = request(ctx.config, invocation)?;
    adapter::invoke_picker(host, ctx.runner, &request);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MessageLevel;
    use crate::search::SearchTool;
    use crate::testing::{HostEvent, MockRunner, RecordingHost};
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config_rooted_at(root: &std::path::Path) -> NavpickConfig {
        NavpickConfig {
            locate_root: Some(root.to_path_buf()),
            ..NavpickConfig::default()
        }
    }

    #[test]
    fn test_locate_command_lines() {
        let config = config_rooted_at(std::path::Path::new("/home/u"));
        let request = request(&config, &Invocation::default()).unwrap();
        assert_eq!(request.delimiter(), Delimiter::Nul);

        let crate::adapter::CandidateSource::Search(spec) = &request.source else {
            panic!("Expected a search source");
        };
        assert_eq!(
            spec.command().unwrap().args,
            vec![
                "--files",
                "--null",
                "--glob",
                "!.git",
                "--glob",
                "!node_modules",
                "--glob",
                "!.trash",
                "--glob",
                "!.Trash",
                "--hidden",
                "/home/u",
            ]
        );
        assert_eq!(
            request.picker.command(Delimiter::Nul).args,
            vec!["-e", "-i", "--algo=v1", "--read0", "--print0"]
        );
    }

    #[test]
    fn test_fd_locate() {
        let config = NavpickConfig {
            search_tool: SearchTool::Fd,
            ..config_rooted_at(std::path::Path::new("/home/u"))
        };
        let invocation = Invocation {
            dirs_only: true,
            ..Invocation::default()
        };
        let request = request(&config, &invocation).unwrap();
        let crate::adapter::CandidateSource::Search(spec) = &request.source else {
            panic!("Expected a search source");
        };
        let args = spec.command().unwrap().args;
        assert_eq!(args[0], "--print0");
        assert!(args.windows(2).any(|w| w == ["--type", "d"]));
        assert_eq!(args.last().map(String::as_str), Some("/home/u"));
    }

    #[test]
    fn test_explicit_root_wins() {
        let config = config_rooted_at(std::path::Path::new("/home/u"));
        let invocation = Invocation {
            root: Some(PathBuf::from("/srv")),
            ..Invocation::default()
        };
        let request = request(&config, &invocation).unwrap();
        assert!(matches!(
            request.source,
            crate::adapter::CandidateSource::Search(SearchSpec { root: Some(ref root), .. })
                if root == &PathBuf::from("/srv")
        ));
    }

    #[test]
    fn test_locate_dirs_only_changes_directory() {
        let home = TempDir::new().unwrap();
        let proj = home.path().join("proj");
        std::fs::create_dir(&proj).unwrap();
        std::fs::write(proj.join("readme"), "hi").unwrap();

        let listing = format!("{}\0", proj.join("readme").display());
        let chosen = format!("{}\0", proj.display());
        let runner = MockRunner::new().search(0, listing).picker(0, chosen);
        let config = config_rooted_at(home.path());
        let ctx = CommandContext {
            config: &config,
            runner: &runner,
        };
        let invocation = Invocation {
            dirs_only: true,
            ..Invocation::default()
        };
        let mut host = RecordingHost::new("/");

        execute(&mut host, &ctx, &invocation).unwrap();

        let (_, input) = &runner.pickers.borrow()[0];
        assert_eq!(input, format!("{}\0", proj.display()).as_bytes());
        assert_eq!(host.navigations(), vec![HostEvent::ChangeDirectory(proj)]);
    }

    #[test]
    fn test_missing_finder_reports_error() {
        let home = TempDir::new().unwrap();
        let runner = MockRunner::new().search(0, "a\0").picker_missing();
        let config = config_rooted_at(home.path());
        let ctx = CommandContext {
            config: &config,
            runner: &runner,
        };
        let mut host = RecordingHost::new("/");

        execute(&mut host, &ctx, &Invocation::default()).unwrap();

        let notices = host.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].0, MessageLevel::Error);
        assert!(notices[0].1.contains("fzf"));
        assert_eq!(host.count(&HostEvent::Restore), 1);
    }
}
