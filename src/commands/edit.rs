//! Open a file in the user's editor

use super::{CommandContext, Invocation, select};
use crate::Result;
use crate::adapter;
use crate::host::{DisplayGuard, Host, MessageLevel};
use crate::navigate;
use crate::process::CommandLine;
use std::path::{Path, PathBuf};

/// Split an editor setting such as `code --wait` into a command line for `file`
#[must_use]
pub fn editor_command(editor: &str, file: &Path) -> CommandLine {
    let mut words = editor.split_whitespace();
    let program = words.next().unwrap_or("vi");
    CommandLine::new(program)
        .args(words)
        .arg(file.to_string_lossy())
}

/// The file to edit: the joined arguments, or an interactive pick
fn target(host: &mut dyn Host, ctx: &CommandContext<'_>, invocation: &Invocation) -> Option<PathBuf> {
    let cwd = host.settings().current_dir.clone();
    if !invocation.args.is_empty() {
        return Some(navigate::absolutize(&invocation.args.join(" "), &cwd));
    }

    let request = select::request(ctx.config, host.settings(), &Invocation::default());
    match adapter::pick_path(host, ctx.runner, &request) {
        Ok(picked) => picked.map(|result| result.path),
        Err(error) => {
            adapter::report(host, &error);
            None
        }
    }
}

/// Execute the edit command
///
/// # Errors
///
/// Never fails; problems are reported as notices on the host.
pub fn execute(host: &mut dyn Host, ctx: &CommandContext<'_>, invocation: &Invocation) -> Result<()> {
    let Some(file) = target(host, ctx, invocation) else {
        return Ok(());
    };

    host.notify(
        &format!("Let's edit the file {}!", file.display()),
        MessageLevel::Info,
    );
    if !file.exists() {
        host.notify("The given file does not exist!", MessageLevel::Error);
        return Ok(());
    }

    let editor = ctx.config.editor();
    let command = editor_command(&editor, &file);
    let status = {
        let _guard = DisplayGuard::acquire(host);
        ctx.runner.attached(&command)
    };

    match status {
        Ok(Some(0)) => tracing::info!(file = %file.display(), %editor, "edited"),
        Ok(status) => {
            let status = status.map_or_else(|| "signal".to_string(), |s| s.to_string());
            host.notify(
                &format!("Editor '{editor}' exited with status {status}"),
                MessageLevel::Warning,
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, %editor, "failed to launch editor");
            host.notify(
                &format!("Failed to launch editor '{editor}': {e}"),
                MessageLevel::Error,
            );
        }
    }
    Ok(())
}
