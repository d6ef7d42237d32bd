//! Navpick CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Pick a file or directory below the current directory (default command)
//! navpick
//! navpick select --dirs-only
//!
//! # Pick from everything under $HOME
//! navpick locate
//!
//! # Directory history (record from a shell hook, pick later)
//! navpick record
//! navpick history
//!
//! # zoxide frecency list
//! navpick jump proj
//!
//! # Edit a file
//! navpick edit src/main.rs
//! ```
//!
//! The chosen path is printed on stdout so a shell function can `cd` into
//! it. The exit status is non-zero when nothing was chosen.
//!
//! # Configuration
//!
//! Configuration is stored in the user's config directory
//! (`~/.config/navpick/config.toml` on Linux) and created with defaults on
//! first run.

use navpick::{
    NavpickError, Result,
    cli::{Cli, Commands, ConfigCommands},
    commands::{CommandContext, CommandId, CommandRegistry},
    config::{NavpickConfig, SETTABLE_KEYS},
    host::{OutputWriter, Settings, StderrWriter, TerminalHost},
    logging,
    process::SystemRunner,
};
use std::path::Path;
use std::process::ExitCode;

/// Handle the config command - get or set configuration values
///
/// # Errors
///
/// Returns `NavpickError` if the setting is malformed or the file cannot be
/// written.
fn handle_config_command(
    mut config: NavpickConfig,
    path: &Path,
    command: &ConfigCommands,
    quiet: bool,
) -> Result<()> {
    match command {
        ConfigCommands::Set { setting } => {
            let Some((key, value)) = setting.split_once('=') else {
                return Err(NavpickError::InvalidInput(
                    "Invalid format. Use: navpick config set key=value".into(),
                ));
            };
            let (key, value) = (key.trim(), value.trim());

            config.set(key, value)?;
            config.save_to(path)?;
            if !quiet {
                StderrWriter::new().success(&format!("Set {key} = {value}"));
            }
        }
        ConfigCommands::Get { key } => {
            let value = config.get(key).ok_or_else(|| {
                NavpickError::InvalidInput(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    SETTABLE_KEYS.join(", ")
                ))
            })?;
            println!("{value}");
        }
    }
    Ok(())
}

/// Whether a command is expected to print a navigation target
const fn navigates(id: CommandId) -> bool {
    matches!(
        id,
        CommandId::Select | CommandId::Locate | CommandId::History | CommandId::Jump
    )
}

fn run(cli: &Cli) -> Result<bool> {
    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => NavpickConfig::config_path()?,
    };
    let config = NavpickConfig::load_from(&config_path)?;
    logging::init_tracing(&config);

    let quiet = cli.quiet || config.quiet;
    let command = cli.get_command();
    tracing::debug!(?command, "starting");

    let Some((id, invocation)) = command.invocation() else {
        if let Commands::Config { command } = &command {
            handle_config_command(config, &config_path, command, quiet)?;
        }
        return Ok(true);
    };

    let cwd = std::env::current_dir()?;
    let mut host = TerminalHost::new(Settings::new(config.show_hidden, cwd)).with_quiet(quiet);
    let runner = SystemRunner::new();
    let ctx = CommandContext {
        config: &config,
        runner: &runner,
    };

    CommandRegistry::new().run(id, &mut host, &ctx, &invocation)?;

    Ok(!navigates(id) || host.last_target().is_some())
}

/// Main entry point for the navpick application
///
/// Loads configuration, parses command-line arguments, and dispatches to the
/// registered command handler.
fn main() -> ExitCode {
    let cli = Cli::parse_args();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            StderrWriter::new().error(&e.to_string());
            ExitCode::from(2)
        }
    }
}
