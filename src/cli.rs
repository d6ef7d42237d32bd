//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **select**: pick a file or directory under the current directory (default)
//! - **locate**: pick from everything under the home directory
//! - **history**: pick from recently visited directories
//! - **record**: add a directory to the history (for shell hooks)
//! - **jump**: pick from zoxide's frecency list
//! - **edit**: open a file in the editor
//! - **config**: read or change settings
//!
//! Every picking command accepts `-d/--dirs-only`, which narrows the
//! candidates to directories.

use crate::commands::{CommandId, Invocation};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Configuration management subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ConfigCommands {
    /// Set a configuration value
    Set {
        /// Configuration key=value (e.g., show_hidden=true)
        #[arg(value_name = "KEY=VALUE")]
        setting: String,
    },

    /// Get a configuration value
    Get {
        /// Configuration key to retrieve (e.g., finder)
        #[arg(value_name = "KEY")]
        key: String,
    },
}

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "navpick")]
#[command(about = "Fuzzy file and directory navigation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Suppress informational notices
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,

    /// Use an alternate configuration file
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Pick a file or directory under the current directory (default)
    #[command(visible_alias = "s")]
    Select {
        /// Only offer directories
        #[arg(short = 'd', long = "dirs-only")]
        dirs_only: bool,

        /// Include hidden entries (overrides config)
        #[arg(long = "hidden")]
        hidden: bool,

        /// Search under this directory instead
        #[arg(value_name = "DIR")]
        root: Option<PathBuf>,
    },

    /// Pick from everything under the home directory
    #[command(visible_alias = "l")]
    Locate {
        /// Only offer directories
        #[arg(short = 'd', long = "dirs-only")]
        dirs_only: bool,

        /// Search under this directory instead
        #[arg(value_name = "ROOT")]
        root: Option<PathBuf>,
    },

    /// Pick from recently visited directories
    #[command(visible_alias = "h")]
    History,

    /// Add a directory to the history
    Record {
        /// Directory to record (defaults to the current directory)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Pick from zoxide's frecency-ranked directories
    #[command(visible_alias = "j")]
    Jump {
        /// Keywords to narrow the list
        #[arg(value_name = "KEYWORD")]
        keywords: Vec<String>,
    },

    /// Open a file in the editor
    #[command(visible_alias = "e")]
    Edit {
        /// File to edit (picked interactively when omitted)
        #[arg(value_name = "FILE", num_args = 0..)]
        file: Vec<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the command to execute, defaulting to `select` if none specified
    #[must_use]
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Select {
            dirs_only: false,
            hidden: false,
            root: None,
        })
    }
}

impl Commands {
    /// Registry key and arguments for a navigation command
    ///
    /// Returns `None` for `config`, which is handled outside the registry.
    #[must_use]
    pub fn invocation(&self) -> Option<(CommandId, Invocation)> {
        let pair = match self {
            Self::Select {
                dirs_only,
                hidden,
                root,
            } => (
                CommandId::Select,
                Invocation {
                    dirs_only: *dirs_only,
                    hidden: hidden.then_some(true),
                    root: root.clone(),
                    args: Vec::new(),
                },
            ),
            Self::Locate { dirs_only, root } => (
                CommandId::Locate,
                Invocation {
                    dirs_only: *dirs_only,
                    root: root.clone(),
                    ..Invocation::default()
                },
            ),
            Self::History => (CommandId::History, Invocation::default()),
            Self::Record { dir } => (
                CommandId::Record,
                Invocation {
                    root: dir.clone(),
                    ..Invocation::default()
                },
            ),
            Self::Jump { keywords } => (
                CommandId::Jump,
                Invocation {
                    args: keywords.clone(),
                    ..Invocation::default()
                },
            ),
            Self::Edit { file } => (
                CommandId::Edit,
                Invocation {
                    args: file.clone(),
                    ..Invocation::default()
                },
            ),
            Self::Config { .. } => return None,
        };
        Some(pair)
    }
}
