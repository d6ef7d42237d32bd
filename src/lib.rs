//! Navpick - fuzzy file and directory navigation
//!
//! Drives an external search tool (`rg`, `fd` or `zoxide`) into an
//! interactive picker (`fzf`) and turns the chosen line into a navigation
//! action: change directory for directories, select for files.

use thiserror::Error;

pub mod adapter;
pub mod cli;
pub mod commands;
pub mod config;
pub mod host;
pub mod logging;
pub mod navigate;
pub mod picker;
pub mod process;
pub mod search;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum NavpickError {
    /// Picker pipeline error
    #[error("{0}")]
    Pick(#[from] adapter::PickError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result alias used by commands and the binary
pub type Result<T> = std::result::Result<T, NavpickError>;
