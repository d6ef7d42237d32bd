//! Tracing initialization
//!
//! Logs go to a file in the data directory
//! (`~/.local/share/navpick/navpick.log` on Linux): stdout carries
//! navigation targets and stderr belongs to the picker's UI, so neither can
//! take log lines.
//!
//! # Level resolution
//!
//! 1. `RUST_LOG` if set
//! 2. `log_level` from the config file
//! 3. `info`

use crate::config::NavpickConfig;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, fmt};

/// Default log file location
#[must_use]
pub fn log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("navpick").join("navpick.log"))
}

fn filter(config: &NavpickConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.log_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Install the global tracing subscriber
///
/// Logging is optional: if the log file cannot be opened, or a subscriber
/// is already installed, this silently does nothing.
pub fn init_tracing(config: &NavpickConfig) {
    let Some(path) = log_path() else {
        return;
    };
    if let Some(parent) = path.parent()
        && std::fs::create_dir_all(parent).is_err()
    {
        return;
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let _ = fmt()
        .with_env_filter(filter(config))
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
