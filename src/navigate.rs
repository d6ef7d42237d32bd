//! Path classification and navigation dispatch

use crate::adapter::PickError;
use crate::host::Host;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// What a selected path turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// An existing directory
    Directory,
    /// An existing regular file
    File,
    /// Missing, or something other than a file or directory
    Neither,
}

impl fmt::Display for PathKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Directory => "directory",
            Self::File => "file",
            Self::Neither => "neither",
        };
        write!(f, "{name}")
    }
}

/// A classified selection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    /// Absolute path
    pub path: PathBuf,
    /// Classification at the time of the check
    pub kind: PathKind,
}

/// Resolve `selected` against `base` and normalize `.` and `..` lexically
///
/// Symlinks are not resolved, so the path the user picked is the path that
/// gets navigated to.
#[must_use]
pub fn absolutize(selected: &str, base: &Path) -> PathBuf {
    let expanded = expand_tilde(selected);
    let joined = if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

fn expand_tilde(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => dirs::home_dir().map_or_else(
            || PathBuf::from(path),
            |home| home.join(rest.trim_start_matches('/')),
        ),
        _ => PathBuf::from(path),
    }
}

/// Check the filesystem for what `path` is
#[must_use]
pub fn classify(path: &Path) -> PathKind {
    match path.metadata() {
        Ok(meta) if meta.is_dir() => PathKind::Directory,
        Ok(meta) if meta.is_file() => PathKind::File,
        _ => PathKind::Neither,
    }
}

/// Resolve and classify a selection
#[must_use]
pub fn resolve(selected: &str, base: &Path) -> PathResult {
    let path = absolutize(selected, base);
    let kind = classify(&path);
    PathResult { path, kind }
}

/// Hand a classified path to the host
///
/// Directories become the current directory, files the current selection.
/// Anything else is reported as an error notice and nothing navigates.
/// Returns whether a navigation action was issued.
pub fn dispatch<H: Host + ?Sized>(host: &mut H, result: &PathResult) -> bool {
    match result.kind {
        PathKind::Directory => {
            host.change_directory(&result.path);
            true
        }
        PathKind::File => {
            host.select_file(&result.path);
            true
        }
        PathKind::Neither => {
            tracing::warn!(path = %result.path.display(), "selection is neither file nor directory");
            let error = PickError::NeitherFileNorDirectory(result.path.clone());
            host.notify(&error.to_string(), error.level());
            false
        }
    }
}
