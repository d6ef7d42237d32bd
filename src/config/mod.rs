//! Configuration module for navpick
//!
//! Settings for the search tools, the picker and the individual commands.
//! Configuration is stored in the user's config directory
//! (`~/.config/navpick/config.toml` on Linux) and created with defaults on
//! first use.

use crate::search::SearchTool;
use config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Keys accepted by `navpick config get/set`
pub const SETTABLE_KEYS: &[&str] = &[
    "show_hidden",
    "quiet",
    "finder",
    "search_tool",
    "preview_command",
    "editor",
    "history_limit",
    "log_level",
];

const DEFAULT_PREVIEW: &str =
    "bat --style=numbers,changes,header --color=always --theme=Nord --line-range :100 {}";

fn default_finder() -> String {
    "fzf".to_string()
}

fn default_preview_command() -> String {
    DEFAULT_PREVIEW.to_string()
}

fn default_select_excludes() -> Vec<String> {
    [".git", "*.py[co]", "__pycache__", "node_modules", ".vscode", ".Trash"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_locate_excludes() -> Vec<String> {
    [".git", "node_modules", ".trash", ".Trash"]
        .into_iter()
        .map(String::from)
        .collect()
}

const fn default_history_limit() -> usize {
    500
}

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct NavpickConfig {
    /// Include hidden entries in `select`
    #[serde(default)]
    pub show_hidden: bool,

    /// Suppress informational notices by default
    #[serde(default)]
    pub quiet: bool,

    /// Fuzzy finder executable
    #[serde(default = "default_finder")]
    pub finder: String,

    /// Search tool used by `select` and `locate`
    #[serde(default)]
    pub search_tool: SearchTool,

    /// Preview command template for `select` (`{}` is the candidate)
    #[serde(default = "default_preview_command")]
    pub preview_command: String,

    /// Exclusion globs for `select`
    #[serde(default = "default_select_excludes")]
    pub select_excludes: Vec<String>,

    /// Exclusion globs for `locate`
    #[serde(default = "default_locate_excludes")]
    pub locate_excludes: Vec<String>,

    /// Root searched by `locate` (defaults to the home directory)
    #[serde(default)]
    pub locate_root: Option<PathBuf>,

    /// Editor for `edit` (falls back to `$VISUAL`, `$EDITOR`, then `vi`)
    #[serde(default)]
    pub editor: Option<String>,

    /// Directory history file (defaults to the data directory)
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    /// Maximum number of history entries kept
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Log filter when `RUST_LOG` is unset (e.g. `debug`)
    #[serde(default)]
    pub log_level: Option<String>,
}

impl Default for NavpickConfig {
    fn default() -> Self {
        Self {
            show_hidden: false,
            quiet: false,
            finder: default_finder(),
            search_tool: SearchTool::default(),
            preview_command: default_preview_command(),
            select_excludes: default_select_excludes(),
            locate_excludes: default_locate_excludes(),
            locate_root: None,
            editor: None,
            history_file: None,
            history_limit: default_history_limit(),
            log_level: None,
        }
    }
}

impl NavpickConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("navpick").join("config.toml"))
    }

    /// Load configuration from the default location, creating it if missing
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the config file cannot be read, parsed, or created.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it doesn't exist
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read, parsed, or created.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            let default_config = Self::default();
            default_config.save_to(path)?;
            return Ok(default_config);
        }

        let settings = Config::builder()
            .add_source(File::from(path.to_path_buf()).format(FileFormat::Toml))
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings that deserialize but cannot work
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `search_tool` is not a file search tool.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.search_tool.lists_files() {
            return Err(ConfigError::Message(format!(
                "Invalid value for search_tool: '{}'. Use 'ripgrep' or 'fd'",
                self.search_tool.program()
            )));
        }
        Ok(())
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the parent directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Root for `locate`
    #[must_use]
    pub fn locate_root(&self) -> Option<PathBuf> {
        self.locate_root.clone().or_else(dirs::home_dir)
    }

    /// History file location
    #[must_use]
    pub fn history_file(&self) -> Option<PathBuf> {
        self.history_file
            .clone()
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("navpick").join("history")))
    }

    /// Editor command for `edit`
    #[must_use]
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("VISUAL").ok().filter(|v| !v.is_empty()))
            .or_else(|| std::env::var("EDITOR").ok().filter(|v| !v.is_empty()))
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Read a setting as text
    #[must_use]
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "show_hidden" => self.show_hidden.to_string(),
            "quiet" => self.quiet.to_string(),
            "finder" => self.finder.clone(),
            "search_tool" => match self.search_tool {
                SearchTool::Ripgrep => "ripgrep".to_string(),
                SearchTool::Fd => "fd".to_string(),
                SearchTool::Zoxide => "zoxide".to_string(),
            },
            "preview_command" => self.preview_command.clone(),
            "editor" => self.editor.clone().unwrap_or_default(),
            "history_limit" => self.history_limit.to_string(),
            "log_level" => self.log_level.clone().unwrap_or_default(),
            _ => return None,
        };
        Some(value)
    }

    /// Update a setting from text
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` for unknown keys or values that don't parse.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let parse_bool = |value: &str| {
            value.parse::<bool>().map_err(|_| {
                ConfigError::Message(format!(
                    "Invalid value for {key}: '{value}'. Use 'true' or 'false'"
                ))
            })
        };

        match key {
            "show_hidden" => self.show_hidden = parse_bool(value)?,
            "quiet" => self.quiet = parse_bool(value)?,
            "finder" => self.finder = value.to_string(),
            "search_tool" => {
                self.search_tool = match value {
                    "ripgrep" | "rg" => SearchTool::Ripgrep,
                    "fd" => SearchTool::Fd,
                    _ => {
                        return Err(ConfigError::Message(format!(
                            "Invalid value for search_tool: '{value}'. Use 'ripgrep' or 'fd'"
                        )));
                    }
                }
            }
            "preview_command" => self.preview_command = value.to_string(),
            "editor" => self.editor = Some(value.to_string()).filter(|v| !v.is_empty()),
            "history_limit" => {
                self.history_limit = value.parse().map_err(|_| {
                    ConfigError::Message(format!("Invalid value for history_limit: '{value}'"))
                })?;
            }
            "log_level" => self.log_level = Some(value.to_string()).filter(|v| !v.is_empty()),
            _ => {
                return Err(ConfigError::Message(format!(
                    "Unknown configuration key: '{key}'. Available keys: {}",
                    SETTABLE_KEYS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = NavpickConfig::default();
        assert!(!config.show_hidden);
        assert_eq!(config.finder, "fzf");
        assert_eq!(config.search_tool, SearchTool::Ripgrep);
        assert!(config.select_excludes.contains(&"__pycache__".to_string()));
        assert_eq!(config.locate_excludes, vec![".git", "node_modules", ".trash", ".Trash"]);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = NavpickConfig::load_from(&path).unwrap();

        assert!(path.exists());
        assert_eq!(config, NavpickConfig::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "show_hidden = true\nsearch_tool = \"fd\"\n").unwrap();

        let config = NavpickConfig::load_from(&path).unwrap();

        assert!(config.show_hidden);
        assert_eq!(config.search_tool, SearchTool::Fd);
        assert_eq!(config.finder, "fzf");
        assert_eq!(config.history_limit, 500);
    }

    #[test]
    fn test_load_rejects_zoxide_search_tool() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "search_tool = \"zoxide\"\n").unwrap();

        let err = NavpickConfig::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("search_tool"));
    }

    #[test]
    fn test_save_and_reload() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = NavpickConfig::default();
        config.set("editor", "nvim").unwrap();
        config.set("history_limit", "20").unwrap();
        config.save_to(&path).unwrap();

        let reloaded = NavpickConfig::load_from(&path).unwrap();
        assert_eq!(reloaded.editor.as_deref(), Some("nvim"));
        assert_eq!(reloaded.history_limit, 20);
    }

    #[test]
    fn test_set_and_get() {
        let mut config = NavpickConfig::default();

        config.set("show_hidden", "true").unwrap();
        assert_eq!(config.get("show_hidden").as_deref(), Some("true"));

        config.set("search_tool", "rg").unwrap();
        assert_eq!(config.get("search_tool").as_deref(), Some("ripgrep"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = NavpickConfig::default();
        assert!(config.set("show_hidden", "maybe").is_err());
        assert!(config.set("search_tool", "zoxide").is_err());
        assert!(config.set("history_limit", "-1").is_err());
        assert!(config.set("nope", "1").is_err());
        assert!(config.get("nope").is_none());
    }

    #[test]
    fn test_configured_editor_wins() {
        let config = NavpickConfig {
            editor: Some("hx".to_string()),
            ..NavpickConfig::default()
        };
        assert_eq!(config.editor(), "hx");
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = NavpickConfig {
            locate_root: Some(PathBuf::from("/srv")),
            history_file: Some(PathBuf::from("/tmp/hist")),
            ..NavpickConfig::default()
        };
        assert_eq!(config.locate_root(), Some(PathBuf::from("/srv")));
        assert_eq!(config.history_file(), Some(PathBuf::from("/tmp/hist")));
    }
}
