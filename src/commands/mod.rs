//! Command implementations
//!
//! Each command is a module with an `execute` function taking the host, the
//! shared [`CommandContext`] and the parsed [`Invocation`]. Commands are
//! looked up by [`CommandId`] in a [`CommandRegistry`].

pub mod edit;
pub mod history;
pub mod jump;
pub mod locate;
pub mod select;

use crate::Result;
use crate::config::NavpickConfig;
use crate::host::Host;
use crate::process::ProcessRunner;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

/// Identifier of a navigation command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    Select,
    Locate,
    History,
    Record,
    Jump,
    Edit,
}

impl CommandId {
    /// Every command, in help order
    pub const ALL: [Self; 6] = [
        Self::Select,
        Self::Locate,
        Self::History,
        Self::Record,
        Self::Jump,
        Self::Edit,
    ];

    /// Command name as typed on the command line
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Select => "select",
            Self::Locate => "locate",
            Self::History => "history",
            Self::Record => "record",
            Self::Jump => "jump",
            Self::Edit => "edit",
        }
    }

    /// Look up a command by name
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.name() == name)
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Arguments common to all navigation commands
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Only offer directories
    pub dirs_only: bool,
    /// Hidden-entry override, `None` defers to the host settings
    pub hidden: Option<bool>,
    /// Search root or target directory
    pub root: Option<PathBuf>,
    /// Free-form positional arguments
    pub args: Vec<String>,
}

/// Shared dependencies handed to every command
pub struct CommandContext<'a> {
    pub config: &'a NavpickConfig,
    pub runner: &'a dyn ProcessRunner,
}

/// Signature of a command handler
pub type Handler = fn(&mut dyn Host, &CommandContext<'_>, &Invocation) -> Result<()>;

/// Explicit mapping from command identifiers to handlers
pub struct CommandRegistry {
    handlers: HashMap<CommandId, Handler>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRegistry {
    /// Registry with every built-in command
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register(CommandId::Select, select::execute);
        registry.register(CommandId::Locate, locate::execute);
        registry.register(CommandId::History, history::execute);
        registry.register(CommandId::Record, history::record);
        registry.register(CommandId::Jump, jump::execute);
        registry.register(CommandId::Edit, edit::execute);
        registry
    }

    /// Registry with no commands
    #[must_use]
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Add or replace a handler
    pub fn register(&mut self, id: CommandId, handler: Handler) {
        self.handlers.insert(id, handler);
    }

    /// Handler for `id`
    #[must_use]
    pub fn get(&self, id: CommandId) -> Option<Handler> {
        self.handlers.get(&id).copied()
    }

    /// Names of registered commands, in help order
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        CommandId::ALL
            .into_iter()
            .filter(|id| self.handlers.contains_key(id))
            .map(CommandId::name)
            .collect()
    }

    /// Run the handler registered for `id`
    ///
    /// # Errors
    ///
    /// Returns `NavpickError::InvalidInput` if nothing is registered for
    /// `id`, or whatever the handler returns.
    pub fn run(
        &self,
        id: CommandId,
        host: &mut dyn Host,
        ctx: &CommandContext<'_>,
        invocation: &Invocation,
    ) -> Result<()> {
        let handler = self.get(id).ok_or_else(|| {
            crate::NavpickError::InvalidInput(format!("Unknown command: '{id}'"))
        })?;
        tracing::debug!(command = %id, ?invocation, "running command");
        handler(host, ctx, invocation)
    }
}
