//! Command registry.
//!
//! [`CommandRegistry`] maps command names to definitions and remembers the
//! order names were registered in, which is the order `help` lists them.
//!
//! Re-registering a name replaces the definition but appends the name to
//! the ordered list again, so `help` shows the newest definition once per
//! registration:
//!
//! ```
//! use slackbot_core::{Command, CommandRegistry};
//!
//! let mut registry = CommandRegistry::new();
//! registry.add(Command::new("deploy", |_| {})).unwrap();
//! registry.add(Command::new("deploy", |_| {}).with_help("v2")).unwrap();
//!
//! assert_eq!(registry.len(), 1);
//! assert_eq!(registry.command_names(), ["deploy", "deploy"]);
//! assert_eq!(registry.get("deploy").unwrap().help_message, "v2");
//! ```

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::builtins::{HELP_COMMAND, help_command, ping_command};
use crate::validate::{ValidationError, validate_command};
use crate::{Command, CommandSummary};

/// Name-to-command mapping with registration order.
///
/// The registry is an explicit value owned by the host application.
/// Mutation takes `&mut self`; dispatch only needs `&self`.
///
/// # Examples
///
/// ```
/// use slackbot_core::{Command, CommandRegistry};
///
/// let mut registry = CommandRegistry::new();
/// registry.setup([Command::new("deploy", |_| {})]).unwrap();
///
/// assert_eq!(registry.command_names(), ["help", "ping", "deploy"]);
/// assert!(registry.get("ping").is_some());
/// ```
#[derive(Debug)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
    order: Vec<String>,
    help_verbose: bool,
    builtin_help: bool,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self {
            commands: HashMap::new(),
            order: Vec::new(),
            help_verbose: true,
            builtin_help: false,
        }
    }
}

impl CommandRegistry {
    /// Creates an empty registry (no built-ins).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding only the built-in commands.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.install_builtins();
        registry
    }

    /// Resets the registry, installs `help` and `ping`, then adds `custom`
    /// in order.
    ///
    /// # Errors
    ///
    /// Stops at the first invalid custom command; commands before it stay
    /// registered.
    pub fn setup<I>(&mut self, custom: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = Command>,
    {
        self.clear();
        self.install_builtins();
        for command in custom {
            self.add(command)?;
        }
        Ok(())
    }

    /// Registers a command; a later registration of the same name wins.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] of the definition, which is
    /// then not registered.
    pub fn add(&mut self, command: Command) -> Result<(), ValidationError> {
        if let Some(err) = validate_command(&command).into_iter().next() {
            warn!(command = %command.name, error = %err, "Rejected command definition");
            return Err(err);
        }
        if command.name == HELP_COMMAND {
            self.builtin_help = false;
        }
        self.insert(command);
        Ok(())
    }

    /// Removes every command. The default help verbosity is kept.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.order.clear();
        self.builtin_help = false;
    }

    /// Chooses whether `help` lists descriptions when the user gives no
    /// argument.
    pub fn set_default_help_verbosity(&mut self, verbose: bool) {
        self.help_verbose = verbose;
        if self.builtin_help {
            let help = help_command(verbose);
            if let Some(slot) = self.commands.get_mut(HELP_COMMAND) {
                *slot = help;
            }
        }
    }

    /// Current default verbosity of `help`.
    pub fn default_help_verbosity(&self) -> bool {
        self.help_verbose
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registered names in registration order, duplicates included.
    pub fn command_names(&self) -> &[String] {
        &self.order
    }

    /// Distinct commands in first-registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command> {
        self.order
            .iter()
            .enumerate()
            .filter(|(index, name)| !self.order[..*index].contains(*name))
            .filter_map(|(_, name)| self.commands.get(name))
    }

    /// Serializable summaries of [`commands`](Self::commands).
    pub fn summaries(&self) -> Vec<CommandSummary> {
        self.commands().map(Command::summary).collect()
    }

    /// Number of distinct commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn install_builtins(&mut self) {
        self.insert(help_command(self.help_verbose));
        self.insert(ping_command());
        self.builtin_help = true;
    }

    fn insert(&mut self, command: Command) {
        debug!(command = %command.name, "Registering command");
        self.order.push(command.name.clone());
        self.commands.insert(command.name.clone(), command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtins::HELP_DESCRIPTION_OPTION;
    use crate::parse_options;

    #[test]
    fn test_setup_empty_installs_builtins() {
        let mut registry = CommandRegistry::new();
        registry.setup(Vec::new()).unwrap();

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("help").unwrap().name, "help");
        assert_eq!(registry.get("ping").unwrap().name, "ping");
        assert_eq!(registry.command_names(), ["help", "ping"]);
    }

    #[test]
    fn test_setup_appends_custom_after_builtins() {
        let mut registry = CommandRegistry::new();
        registry.setup([Command::new("test", |_| {})]).unwrap();

        assert_eq!(registry.len(), 3);
        assert_eq!(registry.get("test").unwrap().name, "test");
        assert_eq!(registry.command_names()[2], "test");
    }

    #[test]
    fn test_setup_is_idempotent_after_clear() {
        let mut registry = CommandRegistry::new();
        for _ in 0..2 {
            registry.clear();
            registry.setup(Vec::new()).unwrap();
            assert_eq!(registry.command_names(), ["help", "ping"]);
            assert_eq!(registry.len(), 2);
        }
    }

    #[test]
    fn test_setup_resets_previous_commands() {
        let mut registry = CommandRegistry::new();
        registry.setup([Command::new("old", |_| {})]).unwrap();
        registry.setup([Command::new("new", |_| {})]).unwrap();

        assert!(!registry.contains("old"));
        assert_eq!(registry.command_names(), ["help", "ping", "new"]);
    }

    #[test]
    fn test_add_to_empty_registry() {
        let mut registry = CommandRegistry::new();
        registry.add(Command::new("test", |_| {})).unwrap();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("test").unwrap().name, "test");
    }

    #[test]
    fn test_add_rejects_invalid_definition() {
        let mut registry = CommandRegistry::new();
        let err = registry.add(Command::new("", |_| {})).unwrap_err();

        assert_eq!(err, ValidationError::EmptyCommandName);
        assert!(registry.is_empty());
        assert!(registry.command_names().is_empty());
    }

    #[test]
    fn test_duplicate_name_keeps_stale_order_entry() {
        let mut registry = CommandRegistry::new();
        registry
            .setup([
                Command::new("a", |_| {}).with_help("first"),
                Command::new("b", |_| {}),
                Command::new("a", |_| {}).with_help("second"),
            ])
            .unwrap();

        assert_eq!(registry.command_names(), ["help", "ping", "a", "b", "a"]);
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.get("a").unwrap().help_message, "second");

        let distinct: Vec<&str> = registry.commands().map(|c| c.name.as_str()).collect();
        assert_eq!(distinct, ["help", "ping", "a", "b"]);
    }

    #[test]
    fn test_clear_empties_everything() {
        let mut registry = CommandRegistry::with_builtins();
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.command_names().is_empty());
    }

    #[test]
    fn test_help_verbosity_changes_default() {
        let mut registry = CommandRegistry::with_builtins();

        registry.set_default_help_verbosity(false);
        let options = parse_options(registry.get("help").unwrap(), &[]).unwrap();
        assert_eq!(options.get_str(HELP_DESCRIPTION_OPTION), Some("false"));

        registry.set_default_help_verbosity(true);
        let options = parse_options(registry.get("help").unwrap(), &[]).unwrap();
        assert_eq!(options.get_str(HELP_DESCRIPTION_OPTION), Some("true"));

        assert_eq!(registry.command_names(), ["help", "ping"]);
    }

    #[test]
    fn test_help_verbosity_survives_setup() {
        let mut registry = CommandRegistry::new();
        registry.set_default_help_verbosity(false);
        registry.setup(Vec::new()).unwrap();

        let options = parse_options(registry.get("help").unwrap(), &[]).unwrap();
        assert_eq!(options.get_str(HELP_DESCRIPTION_OPTION), Some("false"));
    }

    #[test]
    fn test_help_verbosity_leaves_custom_help_alone() {
        let mut registry = CommandRegistry::with_builtins();
        registry
            .add(Command::new("help", |_| {}).with_help("custom"))
            .unwrap();
        registry.set_default_help_verbosity(false);

        let help = registry.get("help").unwrap();
        assert_eq!(help.help_message, "custom");
        assert!(help.option.is_none());
    }
}
