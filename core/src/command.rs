//! Command definitions and the context handed to command handlers.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use tracing::warn;

use crate::{CommandRegistry, Event, Messenger, OptionShape, ParsedOptions};

/// Handler invoked with the parsed options of a matched command.
pub type Handler = Arc<dyn Fn(&Invocation<'_>) + Send + Sync>;

/// A named, dispatchable chat action.
///
/// # Examples
///
/// ```
/// use slackbot_core::{Command, OptionField, OptionShape};
///
/// let repeat = Command::new("repeat", |inv| {
///     let message = inv.options.get_str("Message").unwrap_or_default();
///     inv.reply(message);
/// })
/// .with_help("Repeat input message.")
/// .with_options(OptionShape::new().with_field(OptionField::string("Message")));
///
/// assert_eq!(repeat.name, "repeat");
/// assert!(repeat.option.is_some());
/// ```
#[derive(Clone)]
pub struct Command {
    /// First token users type.
    pub name: String,
    /// Free text shown in verbose help.
    pub help_message: String,
    /// Positional arguments, if the command takes any.
    pub option: Option<OptionShape>,
    handler: Handler,
}

impl Command {
    /// Creates a command without help text or options.
    pub fn new<F>(name: &str, handler: F) -> Self
    where
        F: Fn(&Invocation<'_>) + Send + Sync + 'static,
    {
        Self {
            name: name.to_string(),
            help_message: String::new(),
            option: None,
            handler: Arc::new(handler),
        }
    }

    /// Sets the help message.
    pub fn with_help(mut self, message: &str) -> Self {
        self.help_message = message.to_string();
        self
    }

    /// Sets the option shape.
    pub fn with_options(mut self, shape: OptionShape) -> Self {
        self.option = Some(shape);
        self
    }

    /// Runs the handler.
    pub fn execute(&self, invocation: &Invocation<'_>) {
        (self.handler)(invocation)
    }

    /// Serializable description of the command.
    pub fn summary(&self) -> CommandSummary {
        CommandSummary {
            name: self.name.clone(),
            help_message: self.help_message.clone(),
            options: self.option.clone(),
        }
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("help_message", &self.help_message)
            .field("option", &self.option)
            .finish_non_exhaustive()
    }
}

/// Serializable view of a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSummary {
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub help_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionShape>,
}

/// Everything a handler sees for one dispatch.
pub struct Invocation<'a> {
    /// The triggering event.
    pub event: &'a Event,
    /// Options parsed for this call.
    pub options: &'a ParsedOptions,
    /// Outbound channel.
    pub messenger: &'a dyn Messenger,
    /// Registry the command was found in.
    pub registry: &'a CommandRegistry,
}

impl Invocation<'_> {
    /// Replies in the event's thread.
    pub fn reply(&self, text: &str) {
        let result = self.messenger.reply_in_thread(
            self.event.channel(),
            self.event.thread_timestamp(),
            text,
        );
        if let Err(err) = result {
            warn!(channel = self.event.channel(), error = %err, "Reply failed");
        }
    }

    /// Posts a message only the triggering user can see.
    pub fn post_ephemeral(&self, text: &str) {
        let result =
            self.messenger
                .post_ephemeral(self.event.channel(), self.event.user(), text);
        if let Err(err) = result {
            warn!(channel = self.event.channel(), error = %err, "Ephemeral post failed");
        }
    }

    /// Posts a message to the event's channel.
    pub fn post_message(&self, text: &str) {
        if let Err(err) = self.messenger.post_message(self.event.channel(), text) {
            warn!(channel = self.event.channel(), error = %err, "Post failed");
        }
    }
}
