//! Command registry and option-parsing engine for Slack chat-ops bots.
//!
//! Commands are declared as a name, a help message, a handler and an
//! optional [`OptionShape`] describing positional arguments. From that one
//! declaration the crate derives:
//!
//! - choice sets and acceptance checks ([`resolve_choices`], [`is_acceptable`]);
//! - typed values ([`assign`]) and a populated [`ParsedOptions`]
//!   ([`parse_options`]);
//! - usage text in simple and verbose form ([`render_help`]).
//!
//! [`CommandRegistry`] holds the commands (always including the built-in
//! `help` and `ping`), and [`try_execute`] dispatches tokenized message text
//! against it, replying through a [`Messenger`].
//!
//! # Example
//!
//! ```
//! use slackbot_core::*;
//!
//! let repeat = Command::new("repeat", |inv| {
//!     let message = inv.options.get_str("Message").unwrap_or_default();
//!     let count = inv.options.get_int("Count").unwrap_or(1);
//!     inv.reply(&message.repeat(count as usize));
//! })
//! .with_help("Repeat input message.")
//! .with_options(
//!     OptionShape::new()
//!         .with_field(OptionField::string("Message"))
//!         .with_field(OptionField::integer("Count").with_default(1).with_min(1).with_max(10)),
//! );
//!
//! let mut registry = CommandRegistry::new();
//! registry.setup([repeat]).unwrap();
//!
//! let messenger = RecordingMessenger::new();
//! let event = Event::new().with("channel", "C1").with("text", "repeat ha 3");
//! assert!(try_execute(&registry, &messenger, &event, &tokenize(event.text())));
//! assert_eq!(messenger.sent()[0].text(), "hahaha");
//! ```

pub mod builtins;
mod choices;
mod coerce;
mod command;
mod dispatch;
mod error;
mod event;
mod help;
pub mod markup;
mod messenger;
mod parser;
mod registry;
mod types;
mod validate;

pub use choices::{IntegerBounds, is_acceptable, resolve_choices};
pub use coerce::assign;
pub use command::{Command, CommandSummary, Handler, Invocation};
pub use dispatch::try_execute;
pub use error::{OptionError, SendError, TypeMismatch};
pub use event::{Event, tokenize};
pub use help::render_help;
pub use messenger::{Messenger, Outbound, RecordingMessenger};
pub use parser::parse_options;
pub use registry::CommandRegistry;
pub use types::*;
pub use validate::{ValidationError, validate_command};
