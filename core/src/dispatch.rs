//! Command dispatch.

use std::panic::{AssertUnwindSafe, catch_unwind};

use tracing::{debug, error, warn};

use crate::parser::parse_options;
use crate::{CommandRegistry, Event, Invocation, Messenger};

/// Runs the command named by `tokens[0]`, if there is one.
///
/// Returns `false` without side effects when the first token is not a
/// registered command, so the caller can fall back to generic message
/// handling. A recognized command always returns `true`: option errors are
/// replied in thread with the usage text, and a panicking handler is caught
/// and logged so it cannot take later dispatches down with it.
///
/// # Examples
///
/// ```
/// use slackbot_core::{CommandRegistry, Event, RecordingMessenger, tokenize, try_execute};
///
/// let registry = CommandRegistry::with_builtins();
/// let messenger = RecordingMessenger::new();
/// let event = Event::new().with("channel", "C1").with("text", "ping");
///
/// assert!(try_execute(&registry, &messenger, &event, &tokenize(event.text())));
/// assert_eq!(messenger.sent()[0].text(), "pong! :table_tennis_paddle_and_ball:");
///
/// assert!(!try_execute(&registry, &messenger, &event, &tokenize("hello there")));
/// ```
pub fn try_execute(
    registry: &CommandRegistry,
    messenger: &dyn Messenger,
    event: &Event,
    tokens: &[String],
) -> bool {
    let Some((name, args)) = tokens.split_first() else {
        return false;
    };
    let Some(command) = registry.get(name) else {
        return false;
    };

    let options = match parse_options(command, args) {
        Ok(options) => options,
        Err(err) => {
            debug!(command = %name, field = err.field(), "Option parsing failed");
            let result =
                messenger.reply_in_thread(event.channel(), event.thread_timestamp(), &err.to_string());
            if let Err(send_err) = result {
                warn!(command = %name, error = %send_err, "Usage reply failed");
            }
            return true;
        }
    };

    debug!(command = %name, options = options.len(), "Executing command");
    let invocation = Invocation {
        event,
        options: &options,
        messenger,
        registry,
    };
    if catch_unwind(AssertUnwindSafe(|| command.execute(&invocation))).is_err() {
        error!(command = %name, "Command handler panicked");
    }

    true
}
