//! Built-in `help` and `ping` commands.

use crate::help::render_help;
use crate::{Command, OptionField, OptionShape};

/// Name of the built-in help command.
pub const HELP_COMMAND: &str = "help";
/// Name of the built-in ping command.
pub const PING_COMMAND: &str = "ping";
/// Option of the help command selecting verbose output.
pub const HELP_DESCRIPTION_OPTION: &str = "Description";
/// Reply sent by `ping`.
pub const PONG_REPLY: &str = "pong! :table_tennis_paddle_and_ball:";

/// Builds the help command.
///
/// `verbose_default` becomes the default of its `Description` option, so the
/// host picks the default and users can still type `help true` or
/// `help false`.
pub fn help_command(verbose_default: bool) -> Command {
    Command::new(HELP_COMMAND, |inv| {
        let verbose = inv.options.get_str(HELP_DESCRIPTION_OPTION) == Some("true");

        let mut help = String::new();
        for name in inv.registry.command_names() {
            if let Some(command) = inv.registry.get(name) {
                help.push_str(&render_help(command, verbose));
                help.push('\n');
            }
        }
        inv.post_ephemeral(&help);
    })
    .with_help("Displays all of the help commands.")
    .with_options(help_options(verbose_default))
}

fn help_options(verbose_default: bool) -> OptionShape {
    OptionShape::new().with_field(
        OptionField::string(HELP_DESCRIPTION_OPTION)
            .with_default(verbose_default)
            .with_choices(["false", "true"]),
    )
}

/// Builds the ping command.
pub fn ping_command() -> Command {
    Command::new(PING_COMMAND, |inv| inv.reply(PONG_REPLY)).with_help("Reply pong.")
}
