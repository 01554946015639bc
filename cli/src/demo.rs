//! Demo commands registered by `slackbot-local`.

use slackbot_core::markup::{bold, italic};
use slackbot_core::{Command, OptionField, OptionShape};

/// `repeat <Message> [Count] [Font]`: replies with `Message` repeated
/// `Count` times, optionally styled.
pub fn repeat_command() -> Command {
    Command::new("repeat", |inv| {
        let message = inv.options.get_str("Message").unwrap_or_default();
        let count = inv.options.get_int("Count").unwrap_or(1).max(0) as usize;
        let text = message.repeat(count);

        let text = match inv.options.get_str("Font") {
            Some("bold") => bold(&text),
            Some("italic") => italic(&text),
            _ => text,
        };
        inv.reply(&text);
    })
    .with_help("Repeat input message.")
    .with_options(
        OptionShape::new()
            .with_field(OptionField::string("Message"))
            .with_field(
                OptionField::integer("Count")
                    .with_default(1)
                    .with_min(1)
                    .with_max(10),
            )
            .with_field(
                OptionField::string("Font")
                    .with_default("thin")
                    .with_choices(["thin", "bold", "italic"]),
            ),
    )
}

/// All demo commands, in registration order.
pub fn commands() -> Vec<Command> {
    vec![repeat_command()]
}
