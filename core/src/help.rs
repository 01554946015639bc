//! Usage text rendering.
//!
//! Help is rendered from the same [`OptionShape`](crate::OptionShape) that
//! drives parsing, using the choice sets from [`resolve_choices`]:
//!
//! ```text
//! simple:  repeat [Message] [Count(*1*)] [Font(*thin*)]
//! verbose: repeat [Message] [Count(*1*,min:1,max:10)] [Font(*thin*,bold,italic)] : *_Repeat input message._*
//! ```

use crate::choices::resolve_choices;
use crate::markup::{bold, italic, parenthesize};
use crate::{Command, OptionField};

/// Renders the usage line of `command`.
///
/// A command without an option shape renders as its bare name whatever the
/// verbosity. Otherwise each configurable field renders as a bracketed
/// clause; verbose mode lists the full choice set with the default
/// highlighted and appends the help message.
///
/// # Examples
///
/// ```
/// use slackbot_core::{Command, OptionField, OptionShape, render_help};
///
/// let command = Command::new("test", |_| {})
///     .with_help("message")
///     .with_options(OptionShape::new().with_field(OptionField::boolean("Desc").with_default(true)));
///
/// assert_eq!(render_help(&command, false), "test [Desc(*true*)]");
/// assert_eq!(render_help(&command, true), "test [Desc(false,*true*)] : *_message_*");
/// ```
pub fn render_help(command: &Command, verbose: bool) -> String {
    let Some(shape) = &command.option else {
        return command.name.clone();
    };

    let clauses: Vec<String> = shape
        .configurable()
        .map(|field| render_field(field, verbose))
        .collect();

    let mut help = command.name.clone();
    if !clauses.is_empty() {
        help.push(' ');
        help.push_str(&clauses.join(" "));
    }
    if verbose && !command.help_message.is_empty() {
        help.push_str(" : ");
        help.push_str(&bold(&italic(&command.help_message)));
    }
    help
}

fn render_field(field: &OptionField, verbose: bool) -> String {
    let default = field.default.as_deref().unwrap_or_default();
    let choices = if verbose {
        resolve_choices(field)
    } else {
        Vec::new()
    };

    let value = if choices.is_empty() {
        bold(default)
    } else {
        highlight_default(&choices, default)
    };

    format!("[{}{}]", field.name, parenthesize(&value))
}

/// Joins `choices` with commas, bolding the first entry equal to `default`.
fn highlight_default(choices: &[String], default: &str) -> String {
    let mut highlighted = default.is_empty();
    choices
        .iter()
        .map(|choice| {
            if !highlighted && choice == default {
                highlighted = true;
                bold(choice)
            } else {
                choice.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}
