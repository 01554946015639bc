//! Positional option parsing.

use tracing::debug;

use crate::choices::is_acceptable;
use crate::coerce::assign;
use crate::error::OptionError;
use crate::help::render_help;
use crate::{Command, ParsedOptions};

/// Parses `tokens` against the option shape of `command`.
///
/// Configurable fields consume tokens in declaration order; a missing token
/// falls back to the field's default, or `""` when there is none. Extra
/// trailing tokens are ignored. A command without an option shape yields an
/// empty [`ParsedOptions`].
///
/// # Errors
///
/// Parsing stops at the first failing field:
///
/// - [`OptionError::Usage`] when the candidate is empty or outside the
///   field's choice set;
/// - [`OptionError::TypeMismatch`] when an accepted candidate cannot be
///   coerced.
///
/// Both render as `"option error."` followed by the verbose help.
///
/// # Examples
///
/// ```
/// use slackbot_core::{Command, OptionField, OptionShape, parse_options};
///
/// let command = Command::new("test", |_| {}).with_options(
///     OptionShape::new().with_field(
///         OptionField::string("Desc").with_default("true").with_choices(["false", "true"]),
///     ),
/// );
///
/// let options = parse_options(&command, &[]).unwrap();
/// assert_eq!(options.get_str("Desc"), Some("true"));
///
/// let err = parse_options(&command, &["invalid".to_string()]).unwrap_err();
/// assert!(err.to_string().starts_with("option error.\ntest [Desc(false,*true*)]"));
/// ```
pub fn parse_options(command: &Command, tokens: &[String]) -> Result<ParsedOptions, OptionError> {
    let mut options = ParsedOptions::new();
    let Some(shape) = &command.option else {
        return Ok(options);
    };

    for (index, field) in shape.configurable().enumerate() {
        let candidate = tokens
            .get(index)
            .map(String::as_str)
            .or(field.default.as_deref())
            .unwrap_or_default();

        if !is_acceptable(field, candidate) {
            debug!(
                command = %command.name,
                field = %field.name,
                value = candidate,
                "Option rejected"
            );
            return Err(OptionError::Usage {
                field: field.name.clone(),
                value: candidate.to_string(),
                help: render_help(command, true),
            });
        }

        match assign(field, candidate) {
            Ok(Some(value)) => options.insert(&field.name, value),
            Ok(None) => {}
            Err(source) => {
                return Err(OptionError::TypeMismatch {
                    source,
                    help: render_help(command, true),
                });
            }
        }
    }

    Ok(options)
}
