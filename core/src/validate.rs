//! Command definition validation.
//!
//! Catches definitions that could never be dispatched or parsed correctly,
//! such as empty names, names containing spaces (tokens are split on
//! spaces, so such a name never matches), and duplicate field names.
//!
//! # Examples
//!
//! ```
//! use slackbot_core::*;
//!
//! let ok = Command::new("repeat", |_| {})
//!     .with_options(OptionShape::new().with_field(OptionField::string("Message")));
//! assert!(validate_command(&ok).is_empty());
//!
//! let bad = Command::new("say hi", |_| {});
//! assert_eq!(
//!     validate_command(&bad),
//!     vec![ValidationError::WhitespaceInCommandName("say hi".into())]
//! );
//! ```

use std::collections::HashSet;

use thiserror::Error;

use crate::{Command, OptionShape};

/// Command validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Command name is empty or whitespace-only.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// Command name contains whitespace and can never match a token.
    #[error("command name cannot contain whitespace: {0:?}")]
    WhitespaceInCommandName(String),
    /// An option field has an empty name.
    #[error("option field name cannot be empty in command {0}")]
    EmptyFieldName(String),
    /// Two option fields share a name.
    #[error("duplicate option field in command {command}: {field}")]
    DuplicateField { command: String, field: String },
}

/// Validates a command definition.
///
/// Returns at most one error: validation stops at the first problem.
pub fn validate_command(command: &Command) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if command.name.trim().is_empty() {
        errors.push(ValidationError::EmptyCommandName);
        return errors;
    }

    if command.name.chars().any(char::is_whitespace) {
        errors.push(ValidationError::WhitespaceInCommandName(
            command.name.clone(),
        ));
        return errors;
    }

    if let Some(shape) = &command.option {
        errors.extend(validate_shape(&command.name, shape));
    }

    errors
}

fn validate_shape(command: &str, shape: &OptionShape) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for field in shape.fields() {
        if field.name.trim().is_empty() {
            errors.push(ValidationError::EmptyFieldName(command.to_string()));
            return errors;
        }
        if !seen.insert(field.name.as_str()) {
            errors.push(ValidationError::DuplicateField {
                command: command.to_string(),
                field: field.name.clone(),
            });
            return errors;
        }
    }

    errors
}
