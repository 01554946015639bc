//! Error types for option parsing and outbound messaging.

use thiserror::Error;

use crate::FieldType;

/// A raw value could not be converted to its field's declared type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot convert {value:?} to {expected} for option {field}")]
pub struct TypeMismatch {
    /// Name of the field being assigned.
    pub field: String,
    /// The rejected raw value.
    pub value: String,
    /// The field's declared type.
    pub expected: FieldType,
}

/// Option parsing failures.
///
/// Both variants render the same user-facing text: `"option error."`
/// followed by the command's verbose help, so the message can be sent back
/// to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionError {
    /// A supplied or defaulted value failed its choice or range constraint.
    #[error("option error.\n{help}")]
    Usage {
        field: String,
        value: String,
        help: String,
    },
    /// An accepted value could not be coerced to the declared type.
    #[error("option error.\n{help}")]
    TypeMismatch {
        #[source]
        source: TypeMismatch,
        help: String,
    },
}

impl OptionError {
    /// Name of the field that failed.
    pub fn field(&self) -> &str {
        match self {
            OptionError::Usage { field, .. } => field,
            OptionError::TypeMismatch { source, .. } => &source.field,
        }
    }
}

/// An outbound message could not be delivered.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to send message: {0}")]
pub struct SendError(pub String);
