//! Conversion of raw tokens into typed option values.

use crate::error::TypeMismatch;
use crate::{FieldType, OptionField, OptionValue};

/// Converts `raw` to the native type of `field`.
///
/// Returns `Ok(None)` for auxiliary fields, which never receive a value.
///
/// # Errors
///
/// Returns [`TypeMismatch`] when a boolean is not exactly `"true"` or
/// `"false"`, or when an integer is not a base-10 `i32`.
///
/// # Examples
///
/// ```
/// use slackbot_core::{OptionField, OptionValue, assign};
///
/// let count = OptionField::integer("Count");
/// assert_eq!(assign(&count, "42").unwrap(), Some(OptionValue::Integer(42)));
/// assert!(assign(&count, "forty-two").is_err());
///
/// let note = OptionField::auxiliary("Note");
/// assert_eq!(assign(&note, "ignored").unwrap(), None);
/// ```
pub fn assign(field: &OptionField, raw: &str) -> Result<Option<OptionValue>, TypeMismatch> {
    let mismatch = || TypeMismatch {
        field: field.name.clone(),
        value: raw.to_string(),
        expected: field.field_type,
    };

    let value = match field.field_type {
        FieldType::String => OptionValue::String(raw.to_string()),
        FieldType::Boolean => match raw {
            "true" => OptionValue::Boolean(true),
            "false" => OptionValue::Boolean(false),
            _ => return Err(mismatch()),
        },
        FieldType::Integer => OptionValue::Integer(raw.parse().map_err(|_| mismatch())?),
        FieldType::Auxiliary => return Ok(None),
    };

    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_is_verbatim() {
        let field = OptionField::string("String").with_choices(["hoge"]);
        assert_eq!(
            assign(&field, "fuga").unwrap(),
            Some(OptionValue::String("fuga".into()))
        );
    }

    #[test]
    fn test_boolean() {
        let field = OptionField::boolean("Bool");
        assert_eq!(
            assign(&field, "true").unwrap(),
            Some(OptionValue::Boolean(true))
        );
        assert_eq!(
            assign(&field, "false").unwrap(),
            Some(OptionValue::Boolean(false))
        );
    }

    #[test]
    fn test_boolean_rejects_non_canonical() {
        let field = OptionField::boolean("Bool");
        for raw in ["hoge", "True", "1", "t"] {
            let err = assign(&field, raw).unwrap_err();
            assert_eq!(err.expected, FieldType::Boolean);
            assert_eq!(err.value, raw);
        }
    }

    #[test]
    fn test_integer() {
        let field = OptionField::integer("Int32");
        assert_eq!(assign(&field, "1").unwrap(), Some(OptionValue::Integer(1)));
        assert_eq!(
            assign(&field, "-2147483648").unwrap(),
            Some(OptionValue::Integer(i32::MIN))
        );
    }

    #[test]
    fn test_integer_parse_error() {
        let field = OptionField::integer("Int32");
        let err = assign(&field, "hoge").unwrap_err();
        assert_eq!(err.field, "Int32");
        assert_eq!(
            err.to_string(),
            r#"cannot convert "hoge" to integer for option Int32"#
        );
        assert!(assign(&field, "2147483648").is_err());
    }

    #[test]
    fn test_auxiliary_is_skipped() {
        let field = OptionField::auxiliary("Interface");
        assert_eq!(assign(&field, "").unwrap(), None);
    }
}
