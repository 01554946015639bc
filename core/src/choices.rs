//! Choice-set resolution and acceptance checks for option fields.
//!
//! Every configurable field resolves to an ordered list of textual choices:
//!
//! - string fields use their declared list;
//! - boolean fields are always `["false", "true"]`;
//! - integer fields synthesize `[default, "min:<lo>", "max:<hi>"]`, where the
//!   default is listed only when it lies inside the resolved bounds.
//!
//! The same list feeds both [`is_acceptable`] and the verbose help output.

use crate::{FieldType, OptionField};

const MIN_PREFIX: &str = "min:";
const MAX_PREFIX: &str = "max:";

/// Effective `[min, max]` window of an integer field.
///
/// Starts at the full `i32` range. The declared `min` and then `max` each
/// narrow it only if they fall inside the window in force at that point;
/// anything else is ignored.
///
/// # Examples
///
/// ```
/// use slackbot_core::{IntegerBounds, OptionField};
///
/// let field = OptionField::integer("Count").with_min(-20).with_max(100);
/// assert_eq!(IntegerBounds::resolve(&field), IntegerBounds { min: -20, max: 100 });
///
/// // A max below the already-narrowed min is ignored.
/// let field = OptionField::integer("Count").with_min(5).with_max(1);
/// assert_eq!(IntegerBounds::resolve(&field), IntegerBounds { min: 5, max: i32::MAX });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerBounds {
    pub min: i32,
    pub max: i32,
}

impl Default for IntegerBounds {
    fn default() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
        }
    }
}

impl IntegerBounds {
    /// Resolves the window declared on `field`.
    pub fn resolve(field: &OptionField) -> Self {
        let mut bounds = Self::default();
        if let Some(min) = field.min.and_then(|v| bounds.narrowing(v)) {
            bounds.min = min;
        }
        if let Some(max) = field.max.and_then(|v| bounds.narrowing(v)) {
            bounds.max = max;
        }
        bounds
    }

    /// Returns `true` if `value` lies inside the window.
    pub fn contains(&self, value: i64) -> bool {
        i64::from(self.min) <= value && value <= i64::from(self.max)
    }

    fn narrowing(&self, value: i64) -> Option<i32> {
        let value = i32::try_from(value).ok()?;
        self.contains(i64::from(value)).then_some(value)
    }
}

/// Resolves the ordered choice set of a field.
///
/// Auxiliary fields resolve to an empty set.
///
/// # Examples
///
/// ```
/// use slackbot_core::{OptionField, resolve_choices};
///
/// let count = OptionField::integer("Count").with_default(1).with_min(-20).with_max(100);
/// assert_eq!(resolve_choices(&count), vec!["1", "min:-20", "max:100"]);
///
/// let loud = OptionField::boolean("Loud");
/// assert_eq!(resolve_choices(&loud), vec!["false", "true"]);
/// ```
pub fn resolve_choices(field: &OptionField) -> Vec<String> {
    match field.field_type {
        FieldType::String => field.choices.clone(),
        FieldType::Boolean => vec!["false".to_string(), "true".to_string()],
        FieldType::Integer => {
            let bounds = IntegerBounds::resolve(field);
            let mut choices = Vec::with_capacity(3);
            if let Some(default) = field.default.as_deref() {
                if default
                    .parse::<i32>()
                    .is_ok_and(|v| bounds.contains(i64::from(v)))
                {
                    choices.push(default.to_string());
                }
            }
            choices.push(format!("{MIN_PREFIX}{}", bounds.min));
            choices.push(format!("{MAX_PREFIX}{}", bounds.max));
            choices
        }
        FieldType::Auxiliary => Vec::new(),
    }
}

/// Checks whether `candidate` satisfies the field's choice constraint.
///
/// The empty string is never acceptable. String fields without a declared
/// choice list accept any other value.
///
/// # Examples
///
/// ```
/// use slackbot_core::{OptionField, is_acceptable};
///
/// let count = OptionField::integer("Count").with_min(-20).with_max(100);
/// assert!(is_acceptable(&count, "100"));
/// assert!(!is_acceptable(&count, "101"));
/// assert!(!is_acceptable(&count, "ten"));
///
/// let font = OptionField::string("Font").with_choices(["thin", "bold"]);
/// assert!(is_acceptable(&font, "bold"));
/// assert!(!is_acceptable(&font, "italic"));
/// assert!(!is_acceptable(&font, ""));
/// ```
pub fn is_acceptable(field: &OptionField, candidate: &str) -> bool {
    if candidate.is_empty() {
        return false;
    }

    match field.field_type {
        FieldType::String if field.choices.is_empty() => true,
        FieldType::String | FieldType::Boolean => {
            resolve_choices(field).iter().any(|c| c == candidate)
        }
        FieldType::Integer => {
            let Ok(value) = candidate.parse::<i32>() else {
                return false;
            };
            let value = i64::from(value);
            resolve_choices(field).iter().all(|choice| {
                if let Some(min) = choice.strip_prefix(MIN_PREFIX) {
                    min.parse::<i64>().is_ok_and(|min| min <= value)
                } else if let Some(max) = choice.strip_prefix(MAX_PREFIX) {
                    max.parse::<i64>().is_ok_and(|max| value <= max)
                } else {
                    true
                }
            })
        }
        FieldType::Auxiliary => false,
    }
}
