//! Option schema type definitions.
//!
//! A command's positional arguments are declared as an [`OptionShape`]: an
//! ordered list of [`OptionField`] descriptors built by the command author.
//! The shape drives both parsing and help rendering, so the two never drift
//! apart. Shapes serialize with [`serde`] so they can be listed or stored
//! alongside bot configuration.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Native type of an option field.
///
/// # Examples
///
/// ```
/// use slackbot_core::FieldType;
///
/// assert!(FieldType::Integer.is_configurable());
/// assert!(!FieldType::Auxiliary.is_configurable());
/// assert_eq!(FieldType::Boolean.to_string(), "boolean");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldType {
    /// Free text, optionally restricted to an explicit choice list.
    String,
    /// `true` / `false`.
    Boolean,
    /// Signed 32-bit integer, optionally narrowed by `min` / `max`.
    Integer,
    /// Carried by the shape but never parsed or rendered.
    Auxiliary,
}

impl FieldType {
    /// Returns `true` for types that take part in parsing and help output.
    pub fn is_configurable(self) -> bool {
        !matches!(self, FieldType::Auxiliary)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "string",
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
            FieldType::Auxiliary => "auxiliary",
        };
        f.write_str(name)
    }
}

/// One positional parameter of a command.
///
/// Use the typed constructors ([`string`](OptionField::string),
/// [`boolean`](OptionField::boolean), [`integer`](OptionField::integer),
/// [`auxiliary`](OptionField::auxiliary)) and chain the `with_*` builders.
///
/// # Examples
///
/// ```
/// use slackbot_core::{FieldType, OptionField};
///
/// let font = OptionField::string("Font")
///     .with_default("thin")
///     .with_choices(["thin", "bold", "italic"]);
/// assert_eq!(font.field_type, FieldType::String);
/// assert_eq!(font.default.as_deref(), Some("thin"));
///
/// let count = OptionField::integer("Count").with_default(1).with_min(1).with_max(10);
/// assert_eq!(count.default.as_deref(), Some("1"));
/// assert_eq!(count.max, Some(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionField {
    /// Label shown in help output.
    pub name: String,
    /// Declared native type.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Default used when no token is supplied, in its textual form.
    #[serde(
        default,
        deserialize_with = "deserialize_scalar",
        skip_serializing_if = "Option::is_none"
    )]
    pub default: Option<String>,
    /// Explicit choice list (string fields only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    /// Declared lower bound (integer fields only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    /// Declared upper bound (integer fields only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl OptionField {
    fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            default: None,
            choices: Vec::new(),
            min: None,
            max: None,
        }
    }

    /// Creates a string field.
    pub fn string(name: &str) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Creates a boolean field.
    pub fn boolean(name: &str) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Creates a bounded integer field.
    pub fn integer(name: &str) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Creates an auxiliary field that parsing and help skip.
    pub fn auxiliary(name: &str) -> Self {
        Self::new(name, FieldType::Auxiliary)
    }

    /// Sets the default value.
    pub fn with_default(mut self, value: impl ToString) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Sets the explicit choice list.
    pub fn with_choices<I, S>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choices = choices.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the lower bound.
    pub fn with_min(mut self, min: i64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the upper bound.
    pub fn with_max(mut self, max: i64) -> Self {
        self.max = Some(max);
        self
    }

    /// Returns `true` if the field consumes a positional token.
    pub fn is_configurable(&self) -> bool {
        self.field_type.is_configurable()
    }
}

/// Ordered schema of a command's positional arguments.
///
/// # Examples
///
/// ```
/// use slackbot_core::{OptionField, OptionShape};
///
/// let shape = OptionShape::new()
///     .with_field(OptionField::string("Message"))
///     .with_field(OptionField::auxiliary("Note"))
///     .with_field(OptionField::integer("Count").with_default(1));
///
/// assert_eq!(shape.len(), 3);
/// assert_eq!(shape.configurable().count(), 2);
/// assert!(shape.field("Count").is_some());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionShape {
    fields: Vec<OptionField>,
}

impl OptionShape {
    /// Creates an empty shape.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field; its position defines its positional index.
    pub fn with_field(mut self, field: OptionField) -> Self {
        self.fields.push(field);
        self
    }

    /// All declared fields in order, auxiliary ones included.
    pub fn fields(&self) -> &[OptionField] {
        &self.fields
    }

    /// Fields that take part in parsing and help, in order.
    pub fn configurable(&self) -> impl Iterator<Item = &OptionField> {
        self.fields.iter().filter(|f| f.is_configurable())
    }

    /// Finds a field by name.
    pub fn field(&self, name: &str) -> Option<&OptionField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A coerced option value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OptionValue {
    String(String),
    Boolean(bool),
    Integer(i32),
}

impl OptionValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            OptionValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            OptionValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self {
            OptionValue::Integer(i) => Some(*i),
            _ => None,
        }
    }
}

impl fmt::Display for OptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionValue::String(s) => f.write_str(s),
            OptionValue::Boolean(b) => write!(f, "{b}"),
            OptionValue::Integer(i) => write!(f, "{i}"),
        }
    }
}

/// Populated options for one dispatch, keyed by field name in shape order.
///
/// Built fresh by [`parse_options`](crate::parse_options) and handed to the
/// command handler once.
///
/// # Examples
///
/// ```
/// use slackbot_core::{OptionValue, ParsedOptions};
///
/// let options: ParsedOptions = [
///     ("Font".to_string(), OptionValue::String("bold".into())),
///     ("Count".to_string(), OptionValue::Integer(3)),
/// ]
/// .into_iter()
/// .collect();
///
/// assert_eq!(options.get_str("Font"), Some("bold"));
/// assert_eq!(options.get_int("Count"), Some(3));
/// assert_eq!(options.get_bool("Count"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedOptions {
    values: Vec<(String, OptionValue)>,
}

impl ParsedOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert(&mut self, name: &str, value: OptionValue) {
        match self.values.iter_mut().find(|(n, _)| n == name) {
            Some((_, slot)) => *slot = value,
            None => self.values.push((name.to_string(), value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&OptionValue> {
        self.values.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(OptionValue::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(OptionValue::as_bool)
    }

    pub fn get_int(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(OptionValue::as_int)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OptionValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, OptionValue)> for ParsedOptions {
    fn from_iter<T: IntoIterator<Item = (String, OptionValue)>>(iter: T) -> Self {
        let mut options = ParsedOptions::new();
        for (name, value) in iter {
            options.insert(&name, value);
        }
        options
    }
}

/// Accepts `"1"`, `1` or `true` for a default so YAML/JSON shapes can be
/// written naturally.
fn deserialize_scalar<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Integer(i64),
        Flag(bool),
    }

    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|scalar| match scalar {
        Scalar::Text(s) => s,
        Scalar::Integer(i) => i.to_string(),
        Scalar::Flag(b) => b.to_string(),
    }))
}
