//! Inbound event bag and message tokenization.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

static SPACE_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" {2,}").expect("static regex must compile"));

/// An inbound chat event: a loosely typed key-value bag.
///
/// Accessors return `""` for missing or non-string keys, so handlers never
/// have to deal with partially populated events.
///
/// # Examples
///
/// ```
/// use slackbot_core::Event;
///
/// let event = Event::new()
///     .with("type", "message")
///     .with("channel", "C123")
///     .with("event_ts", "1700000000.000100");
///
/// assert_eq!(event.event_type(), "message");
/// assert_eq!(event.user(), "");
/// assert_eq!(event.thread_timestamp(), "1700000000.000100");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Event(Map<String, Value>);

impl Event {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`.
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.0.insert(key.to_string(), value.into());
        self
    }

    /// Returns the string stored at `key`, or `""`.
    pub fn string(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    /// Raw access to the underlying value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn event_type(&self) -> &str {
        self.string("type")
    }

    pub fn text(&self) -> &str {
        self.string("text")
    }

    pub fn channel(&self) -> &str {
        self.string("channel")
    }

    pub fn user(&self) -> &str {
        self.string("user")
    }

    /// Thread timestamp, falling back to the event timestamp outside threads.
    pub fn thread_timestamp(&self) -> &str {
        match self.string("thread_ts") {
            "" => self.string("event_ts"),
            ts => ts,
        }
    }

    /// Collapses runs of spaces in `text` into a single space.
    ///
    /// ```
    /// use slackbot_core::Event;
    ///
    /// let mut event = Event::new().with("text", "ho     ge ho  ge");
    /// event.normalize_text();
    /// assert_eq!(event.text(), "ho ge ho ge");
    /// ```
    pub fn normalize_text(&mut self) {
        if let Some(Value::String(text)) = self.0.get_mut("text") {
            if SPACE_RUN_RE.is_match(text) {
                *text = SPACE_RUN_RE.replace_all(text, " ").into_owned();
            }
        }
    }
}

impl From<Map<String, Value>> for Event {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Splits message text into space-separated tokens.
///
/// Leading and trailing whitespace is trimmed first; blank text yields no
/// tokens.
///
/// ```
/// use slackbot_core::tokenize;
///
/// assert_eq!(tokenize("  repeat hi 3 "), vec!["repeat", "hi", "3"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    text.split(' ')
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}
