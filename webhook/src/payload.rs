//! Events API payload decoding.

use serde_json::{Map, Value};
use slackbot_core::Event;

use crate::error::{Result, WebhookError};

/// Payload type sent when Slack verifies the endpoint URL.
pub const URL_VERIFICATION: &str = "url_verification";
/// Payload type wrapping an event.
pub const EVENT_CALLBACK: &str = "event_callback";

/// Interactive payload types that are acknowledged without dispatch.
pub const INTERACTIVE_TYPES: &[&str] = &[
    "dialog_cancellation",
    "dialog_submission",
    "dialog_suggestion",
    "interactive_message",
    "message_action",
    "block_actions",
    "block_suggestion",
    "view_submission",
    "view_closed",
    "shortcut",
];

/// A decoded webhook body.
///
/// # Examples
///
/// ```
/// use slackbot_webhook::Payload;
///
/// let payload = Payload::decode(br#"{"type":"url_verification","challenge":"abc"}"#).unwrap();
/// assert_eq!(payload.payload_type(), "url_verification");
/// assert_eq!(payload.challenge(), "abc");
/// assert_eq!(payload.token(), "");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl Payload {
    /// Decodes a JSON object body.
    ///
    /// # Errors
    ///
    /// Returns [`JsonError`](WebhookError::JsonError) for malformed JSON and
    /// [`InvalidPayload`](WebhookError::InvalidPayload) when the body is not
    /// a JSON object.
    pub fn decode(body: &[u8]) -> Result<Self> {
        match serde_json::from_slice(body)? {
            Value::Object(map) => Ok(Self(map)),
            other => Err(WebhookError::InvalidPayload(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Returns the string stored at `key`, or `""`.
    pub fn string(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or_default()
    }

    pub fn payload_type(&self) -> &str {
        self.string("type")
    }

    pub fn token(&self) -> &str {
        self.string("token")
    }

    pub fn challenge(&self) -> &str {
        self.string("challenge")
    }

    /// The wrapped event with its text whitespace-normalized, if present.
    pub fn event(&self) -> Option<Event> {
        let Some(Value::Object(map)) = self.0.get("event") else {
            return None;
        };
        let mut event = Event::from(map.clone());
        event.normalize_text();
        Some(event)
    }
}

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
