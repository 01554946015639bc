//! Webhook entry point.
//!
//! [`SlackBot::handle`] takes one decoded HTTP request from the Events API
//! and returns the response to send back. It is transport-agnostic: any
//! HTTP server or serverless adapter can build a [`WebhookRequest`] and
//! write out the [`WebhookResponse`].

use std::collections::HashMap;

use slackbot_core::{Command, CommandRegistry, Event, Messenger, ValidationError, tokenize, try_execute};
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

use crate::config::BotConfig;
use crate::handler::MessageHandler;
use crate::payload::{EVENT_CALLBACK, INTERACTIVE_TYPES, Payload, URL_VERIFICATION};
use crate::signature::{SIGNATURE_HEADER, TIMESTAMP_HEADER, verify_request_signature};

/// Header Slack sets when redelivering an event.
pub const RETRY_NUM_HEADER: &str = "x-slack-retry-num";

const TEXT_PLAIN: &str = "text/plain";

/// An inbound HTTP request. Header names are case-insensitive.
#[derive(Debug, Clone, Default)]
pub struct WebhookRequest {
    headers: HashMap<String, String>,
    body: Vec<u8>,
}

impl WebhookRequest {
    pub fn new(body: impl Into<Vec<u8>>) -> Self {
        Self {
            headers: HashMap::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

/// The HTTP response to return to Slack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: String,
}

impl WebhookResponse {
    fn ok() -> Self {
        Self::text(200, String::new())
    }

    fn text(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: Some(TEXT_PLAIN),
            body,
        }
    }

    fn status(status: u16) -> Self {
        Self {
            status,
            content_type: None,
            body: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// A Slack bot: configuration, command registry and outbound messenger.
///
/// # Examples
///
/// ```
/// use slackbot_core::RecordingMessenger;
/// use slackbot_webhook::{BotConfig, SlackBot, WebhookRequest};
///
/// let bot = SlackBot::new(BotConfig::default(), RecordingMessenger::new());
/// let request = WebhookRequest::new(r#"{"type":"url_verification","challenge":"c"}"#);
///
/// let response = bot.handle(&request);
/// assert_eq!(response.status, 200);
/// assert_eq!(response.body, "c");
/// ```
pub struct SlackBot<M: Messenger> {
    config: BotConfig,
    registry: CommandRegistry,
    messenger: M,
    message_handler: Option<Box<dyn MessageHandler>>,
}

impl<M: Messenger> SlackBot<M> {
    /// Creates a bot whose registry holds only the built-in commands.
    pub fn new(config: BotConfig, messenger: M) -> Self {
        let mut registry = CommandRegistry::with_builtins();
        registry.set_default_help_verbosity(config.default_help_verbose);
        Self {
            config,
            registry,
            messenger,
            message_handler: None,
        }
    }

    pub fn with_message_handler(mut self, handler: impl MessageHandler + 'static) -> Self {
        self.message_handler = Some(Box::new(handler));
        self
    }

    /// Replaces the registered commands with the built-ins plus `commands`.
    pub fn setup_commands<I>(&mut self, commands: I) -> Result<(), ValidationError>
    where
        I: IntoIterator<Item = Command>,
    {
        self.registry.setup(commands)
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut CommandRegistry {
        &mut self.registry
    }

    pub fn messenger(&self) -> &M {
        &self.messenger
    }

    /// Handles one webhook request.
    pub fn handle(&self, request: &WebhookRequest) -> WebhookResponse {
        let payload = match Payload::decode(request.body()) {
            Ok(payload) => payload,
            Err(err) => {
                warn!(error = %err, "rejecting undecodable payload");
                return WebhookResponse::text(400, err.to_string());
            }
        };

        match payload.payload_type() {
            URL_VERIFICATION => {
                info!("answering url verification");
                WebhookResponse::text(200, payload.challenge().to_string())
            }
            EVENT_CALLBACK => self.handle_event_callback(request, &payload),
            kind if INTERACTIVE_TYPES.contains(&kind) => {
                debug!(payload_type = kind, "acknowledging interactive payload");
                WebhookResponse::ok()
            }
            kind => {
                warn!(payload_type = kind, "unsupported payload type");
                WebhookResponse::status(500)
            }
        }
    }

    fn handle_event_callback(&self, request: &WebhookRequest, payload: &Payload) -> WebhookResponse {
        let Some(event) = payload.event() else {
            warn!("event_callback without an event object");
            return WebhookResponse::text(400, "missing event".to_string());
        };

        let event_type = event.event_type();
        if !matches!(event_type, "message" | "app_mention" | "app_home_opened") {
            warn!(event_type, "unsupported event type");
            return WebhookResponse::status(500);
        }

        if !self.verify_token(payload.token()) {
            warn!(event_type, "verification token mismatch");
            return WebhookResponse::status(500);
        }
        if !self.verify_signature(request) {
            warn!(event_type, "request signature verification failed");
            return WebhookResponse::status(401);
        }
        if let Some(retry) = request.header(RETRY_NUM_HEADER) {
            debug!(retry, event_type, "ignoring redelivered event");
            return WebhookResponse::ok();
        }

        match event_type {
            "message" => self.on_message(&event),
            "app_mention" => self.on_mention(&event),
            _ => debug!(user = event.user(), "app home opened"),
        }
        WebhookResponse::ok()
    }

    fn verify_token(&self, token: &str) -> bool {
        self.config
            .verification_token
            .as_bytes()
            .ct_eq(token.as_bytes())
            .into()
    }

    fn verify_signature(&self, request: &WebhookRequest) -> bool {
        let Some(secret) = self.config.signing_secret.as_deref() else {
            return true;
        };
        let (Some(timestamp), Some(signature)) = (
            request.header(TIMESTAMP_HEADER),
            request.header(SIGNATURE_HEADER),
        ) else {
            return false;
        };
        verify_request_signature(secret, timestamp, request.body(), signature)
    }

    fn on_message(&self, event: &Event) {
        let mut tokens = tokenize(event.text());
        let mentioned = match (self.config.mention_tag(), tokens.first()) {
            (Some(tag), Some(first)) => *first == tag,
            _ => false,
        };
        if mentioned {
            tokens.remove(0);
        }

        if try_execute(&self.registry, &self.messenger, event, &tokens) {
            return;
        }
        if let Some(handler) = &self.message_handler {
            if mentioned {
                handler.on_mention_message(event, &tokens, &self.messenger);
            } else {
                handler.on_message(event, &tokens, &self.messenger);
            }
        }
    }

    fn on_mention(&self, event: &Event) {
        let mut tokens = tokenize(event.text());
        if let (Some(tag), Some(first)) = (self.config.mention_tag(), tokens.first()) {
            if *first == tag {
                tokens.remove(0);
            }
        }

        if try_execute(&self.registry, &self.messenger, event, &tokens) {
            return;
        }
        if let Some(handler) = &self.message_handler {
            handler.on_mention_message(event, &tokens, &self.messenger);
        }
    }
}

#[cfg(test)]
mod tests {
    use slackbot_core::RecordingMessenger;

    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = WebhookRequest::new("{}").with_header("X-Slack-Retry-Num", "1");
        assert_eq!(request.header(RETRY_NUM_HEADER), Some("1"));
        assert_eq!(request.header("X-SLACK-RETRY-NUM"), Some("1"));
        assert_eq!(request.header("x-other"), None);
    }

    #[test]
    fn test_new_bot_uses_configured_help_verbosity() {
        let config = BotConfig {
            default_help_verbose: false,
            ..BotConfig::default()
        };
        let bot = SlackBot::new(config, RecordingMessenger::new());
        assert!(!bot.registry().default_help_verbosity());
        assert_eq!(bot.registry().command_names(), ["help", "ping"]);
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let bot = SlackBot::new(BotConfig::default(), RecordingMessenger::new());
        let response = bot.handle(&WebhookRequest::new("not json"));
        assert_eq!(response.status, 400);
        assert!(response.body.starts_with("JSON error"));
        assert!(!response.is_success());
    }

    #[test]
    fn test_unknown_payload_type_is_server_error() {
        let bot = SlackBot::new(BotConfig::default(), RecordingMessenger::new());
        let response = bot.handle(&WebhookRequest::new(r#"{"type":"mystery"}"#));
        assert_eq!(response, WebhookResponse::status(500));
    }

    #[test]
    fn test_interactive_payload_is_acknowledged() {
        let bot = SlackBot::new(BotConfig::default(), RecordingMessenger::new());
        for kind in INTERACTIVE_TYPES {
            let body = format!(r#"{{"type":"{kind}"}}"#);
            assert_eq!(bot.handle(&WebhookRequest::new(body)).status, 200, "{kind}");
        }
        assert!(bot.messenger().sent().is_empty());
    }
}
