//! Minimal Slack Web API client for outbound messages.

use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{Value, json};
use slackbot_core::{Messenger, SendError};
use tracing::debug;

use crate::error::{Result, WebhookError};

/// Base URL of the Slack Web API.
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Deserialize)]
struct SlackResponse {
    ok: bool,
    error: Option<String>,
}

fn ensure_ok(resp: SlackResponse) -> Result<()> {
    if resp.ok {
        Ok(())
    } else {
        Err(WebhookError::ApiError(
            resp.error.unwrap_or_else(|| "unknown error".into()),
        ))
    }
}

/// A [`Messenger`] that posts through `chat.postMessage` and
/// `chat.postEphemeral`.
pub struct SlackClient {
    client: Client,
    token: String,
    api_base: String,
}

impl SlackClient {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            token: token.into(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Points the client at a different API host.
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    fn call(&self, method: &str, body: &Value) -> Result<()> {
        debug!(method, "calling Slack Web API");
        let parsed: SlackResponse = self
            .client
            .post(format!("{}/{method}", self.api_base))
            .bearer_auth(&self.token)
            .json(body)
            .send()?
            .json()?;
        ensure_ok(parsed)
    }
}

impl std::fmt::Debug for SlackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackClient")
            .field("api_base", &self.api_base)
            .finish_non_exhaustive()
    }
}

impl Messenger for SlackClient {
    fn post_message(&self, channel: &str, text: &str) -> std::result::Result<(), SendError> {
        self.call("chat.postMessage", &json!({"channel": channel, "text": text}))
            .map_err(|err| SendError(err.to_string()))
    }

    fn post_ephemeral(
        &self,
        channel: &str,
        user: &str,
        text: &str,
    ) -> std::result::Result<(), SendError> {
        self.call(
            "chat.postEphemeral",
            &json!({"channel": channel, "user": user, "text": text}),
        )
        .map_err(|err| SendError(err.to_string()))
    }

    fn reply_in_thread(
        &self,
        channel: &str,
        thread_ts: &str,
        text: &str,
    ) -> std::result::Result<(), SendError> {
        self.call(
            "chat.postMessage",
            &json!({"channel": channel, "thread_ts": thread_ts, "text": text}),
        )
        .map_err(|err| SendError(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_ok() {
        assert!(ensure_ok(SlackResponse { ok: true, error: None }).is_ok());

        let err = ensure_ok(SlackResponse {
            ok: false,
            error: Some("channel_not_found".into()),
        })
        .unwrap_err();
        assert_eq!(err.to_string(), "Slack API error: channel_not_found");

        let err = ensure_ok(SlackResponse { ok: false, error: None }).unwrap_err();
        assert_eq!(err.to_string(), "Slack API error: unknown error");
    }

    #[test]
    fn test_api_base_override() {
        let client = SlackClient::new("xoxb-test").with_api_base("http://127.0.0.1:9/api/");
        assert_eq!(client.api_base(), "http://127.0.0.1:9/api");
        assert!(!format!("{client:?}").contains("xoxb-test"));
    }

    #[test]
    fn test_transport_failure_is_send_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = SlackClient::new("xoxb-test").with_api_base("http://127.0.0.1:9/api");
        let err = client.post_message("C1", "hello").unwrap_err();
        assert!(err.to_string().starts_with("failed to send message: HTTP error"));
    }
}
