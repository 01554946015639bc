//! Slack Events API boundary for `slackbot-core`.
//!
//! - [`Payload`] decodes webhook bodies into a key-value bag.
//! - [`SlackBot`] verifies requests and routes `message` / `app_mention`
//!   events to the command registry, falling back to a [`MessageHandler`].
//! - [`SlackClient`] delivers replies through the Slack Web API.
//! - [`BotConfig`] holds credentials loaded from YAML and/or the environment.

mod bot;
mod client;
mod config;
mod error;
mod handler;
mod payload;
mod signature;

pub use bot::{RETRY_NUM_HEADER, SlackBot, WebhookRequest, WebhookResponse};
pub use client::{DEFAULT_API_BASE, SlackClient};
pub use config::{
    BotConfig, ENV_ACCESS_TOKEN, ENV_BOT_USER_ID, ENV_SIGNING_SECRET, ENV_VERIFICATION_TOKEN,
};
pub use error::{Result, WebhookError};
pub use handler::MessageHandler;
pub use payload::{EVENT_CALLBACK, INTERACTIVE_TYPES, Payload, URL_VERIFICATION};
pub use signature::{
    MAX_TIMESTAMP_AGE_SECS, SIGNATURE_HEADER, TIMESTAMP_HEADER, sign_request,
    verify_request_signature, verify_request_signature_at,
};
