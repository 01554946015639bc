//! Outbound messaging seam.
//!
//! The core never talks to the chat platform directly; it goes through a
//! [`Messenger`]. Production code plugs in an HTTP client, tests and local
//! tooling use [`RecordingMessenger`].

use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use crate::error::SendError;

/// Outbound "send text" operations of the chat platform.
pub trait Messenger {
    /// Posts `text` to `channel`.
    fn post_message(&self, channel: &str, text: &str) -> Result<(), SendError>;

    /// Posts `text` to `channel`, visible only to `user`.
    fn post_ephemeral(&self, channel: &str, user: &str, text: &str) -> Result<(), SendError>;

    /// Posts `text` as a reply in the thread rooted at `thread_ts`.
    fn reply_in_thread(&self, channel: &str, thread_ts: &str, text: &str)
    -> Result<(), SendError>;
}

/// One recorded outbound message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Outbound {
    Message {
        channel: String,
        text: String,
    },
    Ephemeral {
        channel: String,
        user: String,
        text: String,
    },
    Thread {
        channel: String,
        thread_ts: String,
        text: String,
    },
}

impl Outbound {
    /// The message body.
    pub fn text(&self) -> &str {
        match self {
            Outbound::Message { text, .. }
            | Outbound::Ephemeral { text, .. }
            | Outbound::Thread { text, .. } => text,
        }
    }
}

/// A [`Messenger`] that records every send instead of delivering it.
///
/// # Examples
///
/// ```
/// use slackbot_core::{Messenger, Outbound, RecordingMessenger};
///
/// let messenger = RecordingMessenger::new();
/// messenger.post_message("C1", "hello").unwrap();
///
/// assert_eq!(
///     messenger.sent(),
///     vec![Outbound::Message { channel: "C1".into(), text: "hello".into() }]
/// );
/// ```
#[derive(Debug, Default)]
pub struct RecordingMessenger {
    sent: Mutex<Vec<Outbound>>,
}

impl RecordingMessenger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything sent so far.
    pub fn sent(&self) -> Vec<Outbound> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drains the recorded messages.
    pub fn take(&self) -> Vec<Outbound> {
        std::mem::take(&mut *self.sent.lock().unwrap_or_else(PoisonError::into_inner))
    }

    fn record(&self, outbound: Outbound) -> Result<(), SendError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(outbound);
        Ok(())
    }
}

impl Messenger for RecordingMessenger {
    fn post_message(&self, channel: &str, text: &str) -> Result<(), SendError> {
        self.record(Outbound::Message {
            channel: channel.to_string(),
            text: text.to_string(),
        })
    }

    fn post_ephemeral(&self, channel: &str, user: &str, text: &str) -> Result<(), SendError> {
        self.record(Outbound::Ephemeral {
            channel: channel.to_string(),
            user: user.to_string(),
            text: text.to_string(),
        })
    }

    fn reply_in_thread(
        &self,
        channel: &str,
        thread_ts: &str,
        text: &str,
    ) -> Result<(), SendError> {
        self.record(Outbound::Thread {
            channel: channel.to_string(),
            thread_ts: thread_ts.to_string(),
            text: text.to_string(),
        })
    }
}
