use slackbot_core::{Event, Messenger};

/// Fallback for message events that did not name a registered command.
///
/// `tokens` is the whitespace-split message text. For mentions the leading
/// `<@BOT_ID>` token has already been removed.
pub trait MessageHandler: Send + Sync {
    /// A plain channel message.
    fn on_message(&self, event: &Event, tokens: &[String], messenger: &dyn Messenger);

    /// A message addressed to the bot.
    fn on_mention_message(&self, event: &Event, tokens: &[String], messenger: &dyn Messenger);
}
