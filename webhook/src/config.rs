//! Bot configuration.
//!
//! Credentials can come from a YAML file, from the environment, or both:
//! non-empty environment values override what the file says.
//!
//! # Example YAML
//!
//! ```yaml
//! bot_user_id: U012ABCDEF
//! verification_token: xxxxxxxxxxxxxxxxxxxxxxxx
//! access_token: xoxb-...
//! signing_secret: 8f742231b10e8888abcd99yyyzzz85a5
//! default_help_verbose: false
//! ```

use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable holding the bot's user ID.
pub const ENV_BOT_USER_ID: &str = "SLACK_BOT_USER_ID";
/// Environment variable holding the Events API verification token.
pub const ENV_VERIFICATION_TOKEN: &str = "SLACK_VERIFICATION_TOKEN";
/// Environment variable holding the bot access token.
pub const ENV_ACCESS_TOKEN: &str = "SLACK_ACCESS_TOKEN";
/// Environment variable holding the request signing secret.
pub const ENV_SIGNING_SECRET: &str = "SLACK_SIGNING_SECRET";

/// Slack credentials and dispatch settings.
///
/// # Examples
///
/// ```
/// use slackbot_webhook::BotConfig;
///
/// let config: BotConfig = serde_yaml::from_str("bot_user_id: U1\naccess_token: xoxb-1").unwrap();
/// assert_eq!(config.bot_user_id, "U1");
/// assert!(config.signing_secret.is_none());
/// assert!(config.default_help_verbose);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotConfig {
    /// User ID of the bot, used to recognize `<@ID>` mentions.
    #[serde(default)]
    pub bot_user_id: String,
    /// Events API verification token every payload must carry.
    #[serde(default)]
    pub verification_token: String,
    /// Bot token used for outbound Web API calls.
    #[serde(default)]
    pub access_token: String,
    /// When set, request signatures are verified with this secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_secret: Option<String>,
    /// Whether `help` lists descriptions by default.
    #[serde(default = "default_help_verbose")]
    pub default_help_verbose: bool,
}

fn default_help_verbose() -> bool {
    true
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            bot_user_id: String::new(),
            verification_token: String::new(),
            access_token: String::new(),
            signing_secret: None,
            default_help_verbose: default_help_verbose(),
        }
    }
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("bot_user_id", &self.bot_user_id)
            .field("verification_token", &redact(&self.verification_token))
            .field("access_token", &redact(&self.access_token))
            .field("signing_secret", &self.signing_secret.as_deref().map(redact))
            .field("default_help_verbose", &self.default_help_verbose)
            .finish()
    }
}

fn redact(secret: &str) -> &'static str {
    if secret.is_empty() { "" } else { "***" }
}

impl BotConfig {
    /// Builds a configuration from the `SLACK_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().merge_env()
    }

    /// Overrides fields with non-empty `SLACK_*` environment variables.
    pub fn merge_env(self) -> Self {
        self.merge_with(|key| std::env::var(key).ok())
    }

    /// Overrides fields with non-empty values returned by `lookup`.
    ///
    /// ```
    /// use slackbot_webhook::BotConfig;
    ///
    /// let config = BotConfig::default().merge_with(|key| match key {
    ///     "SLACK_BOT_USER_ID" => Some("U1".to_string()),
    ///     "SLACK_ACCESS_TOKEN" => Some(String::new()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.bot_user_id, "U1");
    /// assert_eq!(config.access_token, "");
    /// ```
    pub fn merge_with<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.is_empty());

        if let Some(v) = value(ENV_BOT_USER_ID) {
            self.bot_user_id = v;
        }
        if let Some(v) = value(ENV_VERIFICATION_TOKEN) {
            self.verification_token = v;
        }
        if let Some(v) = value(ENV_ACCESS_TOKEN) {
            self.access_token = v;
        }
        if let Some(v) = value(ENV_SIGNING_SECRET) {
            self.signing_secret = Some(v);
        }
        self
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::WebhookError::IoError) if the file cannot
    /// be read, or [`YamlError`](crate::WebhookError::YamlError) if parsing
    /// fails.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_yaml::from_reader(reader)?;
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`IoError`](crate::WebhookError::IoError) if the file cannot
    /// be written, or [`YamlError`](crate::WebhookError::YamlError) if
    /// serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self)?;
        Ok(())
    }

    /// The `<@ID>` token that addresses the bot, if its ID is known.
    pub fn mention_tag(&self) -> Option<String> {
        (!self.bot_user_id.is_empty()).then(|| format!("<@{}>", self.bot_user_id))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn sample_yaml() -> &'static str {
        r#"
bot_user_id: U012ABCDEF
verification_token: token-from-file
access_token: xoxb-file
signing_secret: secret
default_help_verbose: false
"#
    }

    #[test]
    fn test_deserialize_complete() {
        let config: BotConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        assert_eq!(config.bot_user_id, "U012ABCDEF");
        assert_eq!(config.verification_token, "token-from-file");
        assert_eq!(config.access_token, "xoxb-file");
        assert_eq!(config.signing_secret.as_deref(), Some("secret"));
        assert!(!config.default_help_verbose);
    }

    #[test]
    fn test_deserialize_empty_document_uses_defaults() {
        let config: BotConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(config, BotConfig::default());
        assert!(config.default_help_verbose);
    }

    #[test]
    fn test_non_empty_values_override() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_VERIFICATION_TOKEN, "token-from-env"),
            (ENV_ACCESS_TOKEN, ""),
            (ENV_SIGNING_SECRET, "env-secret"),
        ]);
        let base: BotConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        let config = base.merge_with(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.bot_user_id, "U012ABCDEF");
        assert_eq!(config.verification_token, "token-from-env");
        assert_eq!(config.access_token, "xoxb-file");
        assert_eq!(config.signing_secret.as_deref(), Some("env-secret"));
    }

    #[test]
    fn test_mention_tag() {
        let mut config = BotConfig::default();
        assert_eq!(config.mention_tag(), None);
        config.bot_user_id = "UBOT".into();
        assert_eq!(config.mention_tag().as_deref(), Some("<@UBOT>"));
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config: BotConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        let debug = format!("{config:?}");
        assert!(debug.contains("U012ABCDEF"));
        assert!(!debug.contains("xoxb-file"));
        assert!(!debug.contains("token-from-file"));
    }

    #[test]
    fn test_load_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bot.yml");

        let original: BotConfig = serde_yaml::from_str(sample_yaml()).unwrap();
        original.save(&path).unwrap();

        let loaded = BotConfig::load(&path).unwrap();
        assert_eq!(loaded, original);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = BotConfig::load(dir.path().join("missing.yml")).unwrap_err();
        assert!(matches!(err, crate::WebhookError::IoError(_)));
    }
}
