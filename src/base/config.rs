//! Load configuration via `config` crate with env-override support.

use std::{ops::Deref, sync::Arc, time::Duration};

use chrono::FixedOffset;
use serde::Deserialize;
use serde_with::{DisplayFromStr, serde_as};

use crate::{
    base::templates,
    logger::record::{LogCategory, LogLevel},
};

use super::types::{ChatId, DEFAULT_MAX_MESSAGE_LENGTH, Res};

/// Default Telegram Bot API base URL.
fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Default database namespace.
fn default_db_namespace() -> String {
    "tgstarter".to_string()
}

/// Default database name.
fn default_db_database() -> String {
    "bot".to_string()
}

/// Default collection that log records are written to.
fn default_log_collection() -> String {
    "logs".to_string()
}

/// Default timezone used when rendering alerts.
fn default_log_timezone() -> String {
    "+00:00".to_string()
}

fn default_alert_template() -> String {
    templates::DEFAULT_ALERT_TEMPLATE.to_string()
}

fn default_max_message_length() -> usize {
    DEFAULT_MAX_MESSAGE_LENGTH
}

fn default_chat_action_interval_secs() -> u64 {
    5
}

/// Configuration for tgstarter.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub inner: Arc<ConfigInner>,
}

impl Deref for Config {
    type Target = ConfigInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

#[serde_as]
#[derive(Debug, Deserialize, Clone, Default)]
pub struct ConfigInner {
    /// Telegram bot token (`TELEGRAM_BOT_TOKEN`).
    pub telegram_bot_token: String,
    /// Telegram Bot API base URL (`TELEGRAM_API_URL`).
    #[serde(default = "default_telegram_api_url")]
    pub telegram_api_url: String,
    /// Database endpoint (`DB_ENDPOINT`); `memory` selects the in-memory engine.
    pub db_endpoint: String,
    /// Database username (`DB_USERNAME`).
    #[serde(default)]
    pub db_username: String,
    /// Database password (`DB_PASSWORD`).
    #[serde(default)]
    pub db_password: String,
    /// Database namespace (`DB_NAMESPACE`).
    #[serde(default = "default_db_namespace")]
    pub db_namespace: String,
    /// Database name (`DB_DATABASE`).
    #[serde(default = "default_db_database")]
    pub db_database: String,
    /// Collection (table) that log records go to (`LOG_COLLECTION`).
    #[serde(default = "default_log_collection")]
    pub log_collection: String,
    /// UTC offset used for alert timestamps, e.g. `+03:00` (`LOG_TIMEZONE`).
    #[serde(default = "default_log_timezone")]
    pub log_timezone: String,
    /// Severity used when a log call does not name one (`LOG_DEFAULT_LEVEL`).
    #[serde(default)]
    pub log_default_level: LogLevel,
    /// Category used when a log call does not name one (`LOG_DEFAULT_CATEGORY`).
    #[serde(default)]
    pub log_default_category: LogCategory,
    /// Alert template, in `strfmt` syntax (`ALERT_TEMPLATE`).
    #[serde(default = "default_alert_template")]
    pub alert_template: String,
    /// Chat that rendered alerts are forwarded to (`ADMIN_CHAT_ID`).
    #[serde_as(as = "Option<DisplayFromStr>")]
    #[serde(default)]
    pub admin_chat_id: Option<ChatId>,
    /// Maximum message slice length in UTF-16 code units (`MAX_MESSAGE_LENGTH`).
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
    /// Seconds between repeated chat actions (`CHAT_ACTION_INTERVAL_SECS`).
    #[serde(default = "default_chat_action_interval_secs")]
    pub chat_action_interval_secs: u64,
}

impl Config {
    pub fn load(explicit_path: Option<&std::path::Path>) -> Res<Self> {
        let mut cfg = config::Config::builder().add_source(config::Environment::default().prefix("TGSTARTER"));

        if let Some(p) = explicit_path {
            cfg = cfg.add_source(config::File::from(p.to_path_buf()));
        } else if std::path::Path::new(".hidden/config.toml").exists() {
            cfg = cfg.add_source(config::File::with_name(".hidden/config.toml"));
        }

        let result = Config {
            inner: Arc::new(cfg.build()?.try_deserialize()?),
        };

        result.validate()?;

        Ok(result)
    }

    /// Checks the values that deserialization alone cannot.
    pub fn validate(&self) -> Res<()> {
        if self.max_message_length == 0 {
            return Err(anyhow::anyhow!("Max message length must be positive."));
        }

        if self.chat_action_interval_secs == 0 {
            return Err(anyhow::anyhow!("Chat action interval must be positive."));
        }

        if self.log_collection.trim().is_empty() {
            return Err(anyhow::anyhow!("Log collection name must not be empty."));
        }

        self.timezone()?;

        Ok(())
    }

    /// The configured alert timezone.
    pub fn timezone(&self) -> Res<FixedOffset> {
        self.log_timezone
            .parse::<FixedOffset>()
            .map_err(|e| anyhow::anyhow!("Invalid log timezone `{}`: {}", self.log_timezone, e))
    }

    pub fn chat_action_interval(&self) -> Duration {
        Duration::from_secs(self.chat_action_interval_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(inner: ConfigInner) -> Config {
        Config { inner: Arc::new(inner) }
    }

    fn valid() -> ConfigInner {
        ConfigInner {
            telegram_bot_token: "123:abc".to_string(),
            db_endpoint: "memory".to_string(),
            log_collection: default_log_collection(),
            log_timezone: "+03:00".to_string(),
            max_message_length: default_max_message_length(),
            chat_action_interval_secs: default_chat_action_interval_secs(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_config_passes() {
        let config = config(valid());

        assert!(config.validate().is_ok());
        assert_eq!(config.timezone().unwrap(), FixedOffset::east_opt(3 * 3600).unwrap());
        assert_eq!(config.chat_action_interval(), Duration::from_secs(5));
    }

    #[test]
    fn zero_limits_are_rejected() {
        assert!(config(ConfigInner { max_message_length: 0, ..valid() }).validate().is_err());
        assert!(config(ConfigInner { chat_action_interval_secs: 0, ..valid() }).validate().is_err());
    }

    #[test]
    fn bad_timezone_is_rejected() {
        assert!(config(ConfigInner { log_timezone: "Mars/Olympus".to_string(), ..valid() }).validate().is_err());
    }

    #[test]
    fn file_values_override_defaults() {
        let raw = config::Config::builder()
            .add_source(config::File::from_str(
                r#"
                telegram_bot_token = "123:abc"
                db_endpoint = "memory"
                log_default_level = "WARNING"
                admin_chat_id = "-100500"
                "#,
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap();

        let inner: ConfigInner = raw.try_deserialize().unwrap();

        assert_eq!(inner.log_default_level, LogLevel::Warning);
        assert_eq!(inner.log_default_category, LogCategory::Event);
        assert_eq!(inner.admin_chat_id, Some(ChatId::Id(-100500)));
        assert_eq!(inner.log_collection, "logs");
        assert_eq!(inner.telegram_api_url, "https://api.telegram.org");
    }
}
