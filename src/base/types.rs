use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub type Err = anyhow::Error;
pub type Res<T> = Result<T, Err>;
pub type Void = Res<()>;

/// Default maximum message length, in UTF-16 code units.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 4096;

/// Identifier of a chat: either its numeric id or its public `@username`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChatId {
    Id(i64),
    Username(String),
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Username(username) => write!(f, "{username}"),
        }
    }
}

impl FromStr for ChatId {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Res<Self> {
        let s = s.trim();

        if s.is_empty() {
            return Err(anyhow::anyhow!("Chat id must not be empty."));
        }

        Ok(s.parse::<i64>().map(ChatId::Id).unwrap_or_else(|_| ChatId::Username(s.to_string())))
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

/// Activity shown to the chat while the bot is working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
#[value(rename_all = "snake_case")]
pub enum ChatAction {
    #[default]
    Typing,
    UploadPhoto,
    RecordVideo,
    UploadVideo,
    RecordVoice,
    UploadVoice,
    UploadDocument,
    ChooseSticker,
    FindLocation,
    RecordVideoNote,
    UploadVideoNote,
}

/// Options applied to every slice sent by `send_large_message`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOptions {
    pub disable_web_page_preview: Option<bool>,
    pub disable_notification: Option<bool>,
    pub reply_to_message_id: Option<i64>,
    /// Maximum slice length, in UTF-16 code units.
    pub max_length: usize,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            disable_web_page_preview: None,
            disable_notification: None,
            reply_to_message_id: None,
            max_length: DEFAULT_MAX_MESSAGE_LENGTH,
        }
    }
}

impl SendOptions {
    pub fn with_max_length(mut self, max_length: usize) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn with_reply_to(mut self, message_id: i64) -> Self {
        self.reply_to_message_id = Some(message_id);
        self
    }

    pub fn silent(mut self) -> Self {
        self.disable_notification = Some(true);
        self
    }

    pub fn without_preview(mut self) -> Self {
        self.disable_web_page_preview = Some(true);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_id_parses_numbers_and_usernames() {
        assert_eq!("-100123".parse::<ChatId>().unwrap(), ChatId::Id(-100123));
        assert_eq!("@my_channel".parse::<ChatId>().unwrap(), ChatId::Username("@my_channel".to_string()));
        assert!("  ".parse::<ChatId>().is_err());
    }

    #[test]
    fn chat_action_serializes_as_snake_case() {
        assert_eq!(serde_json::to_value(ChatAction::UploadDocument).unwrap(), serde_json::json!("upload_document"));
        assert_eq!(ChatAction::default(), ChatAction::Typing);
    }

    #[test]
    fn send_options_default_to_telegram_limit() {
        let options = SendOptions::default();

        assert_eq!(options.max_length, 4096);
        assert_eq!(options.reply_to_message_id, None);
        assert_eq!(options.with_max_length(10).silent().disable_notification, Some(true));
    }
}
