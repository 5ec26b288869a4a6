//! Telegram Bot API implementation of the chat client.
//!
//! Methods are called by posting JSON to `{api_url}/bot{token}/{method}`; every
//! reply is wrapped in an `{ ok, result, description, error_code }` envelope.

use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_with::skip_serializing_none;
use tracing::{debug, instrument};

use crate::base::{
    config::Config,
    telegram::Message,
    types::{ChatAction, ChatId, Res, SendOptions, Void},
};

use super::{ChatClient, GenericChatClient};

// Extra methods on `ChatClient` applied by the telegram implementation.

impl ChatClient {
    /// Creates a new Telegram chat client.
    pub fn telegram(config: &Config) -> Res<Self> {
        Ok(TelegramChatClient::new(config)?.into())
    }
}

impl From<TelegramChatClient> for ChatClient {
    fn from(client: TelegramChatClient) -> Self {
        Self { inner: Arc::new(client) }
    }
}

// Wire types.

#[skip_serializing_none]
#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    disable_web_page_preview: Option<bool>,
    disable_notification: Option<bool>,
    reply_to_message_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct SendChatActionRequest<'a> {
    chat_id: &'a ChatId,
    action: ChatAction,
}

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
    error_code: Option<i64>,
}

impl<T> ApiResponse<T> {
    fn into_result(self, method: &str) -> Res<T> {
        if !self.ok {
            return Err(anyhow!(
                "Telegram method `{}` failed ({}): {}",
                method,
                self.error_code.unwrap_or_default(),
                self.description.unwrap_or_else(|| "no description".to_string())
            ));
        }

        self.result.ok_or_else(|| anyhow!("Telegram method `{}` returned no result.", method))
    }
}

// Structs.

/// Telegram Bot API client.
#[derive(Clone)]
pub struct TelegramChatClient {
    http: reqwest::Client,
    base_url: String,
}

impl TelegramChatClient {
    /// Create a new Telegram chat client.
    #[instrument(name = "TelegramChatClient::new", skip_all)]
    pub fn new(config: &Config) -> Res<Self> {
        if config.telegram_bot_token.is_empty() {
            return Err(anyhow!("Telegram bot token must not be empty."));
        }

        Ok(Self::with_base_url(format!("{}/bot{}", config.telegram_api_url.trim_end_matches('/'), config.telegram_bot_token)))
    }

    /// Client that calls methods under `base_url` (the part before `/{method}`).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{}", self.base_url, method)
    }

    async fn call<P, R>(&self, method: &str, params: &P) -> Res<R>
    where
        P: Serialize + Sync,
        R: DeserializeOwned,
    {
        debug!("Calling `{}` ...", method);

        let response: ApiResponse<R> = self.http.post(self.method_url(method)).json(params).send().await?.json().await?;

        response.into_result(method)
    }
}

#[async_trait]
impl GenericChatClient for TelegramChatClient {
    #[instrument(skip(self, text, options))]
    async fn send_message(&self, chat_id: &ChatId, text: &str, options: &SendOptions) -> Res<Message> {
        let request = SendMessageRequest {
            chat_id,
            text,
            disable_web_page_preview: options.disable_web_page_preview,
            disable_notification: options.disable_notification,
            reply_to_message_id: options.reply_to_message_id,
        };

        self.call("sendMessage", &request).await
    }

    #[instrument(skip(self))]
    async fn send_chat_action(&self, chat_id: &ChatId, action: ChatAction) -> Void {
        let request = SendChatActionRequest { chat_id, action };

        let _: bool = self.call("sendChatAction", &request).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::base::config::ConfigInner;

    use super::*;

    #[test]
    fn send_message_request_omits_unset_options() {
        let chat_id = ChatId::Id(42);
        let request = SendMessageRequest {
            chat_id: &chat_id,
            text: "hi",
            disable_web_page_preview: None,
            disable_notification: Some(true),
            reply_to_message_id: None,
        };

        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "chat_id": 42, "text": "hi", "disable_notification": true }));
    }

    #[test]
    fn chat_action_request_uses_wire_names() {
        let chat_id = ChatId::Username("@news".to_string());
        let request = SendChatActionRequest { chat_id: &chat_id, action: ChatAction::UploadPhoto };

        assert_eq!(serde_json::to_value(&request).unwrap(), json!({ "chat_id": "@news", "action": "upload_photo" }));
    }

    #[test]
    fn failed_envelope_becomes_an_error() {
        let response: ApiResponse<bool> = serde_json::from_value(json!({ "ok": false, "error_code": 429, "description": "Too Many Requests" })).unwrap();

        let err = response.into_result("sendChatAction").unwrap_err().to_string();

        assert!(err.contains("429"));
        assert!(err.contains("Too Many Requests"));
    }

    #[test]
    fn ok_envelope_yields_the_result() {
        let response: ApiResponse<Message> = serde_json::from_value(json!({
            "ok": true,
            "result": { "message_id": 5, "chat": { "id": 1, "type": "private" }, "date": 0, "text": "hi" }
        }))
        .unwrap();

        assert_eq!(response.into_result("sendMessage").unwrap().message_id, 5);
    }

    #[test]
    fn method_urls_include_the_token() {
        let client = TelegramChatClient::with_base_url("https://api.telegram.org/bot123:abc");

        assert_eq!(client.method_url("sendMessage"), "https://api.telegram.org/bot123:abc/sendMessage");
    }

    #[test]
    fn chat_client_is_built_from_config() {
        let config = Config {
            inner: Arc::new(ConfigInner {
                telegram_bot_token: "123:abc".to_string(),
                telegram_api_url: "https://api.telegram.org/".to_string(),
                ..Default::default()
            }),
        };
        assert!(ChatClient::telegram(&config).is_ok());

        let missing_token = Config { inner: Arc::new(ConfigInner::default()) };
        assert!(ChatClient::telegram(&missing_token).is_err());
    }
}
