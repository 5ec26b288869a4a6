//! Runtime services and shared state for tgstarter.

use tracing::{info, instrument, warn};

use crate::{
    base::{
        config::Config,
        telegram::{Message, Update},
        types::{Res, SendOptions},
    },
    logger::{EventLogger, LogRequest, exception::ExcInfo},
    service::{chat::ChatClient, db::LogStore, render::Renderer},
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the chat client, the event logger, and configuration.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The chat client instance.
    pub chat: ChatClient,
    /// The event logger instance.
    pub logger: EventLogger,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub async fn new(config: Config) -> Res<Self> {
        // Initialize the log store.
        let store = LogStore::surreal(&config).await?;

        // Initialize the alert renderer and the logger.
        let renderer = Renderer::from_config(&config);
        let logger = EventLogger::from_config(&config, store, renderer)?;

        // Initialize the chat client.
        let chat = ChatClient::telegram(&config)?;

        info!("Runtime initialized.");

        Ok(Self { config, chat, logger })
    }

    /// Default options for outgoing messages.
    pub fn send_options(&self) -> SendOptions {
        SendOptions::default().with_max_length(self.config.max_message_length)
    }

    /// Logs `err` at ERROR severity and forwards the alert to the admin chat, if one is set.
    ///
    /// Returns the messages the alert was sent as, or `None` when it was not sent.
    #[instrument(skip_all)]
    pub async fn report(&self, update: Option<&Update>, err: &anyhow::Error) -> Res<Option<Vec<Message>>> {
        let mut request = LogRequest::new().from_bot().exception(ExcInfo::from_anyhow(err));
        if let Some(update) = update {
            request = request.update(update);
        }

        let Some(alert) = self.logger.error(request).await? else {
            return Ok(None);
        };

        let Some(admin_chat_id) = &self.config.admin_chat_id else {
            warn!("No admin chat configured; alert was not forwarded.");
            return Ok(None);
        };

        let options = self.send_options().silent().without_preview();
        let messages = self.chat.send_large_message(admin_chat_id, &alert, &options).await?;

        Ok(Some(messages))
    }
}
