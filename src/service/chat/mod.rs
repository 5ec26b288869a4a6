pub mod chunk;
pub mod telegram;

use std::{future::Future, ops::Deref, sync::Arc, time::Duration};

use anyhow::anyhow;
use async_trait::async_trait;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, info, instrument, warn};

use crate::base::{
    telegram::Message,
    types::{ChatAction, ChatId, Res, SendOptions, Void},
};

/// Default pause between two chat actions.
pub const DEFAULT_ACTION_DELAY: Duration = Duration::from_secs(5);

// Traits.

/// Generic "chat" trait that clients must implement.
///
/// This trait defines the two transport calls the library needs. Implementing
/// it allows different messaging backends to be used.
#[async_trait]
pub trait GenericChatClient: Send + Sync + 'static {
    /// Send one text message.
    ///
    /// `options.max_length` is not applied here; the text is sent as given.
    async fn send_message(&self, chat_id: &ChatId, text: &str, options: &SendOptions) -> Res<Message>;

    /// Show a chat action (e.g. "typing") to the chat.
    async fn send_chat_action(&self, chat_id: &ChatId, action: ChatAction) -> Void;
}

// Structs.

/// Chat client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct ChatClient {
    inner: Arc<dyn GenericChatClient>,
}

impl Deref for ChatClient {
    type Target = dyn GenericChatClient;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl ChatClient {
    pub fn new(inner: Arc<dyn GenericChatClient>) -> Self {
        Self { inner }
    }

    /// Sends `text` as consecutive messages of at most `options.max_length` UTF-16 code units.
    ///
    /// Each slice is sent only after the previous one was accepted. The first failure
    /// is returned as-is; slices already sent stay sent and later ones are not sent.
    #[instrument(skip(self, text, options), fields(chat_id = %chat_id))]
    pub async fn send_large_message(&self, chat_id: &ChatId, text: &str, options: &SendOptions) -> Res<Vec<Message>> {
        if options.max_length == 0 {
            return Err(anyhow!("Max message length must be positive."));
        }

        let chunks = chunk::split_utf16(text, options.max_length);
        let mut messages = Vec::with_capacity(chunks.len());

        for (index, chunk) in chunks.iter().enumerate() {
            debug!("Sending slice {} of {} ...", index + 1, chunks.len());

            messages.push(self.send_message(chat_id, chunk, options).await?);
        }

        info!("Sent {} message(s).", messages.len());

        Ok(messages)
    }

    /// Runs `operation` while repeating `action` in the chat every `delay`.
    ///
    /// The operation's result is returned unchanged. Failed chat actions are logged
    /// and skipped. The repeating task stops once this call completes or is dropped.
    #[instrument(skip(self, operation), fields(chat_id = %chat_id))]
    pub async fn send_with_action<F, T>(&self, chat_id: &ChatId, operation: F, action: ChatAction, delay: Duration) -> Res<T>
    where
        F: Future<Output = Res<T>>,
    {
        if delay.is_zero() {
            return Err(anyhow!("Chat action delay must be positive."));
        }

        let indicator = tokio::spawn(repeat_chat_action(self.clone(), chat_id.clone(), action, delay).in_current_span());
        let _indicator = AbortOnDrop(indicator);

        operation.await
    }

    /// `send_with_action` with the "typing" action and the default delay.
    pub async fn send_with_typing<F, T>(&self, chat_id: &ChatId, operation: F) -> Res<T>
    where
        F: Future<Output = Res<T>>,
    {
        self.send_with_action(chat_id, operation, ChatAction::Typing, DEFAULT_ACTION_DELAY).await
    }
}

/// Sends `action` forever, `delay` apart.
async fn repeat_chat_action(chat: ChatClient, chat_id: ChatId, action: ChatAction, delay: Duration) {
    loop {
        if let Err(err) = chat.send_chat_action(&chat_id, action).await {
            warn!("Failed to send chat action: {}", err);
        }

        tokio::time::sleep(delay).await;
    }
}

/// Aborts the task when dropped.
struct AbortOnDrop(JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}
