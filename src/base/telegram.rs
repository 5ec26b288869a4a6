//! Telegram Bot API objects used by the library.
//!
//! Only the fields the library reads are typed; everything else is kept in
//! the `extra` map of each object so that snapshots stay lossless.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::skip_serializing_none;

/// A Telegram user or bot.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub language_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A private chat, group, supergroup or channel.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub kind: String,
    pub title: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A message, as received in updates and as returned by `sendMessage`.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub message_id: i64,
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub date: i64,
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlineQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub query: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChosenInlineResult {
    pub result_id: String,
    pub from: User,
    #[serde(default)]
    pub query: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Callback from an inline keyboard button.
///
/// `message` is missing when the button was attached to an inline message.
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallbackQuery {
    pub id: String,
    pub from: User,
    pub message: Option<Message>,
    pub data: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub invoice_payload: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreCheckoutQuery {
    pub id: String,
    pub from: User,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub total_amount: i64,
    #[serde(default)]
    pub invoice_payload: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Poll {
    pub id: String,
    #[serde(default)]
    pub question: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollAnswer {
    pub poll_id: String,
    pub user: Option<User>,
    #[serde(default)]
    pub option_ids: Vec<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// The payload of an update; exactly one shape per update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateKind {
    Message(Message),
    EditedMessage(Message),
    ChannelPost(Message),
    EditedChannelPost(Message),
    InlineQuery(InlineQuery),
    ChosenInlineResult(ChosenInlineResult),
    CallbackQuery(CallbackQuery),
    ShippingQuery(ShippingQuery),
    PreCheckoutQuery(PreCheckoutQuery),
    Poll(Poll),
    PollAnswer(PollAnswer),
    /// An update carrying none of the known shapes; its fields are kept as-is.
    Unknown(Map<String, Value>),
}

/// An incoming update.
///
/// When the raw object carries more than one known shape, the first one in
/// `UpdateKind` declaration order wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawUpdate", into = "RawUpdate")]
pub struct Update {
    pub update_id: i64,
    pub kind: UpdateKind,
}

/// Wire form of an update, with every shape optional.
#[skip_serializing_none]
#[derive(Debug, Default, Serialize, Deserialize)]
struct RawUpdate {
    #[serde(default)]
    update_id: i64,
    message: Option<Message>,
    edited_message: Option<Message>,
    channel_post: Option<Message>,
    edited_channel_post: Option<Message>,
    inline_query: Option<InlineQuery>,
    chosen_inline_result: Option<ChosenInlineResult>,
    callback_query: Option<CallbackQuery>,
    shipping_query: Option<ShippingQuery>,
    pre_checkout_query: Option<PreCheckoutQuery>,
    poll: Option<Poll>,
    poll_answer: Option<PollAnswer>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl From<RawUpdate> for Update {
    fn from(raw: RawUpdate) -> Self {
        let kind = raw
            .message
            .map(UpdateKind::Message)
            .or(raw.edited_message.map(UpdateKind::EditedMessage))
            .or(raw.channel_post.map(UpdateKind::ChannelPost))
            .or(raw.edited_channel_post.map(UpdateKind::EditedChannelPost))
            .or(raw.inline_query.map(UpdateKind::InlineQuery))
            .or(raw.chosen_inline_result.map(UpdateKind::ChosenInlineResult))
            .or(raw.callback_query.map(UpdateKind::CallbackQuery))
            .or(raw.shipping_query.map(UpdateKind::ShippingQuery))
            .or(raw.pre_checkout_query.map(UpdateKind::PreCheckoutQuery))
            .or(raw.poll.map(UpdateKind::Poll))
            .or(raw.poll_answer.map(UpdateKind::PollAnswer))
            .unwrap_or(UpdateKind::Unknown(raw.extra));

        Self { update_id: raw.update_id, kind }
    }
}

impl From<Update> for RawUpdate {
    fn from(update: Update) -> Self {
        let mut raw = RawUpdate {
            update_id: update.update_id,
            ..Default::default()
        };

        match update.kind {
            UpdateKind::Message(m) => raw.message = Some(m),
            UpdateKind::EditedMessage(m) => raw.edited_message = Some(m),
            UpdateKind::ChannelPost(m) => raw.channel_post = Some(m),
            UpdateKind::EditedChannelPost(m) => raw.edited_channel_post = Some(m),
            UpdateKind::InlineQuery(q) => raw.inline_query = Some(q),
            UpdateKind::ChosenInlineResult(r) => raw.chosen_inline_result = Some(r),
            UpdateKind::CallbackQuery(q) => raw.callback_query = Some(q),
            UpdateKind::ShippingQuery(q) => raw.shipping_query = Some(q),
            UpdateKind::PreCheckoutQuery(q) => raw.pre_checkout_query = Some(q),
            UpdateKind::Poll(p) => raw.poll = Some(p),
            UpdateKind::PollAnswer(a) => raw.poll_answer = Some(a),
            UpdateKind::Unknown(extra) => raw.extra = extra,
        }

        raw
    }
}
