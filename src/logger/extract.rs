//! Who and where an update came from.

use crate::base::telegram::{Chat, Update, UpdateKind, User};

/// Returns the user and chat an update belongs to, when it carries them.
pub fn user_and_chat(update: Option<&Update>) -> (Option<&User>, Option<&Chat>) {
    let Some(update) = update else {
        return (None, None);
    };

    match &update.kind {
        UpdateKind::Message(m) | UpdateKind::EditedMessage(m) => (m.from.as_ref(), Some(&m.chat)),
        UpdateKind::ChannelPost(m) | UpdateKind::EditedChannelPost(m) => (None, Some(&m.chat)),
        UpdateKind::InlineQuery(q) => (Some(&q.from), None),
        UpdateKind::ChosenInlineResult(r) => (Some(&r.from), None),
        UpdateKind::CallbackQuery(q) => (Some(&q.from), q.message.as_ref().map(|m| &m.chat)),
        UpdateKind::ShippingQuery(q) => (Some(&q.from), None),
        UpdateKind::PreCheckoutQuery(q) => (Some(&q.from), None),
        UpdateKind::Poll(_) | UpdateKind::PollAnswer(_) | UpdateKind::Unknown(_) => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    fn user() -> Value {
        json!({ "id": 11, "is_bot": false, "first_name": "Ann" })
    }

    fn chat() -> Value {
        json!({ "id": -22, "type": "supergroup", "title": "Ops" })
    }

    fn message() -> Value {
        json!({ "message_id": 1, "from": user(), "chat": chat(), "date": 0 })
    }

    fn ids(key: &str, payload: Value) -> (Option<i64>, Option<i64>) {
        let update: Update = serde_json::from_value(json!({ "update_id": 1, key: payload })).unwrap();
        let (user, chat) = user_and_chat(Some(&update));
        (user.map(|u| u.id), chat.map(|c| c.id))
    }

    #[test]
    fn messages_carry_user_and_chat() {
        assert_eq!(ids("message", message()), (Some(11), Some(-22)));
        assert_eq!(ids("edited_message", message()), (Some(11), Some(-22)));
    }

    #[test]
    fn message_without_sender_has_no_user() {
        assert_eq!(ids("message", json!({ "message_id": 1, "chat": chat() })), (None, Some(-22)));
    }

    #[test]
    fn channel_posts_carry_only_chat() {
        assert_eq!(ids("channel_post", message()), (None, Some(-22)));
        assert_eq!(ids("edited_channel_post", message()), (None, Some(-22)));
    }

    #[test]
    fn queries_carry_only_user() {
        assert_eq!(ids("inline_query", json!({ "id": "q", "from": user(), "query": "", "offset": "" })), (Some(11), None));
        assert_eq!(ids("chosen_inline_result", json!({ "result_id": "r", "from": user(), "query": "" })), (Some(11), None));
        assert_eq!(ids("shipping_query", json!({ "id": "s", "from": user(), "invoice_payload": "p" })), (Some(11), None));
        assert_eq!(
            ids("pre_checkout_query", json!({ "id": "p", "from": user(), "currency": "EUR", "total_amount": 100, "invoice_payload": "p" })),
            (Some(11), None)
        );
    }

    #[test]
    fn callback_query_drills_into_its_message() {
        assert_eq!(ids("callback_query", json!({ "id": "c", "from": user(), "message": message() })), (Some(11), Some(-22)));
        assert_eq!(ids("callback_query", json!({ "id": "c", "from": user(), "inline_message_id": "i" })), (Some(11), None));
    }

    #[test]
    fn polls_and_unknown_updates_carry_nothing() {
        assert_eq!(ids("poll", json!({ "id": "p", "question": "?" })), (None, None));
        assert_eq!(ids("poll_answer", json!({ "poll_id": "p", "user": user(), "option_ids": [0] })), (None, None));
        assert_eq!(ids("my_chat_member", json!({ "chat": chat(), "from": user() })), (None, None));
        assert_eq!(user_and_chat(None), (None, None));
    }
}
