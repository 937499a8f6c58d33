use super::telegram::{InlineKeyboardMarkup, Update};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatKind {
    Private,
    Group,
}

impl ChatKind {
    pub fn from_telegram(kind: &str) -> Self {
        if kind == "private" {
            ChatKind::Private
        } else {
            ChatKind::Group
        }
    }
}

/// 라우터로 들어오는 채팅 이벤트
/// Inbound chat event, already stripped of Telegram specifics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundEvent {
    Command {
        chat_id: i64,
        chat_kind: ChatKind,
        user_id: i64,
        command: String,
        args: String,
    },
    Callback {
        chat_id: i64,
        user_id: i64,
        message_id: Option<i64>,
        data: String,
    },
    Text {
        chat_id: i64,
        chat_kind: ChatKind,
        user_id: i64,
        text: String,
    },
}

impl InboundEvent {
    pub fn chat_id(&self) -> i64 {
        match self {
            InboundEvent::Command { chat_id, .. }
            | InboundEvent::Callback { chat_id, .. }
            | InboundEvent::Text { chat_id, .. } => *chat_id,
        }
    }

    /// Telegram Update -> InboundEvent. Updates without text or data are dropped.
    pub fn from_update(update: &Update) -> Option<Self> {
        if let Some(query) = &update.callback_query {
            let chat_id = update.chat_id().unwrap_or(query.from.id);
            return Some(InboundEvent::Callback {
                chat_id,
                user_id: query.from.id,
                message_id: query.message.as_ref().map(|m| m.message_id),
                data: query.data.clone()?,
            });
        }

        let message = update.message.as_ref()?;
        let text = message.text.as_ref()?;
        let chat_id = message.chat.id;
        let chat_kind = ChatKind::from_telegram(&message.chat.kind);
        let user_id = message.from.as_ref().map(|u| u.id).unwrap_or(chat_id);

        if let Some(command_line) = text.strip_prefix('/') {
            let (head, args) = command_line
                .split_once(char::is_whitespace)
                .unwrap_or((command_line, ""));
            // "/main@my_bot" 형식
            let command = head.split('@').next().unwrap_or(head).to_lowercase();
            return Some(InboundEvent::Command {
                chat_id,
                chat_kind,
                user_id,
                command,
                args: args.trim().to_string(),
            });
        }

        Some(InboundEvent::Text {
            chat_id,
            chat_kind,
            user_id,
            text: text.clone(),
        })
    }
}

/// 라우터가 돌려주는 응답
/// Outbound reply: a new message, or an edit of the message that carried the button
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub chat_id: i64,
    pub text: String,
    pub keyboard: Option<InlineKeyboardMarkup>,
    pub edit_message_id: Option<i64>,
}

impl BotReply {
    pub fn text(chat_id: i64, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            keyboard: None,
            edit_message_id: None,
        }
    }

    pub fn with_keyboard(mut self, keyboard: InlineKeyboardMarkup) -> Self {
        self.keyboard = Some(keyboard);
        self
    }

    /// 원본 메시지가 있으면 수정, 없으면 새 메시지
    pub fn editing(mut self, message_id: Option<i64>) -> Self {
        self.edit_message_id = message_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(json: serde_json::Value) -> Update {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn test_text_message_event() {
        let event = InboundEvent::from_update(&update(serde_json::json!({
            "update_id": 1,
            "message": {
                "message_id": 10,
                "chat": {"id": 555, "type": "private"},
                "from": {"id": 555, "username": "alice"},
                "text": "1.5"
            }
        })));

        assert_eq!(
            event,
            Some(InboundEvent::Text {
                chat_id: 555,
                chat_kind: ChatKind::Private,
                user_id: 555,
                text: "1.5".to_string(),
            })
        );
    }

    #[test]
    fn test_command_with_bot_suffix_and_args() {
        let event = InboundEvent::from_update(&update(serde_json::json!({
            "update_id": 2,
            "message": {
                "message_id": 11,
                "chat": {"id": -100, "type": "supergroup"},
                "from": {"id": 7},
                "text": "/Status@crypto_bot  abc123 "
            }
        })));

        assert_eq!(
            event,
            Some(InboundEvent::Command {
                chat_id: -100,
                chat_kind: ChatKind::Group,
                user_id: 7,
                command: "status".to_string(),
                args: "abc123".to_string(),
            })
        );
    }

    #[test]
    fn test_callback_event() {
        let event = InboundEvent::from_update(&update(serde_json::json!({
            "update_id": 3,
            "callback_query": {
                "id": "cb1",
                "from": {"id": 555},
                "message": {"message_id": 12, "chat": {"id": 555, "type": "private"}},
                "data": "wallet"
            }
        })));

        assert_eq!(
            event,
            Some(InboundEvent::Callback {
                chat_id: 555,
                user_id: 555,
                message_id: Some(12),
                data: "wallet".to_string(),
            })
        );
    }

    #[test]
    fn test_non_text_message_dropped() {
        let event = InboundEvent::from_update(&update(serde_json::json!({
            "update_id": 4,
            "message": {"message_id": 13, "chat": {"id": 1, "type": "private"}}
        })));
        assert_eq!(event, None);
    }
}
