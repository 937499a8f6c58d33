use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Mutex as AsyncMutex;

use crate::domains::bot::models::{ChatSession, ConversationState};

/// 채팅별 세션 저장소
/// Per-chat sessions. Holding a chat's lock for the whole handling of an event
/// serialises that chat's updates while other chats proceed in parallel.
/// Only chats with a flow in progress keep an entry; idle sessions are released.
#[derive(Default)]
pub struct SessionStore {
    sessions: Mutex<HashMap<i64, Arc<AsyncMutex<ChatSession>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 세션 핸들 (없으면 Idle로 생성)
    pub fn session(&self, chat_id: i64) -> Arc<AsyncMutex<ChatSession>> {
        self.sessions
            .lock()
            .entry(chat_id)
            .or_insert_with(|| Arc::new(AsyncMutex::new(ChatSession::default())))
            .clone()
    }

    /// 현재 세션 복사본 (없으면 Idle, 새로 만들지 않음)
    pub async fn snapshot(&self, chat_id: i64) -> ChatSession {
        let handle = self.sessions.lock().get(&chat_id).cloned();
        match handle {
            Some(handle) => handle.lock().await.clone(),
            None => ChatSession::default(),
        }
    }

    /// Idle 세션 정리 (다른 곳에서 핸들을 잡고 있으면 유지)
    pub fn release_if_idle(&self, chat_id: i64) {
        let mut sessions = self.sessions.lock();
        let idle = match sessions.get(&chat_id) {
            Some(handle) => {
                Arc::strong_count(handle) == 1
                    && handle
                        .try_lock()
                        .map(|session| session.state == ConversationState::Idle)
                        .unwrap_or(false)
            }
            None => false,
        };
        if idle {
            sessions.remove(&chat_id);
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.lock().is_empty()
    }
}
