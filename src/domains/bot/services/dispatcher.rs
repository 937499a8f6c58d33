use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

use crate::domains::bot::models::{BotReply, InboundEvent, Update};
use crate::domains::bot::services::ConversationRouter;
use crate::shared::clients::TelegramClient;
use crate::shared::errors::TelegramError;

/// getUpdates 실패 시 재시도 대기 시간
const RETRY_BACKOFF: Duration = Duration::from_secs(3);

/// 업데이트 디스패처
/// Update Dispatcher
///
/// 역할:
/// - getUpdates long polling으로 업데이트 수신
/// - 채팅별 워커 큐에 전달 (같은 채팅은 도착 순서대로, 다른 채팅은 병렬로 처리)
/// - 라우터 응답을 sendMessage / editMessageText로 전송
pub struct UpdateDispatcher {
    telegram: TelegramClient,
    router: Arc<ConversationRouter>,
}

impl UpdateDispatcher {
    pub fn new(telegram: TelegramClient, router: Arc<ConversationRouter>) -> Self {
        Self { telegram, router }
    }

    /// Ctrl-C가 들어올 때까지 polling
    pub async fn run(&self) {
        info!("Update dispatcher started");
        tokio::select! {
            _ = self.poll_loop() => {}
            _ = tokio::signal::ctrl_c() => {
                info!("Shutdown signal received, stopping dispatcher");
            }
        }
    }

    async fn poll_loop(&self) {
        let mut offset: Option<i64> = None;
        let mut workers = ChatWorkers::new(self.telegram.clone(), self.router.clone());

        loop {
            let updates = match self.telegram.get_updates(offset).await {
                Ok(updates) => updates,
                Err(e) => {
                    warn!(error = %e, "getUpdates failed, retrying");
                    sleep(RETRY_BACKOFF).await;
                    continue;
                }
            };

            for update in updates {
                // 다음 요청에서 이 업데이트까지 확인 처리
                offset = Some(next_offset(offset, update.update_id));
                workers.dispatch(update);
            }
            workers.prune_idle();
        }
    }
}

struct ChatWorker {
    sender: mpsc::UnboundedSender<Update>,
    // 큐에 넣었지만 아직 처리가 끝나지 않은 업데이트 수
    pending: Arc<AtomicUsize>,
    handle: JoinHandle<()>,
}

/// 채팅별 워커 (채팅 하나에 태스크 하나, 업데이트는 mpsc 큐로 순서 보장)
/// One task per active chat; updates of a chat are handled strictly in arrival order.
pub struct ChatWorkers {
    telegram: TelegramClient,
    router: Arc<ConversationRouter>,
    workers: HashMap<i64, ChatWorker>,
}

impl ChatWorkers {
    pub fn new(telegram: TelegramClient, router: Arc<ConversationRouter>) -> Self {
        Self {
            telegram,
            router,
            workers: HashMap::new(),
        }
    }

    /// 업데이트를 해당 채팅의 큐에 넣음 (워커가 없으면 생성)
    pub fn dispatch(&mut self, update: Update) {
        let Some(chat_id) = update.chat_id() else {
            debug!(update_id = update.update_id, "Skipping update without chat");
            return;
        };

        let worker = self
            .workers
            .entry(chat_id)
            .or_insert_with(|| spawn_worker(chat_id, self.telegram.clone(), self.router.clone()));

        worker.pending.fetch_add(1, Ordering::SeqCst);
        if let Err(mpsc::error::SendError(update)) = worker.sender.send(update) {
            // 워커가 비정상 종료된 경우 새로 띄워서 재전송
            warn!(chat_id, "Chat worker stopped, restarting");
            let worker = spawn_worker(chat_id, self.telegram.clone(), self.router.clone());
            worker.pending.fetch_add(1, Ordering::SeqCst);
            let _ = worker.sender.send(update);
            self.workers.insert(chat_id, worker);
        }
    }

    /// 대기 중인 업데이트가 없는 워커 정리 (sender drop -> 워커 종료)
    /// Only the dispatcher enqueues, so a worker with nothing pending can be dropped safely.
    pub fn prune_idle(&mut self) {
        self.workers
            .retain(|_, worker| worker.pending.load(Ordering::SeqCst) > 0);
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workers.is_empty()
    }

    /// 큐에 남은 업데이트를 모두 처리한 뒤 종료
    pub async fn shutdown(self) {
        let handles: Vec<JoinHandle<()>> = self
            .workers
            .into_values()
            .map(|worker| {
                drop(worker.sender);
                worker.handle
            })
            .collect();

        for handle in handles {
            if let Err(e) = handle.await {
                error!(error = %e, "Chat worker panicked");
            }
        }
    }
}

fn spawn_worker(
    chat_id: i64,
    telegram: TelegramClient,
    router: Arc<ConversationRouter>,
) -> ChatWorker {
    let (sender, mut receiver) = mpsc::unbounded_channel::<Update>();
    let pending = Arc::new(AtomicUsize::new(0));
    let worker_pending = pending.clone();

    let handle = tokio::spawn(async move {
        while let Some(update) = receiver.recv().await {
            let update_id = update.update_id;
            if let Err(e) = process_update(&telegram, &router, update).await {
                error!(chat_id, update_id, error = %e, "Failed to deliver reply");
            }
            worker_pending.fetch_sub(1, Ordering::SeqCst);
        }
        debug!(chat_id, "Chat worker stopped");
    });

    ChatWorker {
        sender,
        pending,
        handle,
    }
}

/// offset은 마지막으로 받은 update_id + 1 (감소하지 않음)
pub fn next_offset(current: Option<i64>, update_id: i64) -> i64 {
    current.unwrap_or(i64::MIN).max(update_id + 1)
}

/// 업데이트 1건 처리: 콜백 응답 -> 라우팅 -> 답장 전송
pub async fn process_update(
    telegram: &TelegramClient,
    router: &ConversationRouter,
    update: Update,
) -> Result<(), TelegramError> {
    if let Some(query) = &update.callback_query {
        // 버튼 로딩 표시 해제 (실패해도 처리는 계속)
        if let Err(e) = telegram.answer_callback_query(&query.id).await {
            warn!(callback_query_id = %query.id, error = %e, "answerCallbackQuery failed");
        }
    }

    let Some(event) = InboundEvent::from_update(&update) else {
        debug!(update_id = update.update_id, "Skipping update without text or data");
        return Ok(());
    };

    for reply in router.handle(event).await {
        deliver(telegram, &reply).await?;
    }
    Ok(())
}

async fn deliver(telegram: &TelegramClient, reply: &BotReply) -> Result<(), TelegramError> {
    if let Some(message_id) = reply.edit_message_id {
        match telegram
            .edit_message_text(reply.chat_id, message_id, &reply.text, reply.keyboard.as_ref())
            .await
        {
            Ok(()) => return Ok(()),
            Err(TelegramError::Api { description, .. })
                if description.contains("message is not modified") =>
            {
                return Ok(())
            }
            // 수정할 수 없는 메시지 (너무 오래됨 등)는 새 메시지로 전송
            Err(e) => warn!(chat_id = reply.chat_id, message_id, error = %e, "Edit failed, sending new message"),
        }
    }

    telegram
        .send_message(reply.chat_id, &reply.text, reply.keyboard.as_ref())
        .await?;
    Ok(())
}
