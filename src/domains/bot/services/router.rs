use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::domains::bot::models::{
    buy_menu, main_menu, wallet_menu, BotReply, CallbackAction, ChatKind, ChatSession,
    ConversationState, InboundEvent, TradeFlow,
};
use crate::domains::bot::services::SessionStore;
use crate::domains::swap::services::SwapService;
use crate::domains::wallet::models::GeneratedWallet;
use crate::domains::wallet::services::WalletService;
use crate::shared::clients::{TokenInfo, TransactionStatus};
use crate::shared::config::explorer_tx_url;
use crate::shared::errors::{ChainError, ServiceError, WalletError};
use crate::shared::utils::{
    classify_text, escape_dots, escape_markdown, lamports_to_sol_display, sol_to_lamports,
    TextInput,
};

pub const GREETING: &str = "Hello\\! This is Crypto Bot\\.";
pub const MAIN_MENU_TEXT: &str = "Hello\\! This is Crypto Bot, how can I help\\.";
pub const WALLET_MENU_TEXT: &str = "Manage Wallet";
pub const INSUFFICIENT_BALANCE: &str = "🔴 Insufficient Balance";
pub const TRANSFER_TECHNICAL_ISSUE: &str = "There is some technical issue while sending SOL";
pub const BUY_TECHNICAL_ISSUE: &str = "There is some technical issue while buying the token";
pub const NETWORK_UNREACHABLE: &str =
    "⚠️ The Solana network could not be reached\\. Please try again later\\.";
pub const NO_WALLET: &str = "You don't have any wallet";
pub const NO_TRANSACTION_TYPE: &str = "You have not selected transaction type for the transaction";
pub const NO_PENDING_ADDRESS: &str = "No public key has been setup for txn";

/// 대화 라우터
/// Conversation Router: consults the chat's state, calls the services and
/// formats replies. Failures become replies; nothing here returns an error.
#[derive(Clone)]
pub struct ConversationRouter {
    wallet_service: WalletService,
    swap_service: SwapService,
    sessions: Arc<SessionStore>,
    explorer_cluster: Option<String>,
}

impl ConversationRouter {
    pub fn new(
        wallet_service: WalletService,
        swap_service: SwapService,
        sessions: Arc<SessionStore>,
        explorer_cluster: Option<String>,
    ) -> Self {
        Self {
            wallet_service,
            swap_service,
            sessions,
            explorer_cluster,
        }
    }

    pub fn sessions(&self) -> &Arc<SessionStore> {
        &self.sessions
    }

    /// 이벤트 처리 (채팅 세션 락을 잡은 상태로 끝까지 진행)
    /// Handles one event while holding its chat's session lock
    pub async fn handle(&self, event: InboundEvent) -> Vec<BotReply> {
        let chat_id = event.chat_id();
        let handle = self.sessions.session(chat_id);
        let mut session = handle.lock().await;

        let replies = match event {
            InboundEvent::Command { chat_id, user_id, command, args, .. } => {
                self.handle_command(&mut session, chat_id, user_id, &command, &args)
                    .await
            }
            InboundEvent::Callback { chat_id, user_id, message_id, data } => {
                self.handle_callback(&mut session, chat_id, user_id, message_id, &data)
                    .await
            }
            InboundEvent::Text { chat_id, chat_kind, user_id, text } => {
                if chat_kind == ChatKind::Group {
                    debug!(chat_id, "Ignoring group chat text");
                    Vec::new()
                } else {
                    self.handle_text(&mut session, chat_id, user_id, &text).await
                }
            }
        };

        drop(session);
        drop(handle);
        self.sessions.release_if_idle(chat_id);
        replies
    }

    async fn handle_command(
        &self,
        session: &mut ChatSession,
        chat_id: i64,
        user_id: i64,
        command: &str,
        args: &str,
    ) -> Vec<BotReply> {
        match command {
            "start" | "main" => {
                session.reset();
                vec![BotReply::text(chat_id, GREETING).with_keyboard(main_menu())]
            }
            "cancel" => {
                session.reset();
                vec![BotReply::text(chat_id, "Cancelled\\. Back to the main menu\\.")
                    .with_keyboard(main_menu())]
            }
            "status" => vec![self.transaction_status_reply(chat_id, args).await],
            other => {
                debug!(chat_id, user_id, command = other, "Ignoring unknown command");
                Vec::new()
            }
        }
    }

    async fn handle_callback(
        &self,
        session: &mut ChatSession,
        chat_id: i64,
        user_id: i64,
        message_id: Option<i64>,
        data: &str,
    ) -> Vec<BotReply> {
        let Some(action) = CallbackAction::from_token(data) else {
            warn!(chat_id, data, "Unknown callback token");
            return Vec::new();
        };
        debug!(chat_id, user_id, action = action.token(), "Button pressed");

        let reply = match action {
            CallbackAction::Wallet => BotReply::text(chat_id, WALLET_MENU_TEXT)
                .with_keyboard(wallet_menu())
                .editing(message_id),
            CallbackAction::BackToMain => BotReply::text(chat_id, MAIN_MENU_TEXT)
                .with_keyboard(main_menu())
                .editing(message_id),
            CallbackAction::BuyToken => {
                session.state = ConversationState::AwaitingBuyAddress;
                BotReply::text(chat_id, "Enter token address to continue:").editing(message_id)
            }
            CallbackAction::TransferToken => {
                session.state = ConversationState::AwaitingTransferAddress;
                BotReply::text(chat_id, "Enter receiver's public key to continue:")
                    .editing(message_id)
            }
            CallbackAction::SendSol | CallbackAction::WithdrawSol => {
                session.state = ConversationState::AwaitingTransferAddress;
                BotReply::text(chat_id, "Enter receiver's public key to send SOL to")
            }
            CallbackAction::Positions => {
                BotReply::text(chat_id, "You clicked positions").editing(message_id)
            }
            CallbackAction::Settings => {
                BotReply::text(chat_id, "You clicked settings").editing(message_id)
            }
            CallbackAction::GenerateWallet => self.generate_wallet_reply(chat_id, user_id).await,
            CallbackAction::ExportPrivateKey => self.export_reply(chat_id, user_id).await,
            CallbackAction::GetBalance => self.balance_reply(chat_id, user_id).await,
            CallbackAction::BuyCustomAmount => match session.state.flow() {
                Some(TradeFlow::Buy) if session.state.pending_public_key().is_some() => {
                    BotReply::text(chat_id, "Please enter the amount of SOL you want to swap:")
                }
                _ => BotReply::text(chat_id, no_token_selected()),
            },
            CallbackAction::QuickBuy(amount) => match &session.state {
                ConversationState::AwaitingAmount { flow: TradeFlow::Buy, address } => {
                    let address = address.clone();
                    let reply = self
                        .execute(TradeFlow::Buy, chat_id, user_id, &address, amount.lamports())
                        .await;
                    session.reset();
                    reply
                }
                _ => BotReply::text(chat_id, no_token_selected()),
            },
        };

        vec![reply]
    }

    async fn handle_text(
        &self,
        session: &mut ChatSession,
        chat_id: i64,
        user_id: i64,
        text: &str,
    ) -> Vec<BotReply> {
        let reply = match classify_text(text) {
            TextInput::PublicKey(public_key) => match session.state.flow() {
                Some(flow) => {
                    session.state = ConversationState::AwaitingAmount {
                        flow,
                        address: public_key.clone(),
                    };
                    info!(chat_id, ?flow, address = %public_key, "Address captured");
                    self.address_captured_reply(chat_id, flow, &public_key).await
                }
                None => {
                    session.reset();
                    BotReply::text(
                        chat_id,
                        format!(
                            "You have not selected transaction type for the specified pubkey: `{}`",
                            public_key
                        ),
                    )
                }
            },
            TextInput::Amount(amount) => match &session.state {
                ConversationState::AwaitingAmount { flow, address } => {
                    let (flow, address) = (*flow, address.clone());
                    match sol_to_lamports(&amount) {
                        None => BotReply::text(chat_id, "That amount is not valid\\."),
                        Some(0) => {
                            BotReply::text(chat_id, "Amount must be greater than zero\\.")
                        }
                        Some(lamports) => {
                            let reply = self
                                .execute(flow, chat_id, user_id, &address, lamports)
                                .await;
                            session.reset();
                            reply
                        }
                    }
                }
                ConversationState::AwaitingBuyAddress
                | ConversationState::AwaitingTransferAddress => {
                    BotReply::text(chat_id, NO_PENDING_ADDRESS)
                }
                ConversationState::Idle => BotReply::text(chat_id, NO_TRANSACTION_TYPE),
            },
            TextInput::Percentage(percentage) => BotReply::text(
                chat_id,
                format!("Percentage set to {}\\% SOL", escape_dots(percentage)),
            ),
            TextInput::Other => BotReply::text(chat_id, escape_markdown(text)),
        };

        vec![reply]
    }

    /// 주소 입력 완료 응답 (매수: 토큰 카드 + 매수 버튼)
    async fn address_captured_reply(&self, chat_id: i64, flow: TradeFlow, address: &str) -> BotReply {
        match flow {
            TradeFlow::Transfer => BotReply::text(
                chat_id,
                format!("Enter amount of SOL to send to `{}`", address),
            ),
            TradeFlow::Buy => {
                let prompt = format!("Enter amount to proceed for token: `{}`", address);
                let text = match self.swap_service.token_info(address).await {
                    Ok(Some(info)) => format!("{}\n\n{}", token_card(address, &info), prompt),
                    Ok(None) => prompt,
                    Err(e) => {
                        warn!(chat_id, address, error = %e, "Token info lookup failed");
                        prompt
                    }
                };
                BotReply::text(chat_id, text).with_keyboard(buy_menu())
            }
        }
    }

    /// 전송/매수 실행 (결과와 상관없이 호출 후 상태는 Idle로 초기화됨)
    async fn execute(
        &self,
        flow: TradeFlow,
        chat_id: i64,
        user_id: i64,
        address: &str,
        lamports: u64,
    ) -> BotReply {
        let result = match flow {
            TradeFlow::Transfer => {
                self.wallet_service
                    .transfer_sol(user_id, address, lamports)
                    .await
            }
            TradeFlow::Buy => self.swap_service.buy_token(user_id, address, lamports).await,
        };

        match result {
            Ok(signature) => {
                info!(chat_id, user_id, ?flow, lamports, %signature, "Transaction submitted");
                let url = explorer_tx_url(&signature, self.explorer_cluster.as_deref());
                let text = match flow {
                    TradeFlow::Transfer => format!("[SOL]({}) sent successfully", url),
                    TradeFlow::Buy => format!("[SOL]({}) buy successfully", url),
                };
                BotReply::text(chat_id, text)
            }
            Err(e) => {
                warn!(chat_id, user_id, ?flow, lamports, error = %e, "Transaction failed");
                BotReply::text(chat_id, failure_message(flow, &e))
            }
        }
    }

    async fn generate_wallet_reply(&self, chat_id: i64, user_id: i64) -> BotReply {
        let wallet = match self.wallet_service.generate_wallet(user_id).await {
            Ok(wallet) => wallet,
            Err(e) => {
                error!(chat_id, user_id, error = %e, "Wallet generation failed");
                return BotReply::text(chat_id, e.user_message());
            }
        };

        let public_key = &wallet.record().public_key;
        let text = match wallet {
            GeneratedWallet::Created(_) => format!(
                "🎉 Wallet generated\n*Public Key*: _`{}`_ \\(Tap to copy\\)",
                public_key
            ),
            GeneratedWallet::Existing(_) => format!(
                "A wallet is already created with your account\\.\n\
                 Currently we support only one wallet per user\n\
                 Your *Public Key*: _`{}`_ \\(Tap to copy\\)",
                public_key
            ),
        };
        BotReply::text(chat_id, text)
    }

    async fn export_reply(&self, chat_id: i64, user_id: i64) -> BotReply {
        match self.wallet_service.export_keypair(user_id).await {
            Ok(keypair) => BotReply::text(
                chat_id,
                format!("*Private Key*: _`{}`_ \\(Tap to copy\\)", keypair),
            ),
            Err(WalletError::NotFound { .. }) => BotReply::text(chat_id, NO_WALLET),
            Err(e) => {
                error!(chat_id, user_id, error = %e, "Private key export failed");
                BotReply::text(chat_id, e.user_message())
            }
        }
    }

    async fn balance_reply(&self, chat_id: i64, user_id: i64) -> BotReply {
        match self.wallet_service.get_balance(user_id).await {
            Ok(balance) => {
                let sol = lamports_to_sol_display(balance.lamports);
                let usd = balance
                    .usd
                    .map(escape_dots)
                    .unwrap_or_else(|| "unknown".to_string());
                BotReply::text(
                    chat_id,
                    format!(
                        "*Wallet Balance*\n`{}` _\\(Tap to copy\\)_ \nBalance: {} SOL  \\(💲{}\\)",
                        balance.public_key,
                        escape_dots(sol),
                        usd
                    ),
                )
            }
            Err(ServiceError::Wallet(WalletError::NotFound { .. })) => {
                BotReply::text(chat_id, NO_WALLET)
            }
            Err(ServiceError::Chain(e)) => {
                warn!(chat_id, user_id, error = %e, "Balance unknown");
                BotReply::text(
                    chat_id,
                    "⚠️ Balance unknown: the Solana network could not be reached\\. Please try again later\\.",
                )
            }
            Err(e) => {
                error!(chat_id, user_id, error = %e, "Balance lookup failed");
                BotReply::text(chat_id, generic_failure(&e))
            }
        }
    }

    async fn transaction_status_reply(&self, chat_id: i64, signature: &str) -> BotReply {
        if signature.is_empty() {
            return BotReply::text(chat_id, "Usage: `/status <signature>`");
        }

        match self.wallet_service.get_transaction_status(signature).await {
            Ok(Some(TransactionStatus::Succeeded)) => {
                BotReply::text(chat_id, "✅ Transaction confirmed")
            }
            Ok(Some(TransactionStatus::Failed(reason))) => BotReply::text(
                chat_id,
                format!("🔴 Transaction failed: {}", escape_markdown(&reason)),
            ),
            Ok(None) => BotReply::text(chat_id, "Transaction not found yet\\."),
            Err(ServiceError::Chain(ChainError::InvalidSignature(_))) => {
                BotReply::text(chat_id, "That is not a valid transaction signature\\.")
            }
            Err(e) => {
                warn!(chat_id, error = %e, "Transaction status lookup failed");
                BotReply::text(chat_id, NETWORK_UNREACHABLE)
            }
        }
    }
}

fn no_token_selected() -> &'static str {
    "No token selected\\. Tap *Buy Tokens* and enter the token address first\\."
}

/// 토큰 카드 (DexScreener 정보)
fn token_card(address: &str, info: &TokenInfo) -> String {
    let price = info
        .price_usd
        .as_deref()
        .map(escape_markdown)
        .unwrap_or_else(|| "N/A".to_string());
    let fdv = info
        .fdv
        .map(|fdv| escape_markdown(&fdv.to_string()))
        .unwrap_or_else(|| "N/A".to_string());

    format!(
        "{} \\- {} [📈](https://dexscreener.com/solana/{})\n\
         `{}` _\\(Tap to copy\\)_ \n\n\
         *Price \\(USD\\):* {}\n\
         *FDV:* {}",
        escape_markdown(&info.symbol),
        escape_markdown(&info.name),
        address,
        address,
        price,
        fdv
    )
}

/// 실패 사유별 사용자 메시지 (잔액 부족과 기타 실패를 구분)
/// Reply text for a failed transfer or buy
pub fn failure_message(flow: TradeFlow, err: &ServiceError) -> String {
    if err.is_insufficient_funds() {
        return INSUFFICIENT_BALANCE.to_string();
    }

    match err {
        ServiceError::Wallet(WalletError::NotFound { .. }) => match flow {
            TradeFlow::Transfer => "You don't have any wallet to send SOL".to_string(),
            TradeFlow::Buy => "You don't have any wallet to buy tokens".to_string(),
        },
        ServiceError::Chain(ChainError::RpcUnavailable(_)) => NETWORK_UNREACHABLE.to_string(),
        ServiceError::Wallet(e) => e.user_message().to_string(),
        ServiceError::ZeroAmount => "Amount must be greater than zero\\.".to_string(),
        _ => match flow {
            TradeFlow::Transfer => TRANSFER_TECHNICAL_ISSUE.to_string(),
            TradeFlow::Buy => BUY_TECHNICAL_ISSUE.to_string(),
        },
    }
}

fn generic_failure(err: &ServiceError) -> String {
    match err {
        ServiceError::Wallet(e) => e.user_message().to_string(),
        _ => NETWORK_UNREACHABLE.to_string(),
    }
}
