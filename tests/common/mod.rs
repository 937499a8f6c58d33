// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 체인/스왑/시세 클라이언트를 스크립트 가능한 가짜 구현으로 교체하고
//       메모리 지갑 저장소 위에 라우터를 조립
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let harness = TestHarness::new();
//     let replies = harness.router.handle(callback(USER, "generate_wallet")).await;
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use solana_sdk::{hash::Hash, pubkey::Pubkey, signer::keypair::Keypair, signer::Signer};

use wallet_bot::domains::bot::models::{BotReply, ChatKind, InboundEvent};
use wallet_bot::domains::bot::services::{ConversationRouter, SessionStore};
use wallet_bot::domains::swap::services::SwapService;
use wallet_bot::domains::wallet::services::WalletService;
use wallet_bot::shared::clients::{ChainClient, MarketData, SwapClient, TokenInfo, TransactionStatus};
use wallet_bot::shared::database::MemoryWalletRepository;
use wallet_bot::shared::errors::{ChainError, MarketDataError, SwapError};

// 테스트용 상수
pub const USER: i64 = 555;
pub const GROUP_CHAT: i64 = -1001;
pub const RECEIVER: &str = "7xKXtg2CW87d97TXJSDpbD5jBheTqA83TZRuJosgAsUa";
pub const TOKEN_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const SIGNATURE: &str = "5VERv8NMvzbJMEkV8xnrLkEaWRtSz9CosKDYjCJjBRnbJLgp8uirBgmQpjKhoR4tjF3ZpRzrFmBV6UjKdiSZkQUW";
pub const SOL_PRICE: f64 = 150.0;

/// 가짜 체인 클라이언트 (결과 스크립트 + 호출 기록)
pub struct FakeChain {
    pub balance: Mutex<Result<u64, ChainError>>,
    pub transfer_result: Mutex<Result<String, ChainError>>,
    pub status: Mutex<Result<Option<TransactionStatus>, ChainError>>,
    pub transfers: Mutex<Vec<(Pubkey, Pubkey, u64)>>,
}

impl Default for FakeChain {
    fn default() -> Self {
        Self {
            balance: Mutex::new(Ok(0)),
            transfer_result: Mutex::new(Ok(SIGNATURE.to_string())),
            status: Mutex::new(Ok(None)),
            transfers: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ChainClient for FakeChain {
    async fn get_balance(&self, _pubkey: &Pubkey) -> Result<u64, ChainError> {
        self.balance.lock().clone()
    }

    async fn transfer(
        &self,
        sender: &Keypair,
        receiver: &Pubkey,
        lamports: u64,
    ) -> Result<String, ChainError> {
        self.transfers.lock().push((sender.pubkey(), *receiver, lamports));
        self.transfer_result.lock().clone()
    }

    async fn get_transaction_status(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionStatus>, ChainError> {
        if signature.len() < 32 {
            return Err(ChainError::InvalidSignature(signature.to_string()));
        }
        self.status.lock().clone()
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ChainError> {
        Ok(Hash::default())
    }
}

/// 가짜 스왑 클라이언트
pub struct FakeSwap {
    pub result: Mutex<Option<SwapError>>,
    pub swaps: Mutex<Vec<(Pubkey, Pubkey, u64, u16)>>,
}

impl Default for FakeSwap {
    fn default() -> Self {
        Self {
            result: Mutex::new(None),
            swaps: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl SwapClient for FakeSwap {
    async fn swap(
        &self,
        sender: &Keypair,
        target_mint: &Pubkey,
        lamports: u64,
        slippage_bps: u16,
    ) -> Result<String, SwapError> {
        self.swaps
            .lock()
            .push((sender.pubkey(), *target_mint, lamports, slippage_bps));
        match self.result.lock().take() {
            Some(err) => Err(err),
            None => Ok(SIGNATURE.to_string()),
        }
    }
}

/// 가짜 시세 클라이언트
pub struct FakeMarket {
    pub price: Mutex<Option<f64>>,
    pub token: Mutex<Option<TokenInfo>>,
}

impl Default for FakeMarket {
    fn default() -> Self {
        Self {
            price: Mutex::new(Some(SOL_PRICE)),
            token: Mutex::new(None),
        }
    }
}

#[async_trait]
impl MarketData for FakeMarket {
    async fn usd_price(&self, mint: &str) -> Result<f64, MarketDataError> {
        (*self.price.lock()).ok_or_else(|| MarketDataError::MissingPrice(mint.to_string()))
    }

    async fn token_info(&self, _address: &str) -> Result<Option<TokenInfo>, MarketDataError> {
        Ok(self.token.lock().clone())
    }
}

/// 라우터 + 가짜 의존성 묶음
pub struct TestHarness {
    pub router: ConversationRouter,
    pub store: Arc<MemoryWalletRepository>,
    pub chain: Arc<FakeChain>,
    pub swap: Arc<FakeSwap>,
    pub market: Arc<FakeMarket>,
    pub wallet_service: WalletService,
}

impl TestHarness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryWalletRepository::new());
        let chain = Arc::new(FakeChain::default());
        let swap = Arc::new(FakeSwap::default());
        let market = Arc::new(FakeMarket::default());

        let wallet_service = WalletService::new(store.clone(), chain.clone(), market.clone());
        let swap_service = SwapService::new(wallet_service.clone(), swap.clone(), market.clone(), 100);
        let router = ConversationRouter::new(
            wallet_service.clone(),
            swap_service,
            Arc::new(SessionStore::new()),
            Some("devnet".to_string()),
        );

        Self {
            router,
            store,
            chain,
            swap,
            market,
            wallet_service,
        }
    }

    /// 이벤트 1건 처리 후 단일 응답 텍스트 반환
    pub async fn reply_text(&self, event: InboundEvent) -> String {
        let replies = self.router.handle(event).await;
        assert_eq!(replies.len(), 1, "expected exactly one reply, got {:?}", replies);
        replies[0].text.clone()
    }

    pub async fn handle(&self, event: InboundEvent) -> Vec<BotReply> {
        self.router.handle(event).await
    }

    /// 지갑 생성까지 완료된 상태
    pub async fn with_wallet(self) -> Self {
        self.wallet_service
            .generate_wallet(USER)
            .await
            .expect("Failed to generate wallet");
        self
    }
}

pub fn callback(chat_id: i64, data: &str) -> InboundEvent {
    InboundEvent::Callback {
        chat_id,
        user_id: USER,
        message_id: Some(42),
        data: data.to_string(),
    }
}

pub fn text(chat_id: i64, body: &str) -> InboundEvent {
    InboundEvent::Text {
        chat_id,
        chat_kind: if chat_id < 0 { ChatKind::Group } else { ChatKind::Private },
        user_id: USER,
        text: body.to_string(),
    }
}

pub fn command(chat_id: i64, name: &str, args: &str) -> InboundEvent {
    InboundEvent::Command {
        chat_id,
        chat_kind: if chat_id < 0 { ChatKind::Group } else { ChatKind::Private },
        user_id: USER,
        command: name.to_string(),
        args: args.to_string(),
    }
}
