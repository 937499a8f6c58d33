use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::domains::bot::services::{ConversationRouter, SessionStore, UpdateDispatcher};
use crate::domains::swap::services::SwapService;
use crate::domains::wallet::services::WalletService;
use crate::shared::clients::{JupiterClient, MarketDataClient, SolanaClient, TelegramClient};
use crate::shared::config::Config;
use crate::shared::database::{Database, WalletRepository};

/// Application state (combines all services)
/// 애플리케이션 상태 (모든 서비스를 조합)
///
/// 역할: 설정과 DB 연결로 클라이언트/서비스/라우터를 한 번에 생성
#[derive(Clone)]
pub struct AppState {
    /// 데이터베이스 연결 (공유)
    pub db: Database,
    pub wallet_service: WalletService,
    pub swap_service: SwapService,
    pub router: Arc<ConversationRouter>,
    pub telegram: TelegramClient,
}

impl AppState {
    pub async fn new(config: &Config, db: Database) -> Result<Self> {
        // 1. 외부 클라이언트 생성
        let solana_client = SolanaClient::new(&config.rpc_url);
        if solana_client.is_connected().await {
            info!(rpc_url = %solana_client.rpc_url(), "Connected to Solana RPC");
        } else {
            // RPC 장애는 요청 단위로 처리되므로 시작은 계속
            warn!(rpc_url = %config.rpc_url, "Solana RPC is not reachable at startup");
        }

        let jupiter_client = JupiterClient::new(&config.jupiter_api_url, solana_client.clone())
            .context("Failed to create Jupiter client")?;
        let market_client = Arc::new(
            MarketDataClient::new(&config.price_api_url, &config.token_info_api_url)
                .context("Failed to create market data client")?,
        );
        let telegram = TelegramClient::new(
            &config.telegram_api_url,
            &config.bot_token,
            config.poll_timeout_secs,
        )
        .context("Failed to create Telegram client")?;

        // 2. 서비스 생성
        let store = Arc::new(WalletRepository::new(db.pool().clone()));
        let wallet_service =
            WalletService::new(store, Arc::new(solana_client), market_client.clone());
        let swap_service = SwapService::new(
            wallet_service.clone(),
            Arc::new(jupiter_client),
            market_client,
            config.swap_slippage_bps,
        );

        // 3. 라우터 (세션은 메모리에만 유지)
        let router = Arc::new(ConversationRouter::new(
            wallet_service.clone(),
            swap_service.clone(),
            Arc::new(SessionStore::new()),
            config.explorer_cluster.clone(),
        ));

        Ok(Self {
            db,
            wallet_service,
            swap_service,
            router,
            telegram,
        })
    }

    pub fn dispatcher(&self) -> UpdateDispatcher {
        UpdateDispatcher::new(self.telegram.clone(), self.router.clone())
    }
}
