use std::sync::Arc;

use tracing::info;

use crate::domains::swap::models::BuyOrder;
use crate::domains::wallet::services::WalletService;
use crate::shared::clients::{MarketData, SolanaClient, SwapClient, TokenInfo};
use crate::shared::errors::{MarketDataError, ServiceError, WalletError};

/// 스왑 서비스
/// SwapService: buys tokens with the user's custody wallet
#[derive(Clone)]
pub struct SwapService {
    wallet_service: WalletService,
    swap_client: Arc<dyn SwapClient>,
    market: Arc<dyn MarketData>,
    slippage_bps: u16,
}

impl SwapService {
    pub fn new(
        wallet_service: WalletService,
        swap_client: Arc<dyn SwapClient>,
        market: Arc<dyn MarketData>,
        slippage_bps: u16,
    ) -> Self {
        Self {
            wallet_service,
            swap_client,
            market,
            slippage_bps,
        }
    }

    pub fn buy_order(&self, token_mint: &str, lamports: u64) -> BuyOrder {
        BuyOrder {
            token_mint: token_mint.to_string(),
            lamports,
            slippage_bps: self.slippage_bps,
        }
    }

    /// 토큰 매수 (SOL -> 토큰)
    /// Spends `lamports` of the user's SOL on `token_mint`; returns the signature
    pub async fn buy_token(
        &self,
        user_id: i64,
        token_mint: &str,
        lamports: u64,
    ) -> Result<String, ServiceError> {
        if lamports == 0 {
            return Err(ServiceError::ZeroAmount);
        }
        let order = self.buy_order(token_mint, lamports);

        let wallet = self.wallet_service.get_wallet(user_id).await?;
        let sender = WalletService::signing_keypair(&wallet)?;
        let target = SolanaClient::parse_pubkey(&order.token_mint).ok_or_else(|| {
            WalletError::InvalidPublicKey { public_key: order.token_mint.clone() }
        })?;

        let signature = self
            .swap_client
            .swap(&sender, &target, order.lamports, order.slippage_bps)
            .await?;

        info!(user_id, token = %order.token_mint, lamports, "Token bought");
        Ok(signature)
    }

    /// 토큰 카드 정보
    pub async fn token_info(&self, token_mint: &str) -> Result<Option<TokenInfo>, MarketDataError> {
        self.market.token_info(token_mint).await
    }
}
