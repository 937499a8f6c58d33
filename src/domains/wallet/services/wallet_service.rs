use std::sync::Arc;

use chrono::Utc;
use solana_sdk::signer::keypair::Keypair;
use solana_sdk::signer::Signer;
use tracing::{info, warn};

use crate::domains::swap::models::SOL_MINT;
use crate::domains::wallet::models::{GeneratedWallet, WalletBalance, WalletRecord};
use crate::shared::clients::{ChainClient, MarketData, SolanaClient, TransactionStatus};
use crate::shared::database::WalletStore;
use crate::shared::errors::{ServiceError, WalletError};
use crate::shared::utils::{encode_key, keypair_from_encoded, lamports_to_sol_display, usd_value};

/// 지갑 서비스
/// WalletService: wallet generation, export, balance and SOL transfers
#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn WalletStore>,
    chain: Arc<dyn ChainClient>,
    market: Arc<dyn MarketData>,
}

impl WalletService {
    pub fn new(
        store: Arc<dyn WalletStore>,
        chain: Arc<dyn ChainClient>,
        market: Arc<dyn MarketData>,
    ) -> Self {
        Self { store, chain, market }
    }

    /// 새 지갑 생성 (사용자당 1개)
    /// Creates the user's wallet, or returns the one already stored.
    pub async fn generate_wallet(&self, user_id: i64) -> Result<GeneratedWallet, WalletError> {
        // 1. 기존 지갑 확인
        if let Some(existing) = self.store.get_by_user_id(user_id).await? {
            info!(user_id, "Wallet already exists");
            return Ok(GeneratedWallet::Existing(existing));
        }

        // 2. Keypair 생성 및 인코딩
        let keypair = SolanaClient::generate_wallet();
        let record = WalletRecord {
            user_id,
            private_key: encode_key(&keypair.to_bytes()),
            public_key: keypair.pubkey().to_string(),
            keypair: keypair.to_base58_string(),
            created_at: Utc::now(),
        };

        // 3. 저장 (PRIMARY KEY가 동시 생성 경쟁을 막음)
        match self.store.insert(&record).await {
            Ok(()) => {
                info!(user_id, public_key = %record.public_key, "Wallet generated");
                Ok(GeneratedWallet::Created(record))
            }
            Err(WalletError::AlreadyExists { .. }) => {
                warn!(user_id, "Concurrent wallet generation, returning stored wallet");
                self.store
                    .get_by_user_id(user_id)
                    .await?
                    .map(GeneratedWallet::Existing)
                    .ok_or(WalletError::NotFound { user_id })
            }
            Err(e) => Err(e),
        }
    }

    /// 지갑 조회 (없으면 NotFound)
    pub async fn get_wallet(&self, user_id: i64) -> Result<WalletRecord, WalletError> {
        self.store
            .get_by_user_id(user_id)
            .await?
            .ok_or(WalletError::NotFound { user_id })
    }

    /// Export용 base58 keypair 문자열
    pub async fn export_keypair(&self, user_id: i64) -> Result<String, WalletError> {
        Ok(self.get_wallet(user_id).await?.keypair)
    }

    /// 서명용 Keypair 복원
    /// Decode the stored private key into a signing keypair
    pub fn signing_keypair(record: &WalletRecord) -> Result<Keypair, WalletError> {
        keypair_from_encoded(&record.private_key)
    }

    /// 지갑 잔액 조회 (lamports + USD)
    /// RPC failure is an error ("unknown"); a failed price lookup only drops the USD value.
    pub async fn get_balance(&self, user_id: i64) -> Result<WalletBalance, ServiceError> {
        let wallet = self.get_wallet(user_id).await?;
        let pubkey = SolanaClient::parse_pubkey(&wallet.public_key).ok_or_else(|| {
            WalletError::InvalidPublicKey { public_key: wallet.public_key.clone() }
        })?;

        let lamports = self.chain.get_balance(&pubkey).await?;

        let usd = match self.market.usd_price(SOL_MINT).await {
            Ok(price) => usd_value(lamports_to_sol_display(lamports), price),
            Err(e) => {
                warn!(user_id, error = %e, "SOL price lookup failed");
                None
            }
        };

        Ok(WalletBalance {
            public_key: wallet.public_key,
            lamports,
            usd,
        })
    }

    /// SOL 전송
    /// Transfer SOL from the user's wallet to `to_public_key`
    pub async fn transfer_sol(
        &self,
        user_id: i64,
        to_public_key: &str,
        amount_lamports: u64,
    ) -> Result<String, ServiceError> {
        if amount_lamports == 0 {
            return Err(ServiceError::ZeroAmount);
        }

        // 1. 송신 지갑 조회 및 Keypair 복원
        let wallet = self.get_wallet(user_id).await?;
        let sender = Self::signing_keypair(&wallet)?;

        // 2. 수신 Public Key 파싱
        let receiver = SolanaClient::parse_pubkey(to_public_key).ok_or_else(|| {
            WalletError::InvalidPublicKey { public_key: to_public_key.to_string() }
        })?;

        // 3. 전송
        let signature = self.chain.transfer(&sender, &receiver, amount_lamports).await?;
        Ok(signature)
    }

    /// 트랜잭션 상태 확인
    pub async fn get_transaction_status(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionStatus>, ServiceError> {
        Ok(self.chain.get_transaction_status(signature).await?)
    }
}
