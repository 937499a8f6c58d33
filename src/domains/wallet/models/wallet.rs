use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 지갑 레코드 (사용자당 1개)
/// Custody wallet stored for one chat user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletRecord {
    /// Telegram user/chat ID (unique)
    pub user_id: i64,

    /// 64-byte keypair, base64 encoded
    pub private_key: String,

    /// Base58 public key
    pub public_key: String,

    /// Base58 keypair string, shown on export
    pub keypair: String,

    pub created_at: DateTime<Utc>,
}

/// 지갑 부분 업데이트 (None 필드는 유지)
/// Partial update merged into an existing record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalletUpdate {
    pub private_key: Option<String>,
    pub public_key: Option<String>,
    pub keypair: Option<String>,
}

impl WalletUpdate {
    pub fn is_empty(&self) -> bool {
        self.private_key.is_none() && self.public_key.is_none() && self.keypair.is_none()
    }

    pub fn apply(&self, record: &mut WalletRecord) {
        if let Some(private_key) = &self.private_key {
            record.private_key = private_key.clone();
        }
        if let Some(public_key) = &self.public_key {
            record.public_key = public_key.clone();
        }
        if let Some(keypair) = &self.keypair {
            record.keypair = keypair.clone();
        }
    }
}

/// 지갑 생성 결과
/// Outcome of a "generate wallet" request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedWallet {
    Created(WalletRecord),
    Existing(WalletRecord),
}

impl GeneratedWallet {
    pub fn record(&self) -> &WalletRecord {
        match self {
            GeneratedWallet::Created(record) | GeneratedWallet::Existing(record) => record,
        }
    }
}

/// 잔액 조회 결과
/// Balance of a wallet; `usd` is None when the price lookup failed
#[derive(Debug, Clone, PartialEq)]
pub struct WalletBalance {
    pub public_key: String,
    pub lamports: u64,
    pub usd: Option<rust_decimal::Decimal>,
}
