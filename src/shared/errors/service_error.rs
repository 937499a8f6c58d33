use thiserror::Error;

use super::{ChainError, MarketDataError, SwapError, WalletError};

/// 서비스 계층 에러 (저장소 + 체인 + 스왑)
/// Errors surfaced by the wallet and swap services
#[derive(Error, Debug)]
pub enum ServiceError {
    #[error(transparent)]
    Wallet(#[from] WalletError),

    #[error(transparent)]
    Chain(#[from] ChainError),

    #[error(transparent)]
    Swap(#[from] SwapError),

    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    #[error("Amount must be greater than zero")]
    ZeroAmount,
}

impl ServiceError {
    pub fn is_insufficient_funds(&self) -> bool {
        match self {
            ServiceError::Chain(err) => *err == ChainError::InsufficientFunds,
            ServiceError::Swap(err) => err.is_insufficient_funds(),
            _ => false,
        }
    }
}
