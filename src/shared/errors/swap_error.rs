use thiserror::Error;

use super::ChainError;

/// 스왑(Jupiter) 관련 에러
/// Swap aggregator errors
#[derive(Error, Debug)]
pub enum SwapError {
    /// Quote 조회 실패 (라우트 없음, API 에러 등)
    #[error("Failed to get swap quote: {0}")]
    Quote(String),

    /// 스왑 트랜잭션 생성 실패
    #[error("Failed to build swap transaction: {0}")]
    Build(String),

    /// 트랜잭션 디코딩/서명 실패
    #[error("Failed to sign swap transaction: {0}")]
    Signing(String),

    /// 체인 제출 실패
    #[error("Failed to submit swap transaction: {0}")]
    Submission(#[from] ChainError),
}

impl SwapError {
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, SwapError::Submission(ChainError::InsufficientFunds))
    }
}
