use thiserror::Error;

/// Solana RPC 관련 에러
/// Chain client errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    /// RPC 엔드포인트에 접근 불가
    /// Endpoint unreachable or the request failed in transport
    #[error("Solana RPC unavailable: {0}")]
    RpcUnavailable(String),

    /// 잔액 부족 (수수료 포함)
    /// Sender cannot cover the amount plus fees
    #[error("Insufficient funds for transfer")]
    InsufficientFunds,

    /// 네트워크가 트랜잭션을 거부함 (원인 불명 포함)
    /// Submission rejected for any other reason
    #[error("Transaction rejected: {0}")]
    Rejected(String),

    /// 서명 문자열 파싱 실패
    /// Malformed transaction signature
    #[error("Invalid transaction signature: {0}")]
    InvalidSignature(String),
}
