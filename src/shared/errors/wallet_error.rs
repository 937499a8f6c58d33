use thiserror::Error;

/// 지갑 관련 에러
/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// 지갑을 찾을 수 없음
    /// No wallet stored for the user
    #[error("Wallet not found: user_id={user_id}")]
    NotFound { user_id: i64 },

    /// 사용자당 지갑이 이미 존재함
    /// Wallet already exists for user
    #[error("Wallet already exists for user: user_id={user_id}")]
    AlreadyExists { user_id: i64 },

    /// 키 인코딩이 잘못됨 (base64 / keypair bytes)
    /// Malformed key encoding
    #[error("Invalid key encoding: {0}")]
    InvalidKeyEncoding(String),

    /// Public Key 파싱 실패
    /// Failed to parse public key
    #[error("Failed to parse public key: {public_key}")]
    InvalidPublicKey { public_key: String },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl WalletError {
    /// 사용자에게 보여줄 메시지 (MarkdownV2 escaped)
    /// Reply text shown to the chat user
    pub fn user_message(&self) -> &'static str {
        match self {
            WalletError::NotFound { .. } => "You don't have any wallet",
            WalletError::AlreadyExists { .. } => {
                "A wallet is already created with your account\\."
            }
            WalletError::InvalidKeyEncoding(_) => {
                "Your stored wallet key could not be read\\. Please contact support\\."
            }
            WalletError::InvalidPublicKey { .. } => "That public key is not valid\\.",
            WalletError::DatabaseError(_) => {
                "⚠️ Wallet storage is unavailable right now\\. Please try again later\\."
            }
        }
    }
}
