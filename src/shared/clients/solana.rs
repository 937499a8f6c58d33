use std::str::FromStr;
use std::sync::Arc;

use async_trait::async_trait;
use solana_client::client_error::{ClientError, ClientErrorKind};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    hash::Hash,
    instruction::InstructionError,
    pubkey::Pubkey,
    signature::Signature,
    signer::keypair::Keypair,
    signer::Signer,
    system_instruction,
    transaction::{Transaction, TransactionError, VersionedTransaction},
};
use tracing::{debug, info, warn};

use crate::shared::errors::ChainError;

// SystemError::ResultWithNegativeLamports
const SYSTEM_ERROR_NEGATIVE_LAMPORTS: u32 = 1;

/// 트랜잭션 처리 결과
/// Final state of a submitted transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionStatus {
    Succeeded,
    Failed(String),
}

/// 체인 클라이언트 인터페이스
/// Chain Client: balance, native transfer and status against one RPC endpoint.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Balance in lamports. Unfunded accounts report 0.
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ChainError>;

    /// Signs and submits one native transfer, returning the signature.
    async fn transfer(
        &self,
        sender: &Keypair,
        receiver: &Pubkey,
        lamports: u64,
    ) -> Result<String, ChainError>;

    /// `None` while the signature is unknown to the cluster.
    async fn get_transaction_status(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionStatus>, ChainError>;

    async fn get_latest_blockhash(&self) -> Result<Hash, ChainError>;
}

/// Solana RPC 클라이언트
/// Wraps the nonblocking RPC client for a single configured endpoint
#[derive(Clone)]
pub struct SolanaClient {
    rpc_client: Arc<RpcClient>,
    rpc_url: String,
}

impl SolanaClient {
    /// SolanaClient 생성
    /// Create SolanaClient for the configured endpoint
    pub fn new(rpc_url: &str) -> Self {
        let rpc_client = Arc::new(RpcClient::new_with_commitment(
            rpc_url.to_string(),
            CommitmentConfig::confirmed(),
        ));

        Self {
            rpc_client,
            rpc_url: rpc_url.to_string(),
        }
    }

    /// 새 지갑(Keypair) 생성
    pub fn generate_wallet() -> Keypair {
        Keypair::new()
    }

    /// Public Key 문자열을 Pubkey로 변환
    pub fn parse_pubkey(pubkey_str: &str) -> Option<Pubkey> {
        Pubkey::from_str(pubkey_str.trim()).ok()
    }

    /// 노드 연결 확인 (getVersion)
    /// Connectivity check used at startup
    pub async fn is_connected(&self) -> bool {
        match self.rpc_client.get_version().await {
            Ok(version) => {
                debug!(version = %version.solana_core, "Solana node reachable");
                true
            }
            Err(e) => {
                warn!(rpc_url = %self.rpc_url, error = %e, "Solana node unreachable");
                false
            }
        }
    }

    /// SOL 전송 트랜잭션 생성 (서명 포함)
    /// Create a signed SOL transfer transaction
    pub async fn create_transfer_transaction(
        &self,
        from_keypair: &Keypair,
        to_pubkey: &Pubkey,
        amount_lamports: u64,
    ) -> Result<Transaction, ChainError> {
        let latest_blockhash = self.get_latest_blockhash().await?;

        let instruction =
            system_instruction::transfer(&from_keypair.pubkey(), to_pubkey, amount_lamports);

        Ok(Transaction::new_signed_with_payer(
            &[instruction],
            Some(&from_keypair.pubkey()),
            &[from_keypair],
            latest_blockhash,
        ))
    }

    /// 서명된 versioned 트랜잭션 전송 및 확인 대기 (Jupiter 스왑용)
    /// Submit an already-signed versioned transaction and wait for confirmation
    pub async fn send_versioned_transaction(
        &self,
        transaction: &VersionedTransaction,
    ) -> Result<String, ChainError> {
        let signature = self
            .rpc_client
            .send_and_confirm_transaction(transaction)
            .await
            .map_err(|e| classify_submission_error(&e))?;

        Ok(signature.to_string())
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }
}

#[async_trait]
impl ChainClient for SolanaClient {
    async fn get_balance(&self, pubkey: &Pubkey) -> Result<u64, ChainError> {
        self.rpc_client
            .get_balance(pubkey)
            .await
            .map_err(|e| ChainError::RpcUnavailable(format!("Failed to get balance for {}: {}", pubkey, e)))
    }

    async fn transfer(
        &self,
        sender: &Keypair,
        receiver: &Pubkey,
        lamports: u64,
    ) -> Result<String, ChainError> {
        let transaction = self
            .create_transfer_transaction(sender, receiver, lamports)
            .await?;

        let signature = self
            .rpc_client
            .send_and_confirm_transaction(&transaction)
            .await
            .map_err(|e| classify_submission_error(&e))?;

        info!(
            from = %sender.pubkey(),
            to = %receiver,
            lamports,
            signature = %signature,
            "SOL transfer confirmed"
        );
        Ok(signature.to_string())
    }

    async fn get_transaction_status(
        &self,
        signature: &str,
    ) -> Result<Option<TransactionStatus>, ChainError> {
        let sig = Signature::from_str(signature.trim())
            .map_err(|_| ChainError::InvalidSignature(signature.to_string()))?;

        let status = self
            .rpc_client
            .get_signature_status(&sig)
            .await
            .map_err(|e| ChainError::RpcUnavailable(format!("Failed to get transaction status: {}", e)))?;

        Ok(status.map(|result| match result {
            Ok(()) => TransactionStatus::Succeeded,
            Err(e) => TransactionStatus::Failed(e.to_string()),
        }))
    }

    async fn get_latest_blockhash(&self) -> Result<Hash, ChainError> {
        self.rpc_client
            .get_latest_blockhash()
            .await
            .map_err(|e| ChainError::RpcUnavailable(format!("Failed to get latest blockhash: {}", e)))
    }
}

/// 제출 실패 원인 분류 (잔액 부족 / 네트워크 / 기타 거부)
/// Maps an RPC submission failure to a reason code
pub fn classify_submission_error(err: &ClientError) -> ChainError {
    if let Some(tx_err) = err.get_transaction_error() {
        return classify_transaction_error(tx_err);
    }

    match err.kind() {
        ClientErrorKind::Io(_) | ClientErrorKind::Reqwest(_) => {
            ChainError::RpcUnavailable(err.to_string())
        }
        _ => ChainError::Rejected(err.to_string()),
    }
}

pub fn classify_transaction_error(err: TransactionError) -> ChainError {
    match err {
        TransactionError::InsufficientFundsForFee
        | TransactionError::InsufficientFundsForRent { .. }
        // 한 번도 입금되지 않은 계정
        | TransactionError::AccountNotFound => ChainError::InsufficientFunds,
        TransactionError::InstructionError(_, InstructionError::Custom(SYSTEM_ERROR_NEGATIVE_LAMPORTS))
        | TransactionError::InstructionError(_, InstructionError::InsufficientFunds) => {
            ChainError::InsufficientFunds
        }
        other => ChainError::Rejected(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_funds_classified() {
        assert_eq!(
            classify_transaction_error(TransactionError::InsufficientFundsForFee),
            ChainError::InsufficientFunds
        );
        assert_eq!(
            classify_transaction_error(TransactionError::AccountNotFound),
            ChainError::InsufficientFunds
        );
        assert_eq!(
            classify_transaction_error(TransactionError::InstructionError(
                0,
                InstructionError::Custom(1)
            )),
            ChainError::InsufficientFunds
        );
    }

    #[test]
    fn test_other_rejections_kept_distinct() {
        let err = classify_transaction_error(TransactionError::BlockhashNotFound);
        assert!(matches!(err, ChainError::Rejected(_)));

        let err = classify_transaction_error(TransactionError::InstructionError(
            0,
            InstructionError::Custom(42),
        ));
        assert!(matches!(err, ChainError::Rejected(_)));
    }

    #[test]
    fn test_parse_pubkey() {
        let keypair = SolanaClient::generate_wallet();
        let parsed = SolanaClient::parse_pubkey(&keypair.pubkey().to_string());
        assert_eq!(parsed, Some(keypair.pubkey()));
        assert_eq!(SolanaClient::parse_pubkey("not-a-key"), None);
    }
}
