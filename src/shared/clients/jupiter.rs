use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use solana_sdk::{
    pubkey::Pubkey,
    signer::keypair::Keypair,
    signer::Signer,
    transaction::VersionedTransaction,
};
use tracing::{debug, info};

use crate::domains::swap::models::{
    QuoteResponse, SwapTransactionRequest, SwapTransactionResponse, SOL_MINT,
};
use crate::shared::clients::SolanaClient;
use crate::shared::errors::SwapError;

/// 스왑 클라이언트 인터페이스
/// Swap Client: buys `target_mint` with native SOL through an aggregator.
#[async_trait]
pub trait SwapClient: Send + Sync {
    async fn swap(
        &self,
        sender: &Keypair,
        target_mint: &Pubkey,
        lamports: u64,
        slippage_bps: u16,
    ) -> Result<String, SwapError>;
}

// Jupiter API 클라이언트
// Jupiter API client; signs the returned transaction and submits it through Solana RPC
pub struct JupiterClient {
    http_client: reqwest::Client,
    base_url: String,
    solana_client: SolanaClient,
}

impl JupiterClient {
    pub fn new(base_url: &str, solana_client: SolanaClient) -> Result<Self, SwapError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| SwapError::Build(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            solana_client,
        })
    }

    // Quote 조회: Jupiter API 호출
    // Get quote: call Jupiter API
    pub async fn get_quote(
        &self,
        input_mint: &str,
        output_mint: &str,
        amount: u64,
        slippage_bps: u16,
    ) -> Result<QuoteResponse, SwapError> {
        let url = format!("{}/quote", self.base_url);
        debug!(%url, input_mint, output_mint, amount, slippage_bps, "Requesting Jupiter quote");

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("inputMint", input_mint.to_string()),
                ("outputMint", output_mint.to_string()),
                ("amount", amount.to_string()),
                ("slippageBps", slippage_bps.to_string()),
            ])
            .header("User-Agent", "wallet-bot/1.0")
            .send()
            .await
            .map_err(|e| SwapError::Quote(format!("Failed to send request to Jupiter API: {}", e)))?;

        // HTTP 상태 코드 확인
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SwapError::Quote(format!(
                "Jupiter API returned error: {} - {}",
                status, body
            )));
        }

        response
            .json::<QuoteResponse>()
            .await
            .map_err(|e| SwapError::Quote(format!("Failed to parse Jupiter API response: {}", e)))
    }

    // 스왑 트랜잭션 생성: Jupiter Swap API 호출
    // Returns the base64 unsigned transaction
    pub async fn create_swap_transaction(
        &self,
        quote: &QuoteResponse,
        user_public_key: &Pubkey,
    ) -> Result<String, SwapError> {
        let url = format!("{}/swap", self.base_url);
        let request_body = SwapTransactionRequest {
            quote_response: quote,
            user_public_key: user_public_key.to_string(),
            wrap_and_unwrap_sol: true,
            dynamic_compute_unit_limit: true,
            prioritization_fee_lamports: "auto",
        };

        let response = self
            .http_client
            .post(&url)
            .header("User-Agent", "wallet-bot/1.0")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| SwapError::Build(format!("Failed to send request to Jupiter Swap API: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SwapError::Build(format!(
                "Jupiter Swap API returned error: {} - {}",
                status, body
            )));
        }

        let swap_response: SwapTransactionResponse = response
            .json()
            .await
            .map_err(|e| SwapError::Build(format!("Failed to parse Jupiter Swap API response: {}", e)))?;

        Ok(swap_response.swap_transaction)
    }

    /// base64 트랜잭션 디코딩 후 서명
    /// Decode Jupiter's unsigned transaction and sign it with the wallet keypair
    pub fn sign_swap_transaction(
        encoded_transaction: &str,
        signer: &Keypair,
    ) -> Result<VersionedTransaction, SwapError> {
        let bytes = general_purpose::STANDARD
            .decode(encoded_transaction)
            .map_err(|e| SwapError::Signing(format!("Invalid base64 transaction: {}", e)))?;

        let unsigned: VersionedTransaction = bincode::deserialize(&bytes)
            .map_err(|e| SwapError::Signing(format!("Invalid transaction bytes: {}", e)))?;

        VersionedTransaction::try_new(unsigned.message, &[signer])
            .map_err(|e| SwapError::Signing(e.to_string()))
    }
}

#[async_trait]
impl SwapClient for JupiterClient {
    async fn swap(
        &self,
        sender: &Keypair,
        target_mint: &Pubkey,
        lamports: u64,
        slippage_bps: u16,
    ) -> Result<String, SwapError> {
        // 1. Quote 조회 (SOL -> 토큰)
        let quote = self
            .get_quote(SOL_MINT, &target_mint.to_string(), lamports, slippage_bps)
            .await?;

        // 2. Swap 트랜잭션 생성
        let encoded = self.create_swap_transaction(&quote, &sender.pubkey()).await?;

        // 3. 서명 후 전송
        let transaction = Self::sign_swap_transaction(&encoded, sender)?;
        let signature = self
            .solana_client
            .send_versioned_transaction(&transaction)
            .await?;

        info!(
            user = %sender.pubkey(),
            token = %target_mint,
            lamports,
            out_amount = %quote.out_amount,
            signature = %signature,
            "Swap confirmed"
        );
        Ok(signature)
    }
}
