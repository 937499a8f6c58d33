use std::collections::HashMap;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::shared::errors::MarketDataError;

/// 토큰 정보 (DexScreener 첫 번째 페어 기준)
/// Token card data shown when a buy address is entered
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
    pub price_usd: Option<String>,
    pub liquidity_usd: Option<f64>,
    pub fdv: Option<f64>,
}

/// 시세 조회 인터페이스
/// Price lookup and token info
#[async_trait]
pub trait MarketData: Send + Sync {
    /// USD price of the asset with the given mint address.
    async fn usd_price(&self, mint: &str) -> Result<f64, MarketDataError>;

    /// `None` when the token has no trading pair.
    async fn token_info(&self, address: &str) -> Result<Option<TokenInfo>, MarketDataError>;
}

#[derive(Debug, Deserialize)]
struct TokenPairsResponse {
    #[serde(default)]
    pairs: Option<Vec<TokenPair>>,
}

#[derive(Debug, Deserialize)]
struct TokenPair {
    #[serde(rename = "baseToken")]
    base_token: BaseToken,
    #[serde(rename = "priceUsd", default)]
    price_usd: Option<String>,
    #[serde(default)]
    liquidity: Option<Liquidity>,
    #[serde(default)]
    fdv: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct BaseToken {
    name: String,
    symbol: String,
}

#[derive(Debug, Deserialize)]
struct Liquidity {
    #[serde(default)]
    usd: Option<f64>,
}

// 가격 API (Raydium) + 토큰 정보 API (DexScreener) 클라이언트
pub struct MarketDataClient {
    http_client: reqwest::Client,
    price_url: String,
    token_info_url: String,
}

impl MarketDataClient {
    pub fn new(price_url: &str, token_info_url: &str) -> Result<Self, MarketDataError> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| MarketDataError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            price_url: price_url.to_string(),
            token_info_url: token_info_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response, MarketDataError> {
        debug!(%url, "Requesting market data");
        let response = self
            .http_client
            .get(url)
            .header("User-Agent", "wallet-bot/1.0")
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::Status { status, body });
        }
        Ok(response)
    }
}

#[async_trait]
impl MarketData for MarketDataClient {
    async fn usd_price(&self, mint: &str) -> Result<f64, MarketDataError> {
        let prices: HashMap<String, f64> = self.get(&self.price_url).await?.json().await?;

        prices
            .get(mint)
            .copied()
            .ok_or_else(|| MarketDataError::MissingPrice(mint.to_string()))
    }

    async fn token_info(&self, address: &str) -> Result<Option<TokenInfo>, MarketDataError> {
        let url = format!("{}/{}", self.token_info_url, address);
        let data: TokenPairsResponse = self.get(&url).await?.json().await?;

        let first = data.pairs.and_then(|pairs| pairs.into_iter().next());
        Ok(first.map(|pair| TokenInfo {
            name: pair.base_token.name,
            symbol: pair.base_token.symbol,
            price_usd: pair.price_usd,
            liquidity_usd: pair.liquidity.and_then(|l| l.usd),
            fdv: pair.fdv,
        }))
    }
}
