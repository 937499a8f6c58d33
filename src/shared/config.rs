use std::env;

use anyhow::{Context, Result};

pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_JUPITER_API_URL: &str = "https://quote-api.jup.ag/v6";
pub const DEFAULT_PRICE_API_URL: &str = "https://api.raydium.io/v2/main/price";
pub const DEFAULT_TOKEN_INFO_API_URL: &str = "https://api.dexscreener.com/latest/dex/tokens";

/// 스왑 기본 슬리피지 (100 bps = 1%)
/// Default swap slippage in basis points
pub const DEFAULT_SLIPPAGE_BPS: u16 = 100;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// 애플리케이션 설정 (시작 시 1회 로드)
/// Process configuration, loaded once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub bot_token: String,
    pub rpc_url: String,
    pub database_url: String,

    pub telegram_api_url: String,
    pub jupiter_api_url: String,
    pub price_api_url: String,
    pub token_info_api_url: String,

    /// Solscan cluster query (e.g. "devnet"); None links to mainnet
    pub explorer_cluster: Option<String>,
    pub swap_slippage_bps: u16,
    pub poll_timeout_secs: u64,
}

impl Config {
    /// 환경 변수에서 설정 로드 (.env 포함)
    /// Loads configuration from the environment, reading `.env` first.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| -> Result<String> {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .with_context(|| format!("{} must be set", key))
        };
        let optional = |key: &str, default: &str| -> String {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let swap_slippage_bps = optional("SWAP_SLIPPAGE_BPS", &DEFAULT_SLIPPAGE_BPS.to_string())
            .parse::<u16>()
            .context("SWAP_SLIPPAGE_BPS must be a valid number of basis points")?;
        let poll_timeout_secs = optional("POLL_TIMEOUT_SECS", &DEFAULT_POLL_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .context("POLL_TIMEOUT_SECS must be a valid number")?;

        Ok(Config {
            bot_token: required("BOT_TOKEN")?,
            rpc_url: required("RPC_URL")?,
            database_url: required("DATABASE_URL")?,
            telegram_api_url: optional("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL),
            jupiter_api_url: optional("JUPITER_API_URL", DEFAULT_JUPITER_API_URL),
            price_api_url: optional("PRICE_API_URL", DEFAULT_PRICE_API_URL),
            token_info_api_url: optional("TOKEN_INFO_API_URL", DEFAULT_TOKEN_INFO_API_URL),
            explorer_cluster: lookup("EXPLORER_CLUSTER").filter(|value| !value.trim().is_empty()),
            swap_slippage_bps,
            poll_timeout_secs,
        })
    }
}

/// Solscan 트랜잭션 링크
/// Explorer link for a submitted transaction
pub fn explorer_tx_url(signature: &str, cluster: Option<&str>) -> String {
    match cluster {
        Some(cluster) => format!("https://solscan.io/tx/{}?cluster={}", signature, cluster),
        None => format!("https://solscan.io/tx/{}", signature),
    }
}
