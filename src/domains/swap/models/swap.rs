use serde::{Deserialize, Serialize};

/// Wrapped SOL mint (스왑 입력 토큰)
pub const SOL_MINT: &str = "So11111111111111111111111111111111111111112";

// 스왑 가격 조회 API 응답 모델
// Note: Jupiter API는 camelCase로 응답하므로 #[serde(rename = "...")]로 매핑
// 나머지 필드는 `extra`로 보존 (swap 요청에 quote 전체를 그대로 돌려보내야 함)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteResponse {
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "slippageBps")]
    pub slippage_bps: u16,
    #[serde(rename = "priceImpactPct", default, skip_serializing_if = "Option::is_none")]
    pub price_impact_pct: Option<String>,
    #[serde(rename = "routePlan", default)]
    pub route_plan: Vec<RoutePlan>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutePlan {
    #[serde(rename = "swapInfo")]
    pub swap_info: SwapInfo,
    pub percent: i32,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapInfo {
    #[serde(rename = "ammKey")]
    pub amm_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(rename = "inputMint")]
    pub input_mint: String,
    #[serde(rename = "outputMint")]
    pub output_mint: String,
    #[serde(rename = "inAmount")]
    pub in_amount: String,
    #[serde(rename = "outAmount")]
    pub out_amount: String,
    #[serde(rename = "feeAmount")]
    pub fee_amount: String,
    #[serde(rename = "feeMint")]
    pub fee_mint: String,
    // 라우트마다 추가 필드가 있을 수 있음 (그대로 되돌려 보냄)
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// 스왑 트랜잭션 생성 요청 (Jupiter /swap body)
#[derive(Debug, Serialize)]
pub struct SwapTransactionRequest<'a> {
    #[serde(rename = "quoteResponse")]
    pub quote_response: &'a QuoteResponse,
    #[serde(rename = "userPublicKey")]
    pub user_public_key: String,
    #[serde(rename = "wrapAndUnwrapSol")]
    pub wrap_and_unwrap_sol: bool,
    #[serde(rename = "dynamicComputeUnitLimit")]
    pub dynamic_compute_unit_limit: bool,
    #[serde(rename = "prioritizationFeeLamports")]
    pub prioritization_fee_lamports: &'static str,
}

// Jupiter /swap 응답 (base64 직렬화된 미서명 VersionedTransaction)
#[derive(Debug, Deserialize)]
pub struct SwapTransactionResponse {
    #[serde(rename = "swapTransaction")]
    pub swap_transaction: String,
    #[serde(rename = "lastValidBlockHeight")]
    pub last_valid_block_height: Option<u64>,
    #[serde(rename = "prioritizationFeeLamports")]
    pub prioritization_fee_lamports: Option<u64>,
}

/// 토큰 매수 주문 (SOL -> 토큰)
/// Buy order handed to the swap client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyOrder {
    pub token_mint: String,
    pub lamports: u64,
    pub slippage_bps: u16,
}
