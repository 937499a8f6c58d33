use thiserror::Error;

/// 가격/토큰 정보 조회 에러
/// Price and token-info lookup errors
#[derive(Error, Debug)]
pub enum MarketDataError {
    #[error("Market data request failed: {0}")]
    Request(String),

    #[error("Market data API returned error: {status} - {body}")]
    Status { status: u16, body: String },

    #[error("No price for asset: {0}")]
    MissingPrice(String),

    #[error("Failed to parse market data response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for MarketDataError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            MarketDataError::Parse(err.to_string())
        } else {
            MarketDataError::Request(err.to_string())
        }
    }
}
