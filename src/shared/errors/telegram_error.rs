use thiserror::Error;

/// Telegram Bot API 에러
/// Telegram Bot API errors
#[derive(Error, Debug)]
pub enum TelegramError {
    #[error("Telegram request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Telegram API error {code}: {description}")]
    Api { code: i64, description: String },

    #[error("Telegram API returned ok without a result")]
    MissingResult,
}
