use std::sync::OnceLock;

use regex::Regex;

/// 채팅 텍스트 분류 결과
/// What a free-text chat message was recognised as.
///
/// Checked in a fixed order: public key, then amount, then percentage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    PublicKey(String),
    Amount(String),
    Percentage(String),
    Other,
}

fn public_key_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b[A-HJ-NP-Za-km-z1-9]{44}\b").expect("valid public key regex"))
}

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d*\.?\d+$").expect("valid amount regex"))
}

fn percentage_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d+)?%$").expect("valid percentage regex"))
}

/// 텍스트 안의 첫 번째 base58 public key (44자)
pub fn find_public_key(text: &str) -> Option<&str> {
    public_key_regex().find(text).map(|m| m.as_str())
}

pub fn is_public_key(text: &str) -> bool {
    find_public_key(text).is_some()
}

pub fn classify_text(text: &str) -> TextInput {
    let trimmed = text.trim();
    if let Some(key) = find_public_key(trimmed) {
        TextInput::PublicKey(key.to_string())
    } else if amount_regex().is_match(trimmed) {
        TextInput::Amount(trimmed.to_string())
    } else if percentage_regex().is_match(trimmed) {
        TextInput::Percentage(trimmed.trim_end_matches('%').to_string())
    } else {
        TextInput::Other
    }
}
