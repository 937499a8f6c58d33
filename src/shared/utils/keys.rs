use base64::{engine::general_purpose, Engine as _};
use solana_sdk::signer::keypair::Keypair;

use crate::shared::errors::WalletError;

/// 바이트 키를 base64 문자열로 인코딩
/// Encode raw key bytes for storage
pub fn encode_key(key: &[u8]) -> String {
    general_purpose::STANDARD.encode(key)
}

/// base64 문자열을 바이트로 디코딩
/// Decode a stored key back to raw bytes
pub fn decode_key(encoded_key: &str) -> Result<Vec<u8>, WalletError> {
    general_purpose::STANDARD
        .decode(encoded_key.trim())
        .map_err(|e| WalletError::InvalidKeyEncoding(format!("Failed to decode private key: {}", e)))
}

/// 저장된 private key (64 bytes, base64)로 Keypair 복원
/// Rebuild the signing keypair from its stored encoding
pub fn keypair_from_encoded(encoded_key: &str) -> Result<Keypair, WalletError> {
    let bytes = decode_key(encoded_key)?;
    Keypair::from_bytes(&bytes).map_err(|e| {
        WalletError::InvalidKeyEncoding(format!(
            "Failed to create keypair from private key bytes: {}",
            e
        ))
    })
}
