/// 공유 유틸리티 모듈
/// Shared Utilities Module
///
/// 역할:
/// - 키 인코딩 (base64 / base58 keypair)
/// - SOL <-> lamports 변환
/// - 채팅 입력 패턴 (public key, 금액, 퍼센트)
/// - MarkdownV2 escape
pub mod keys;
pub mod amount;
pub mod patterns;
pub mod markdown;

pub use keys::*;
pub use amount::*;
pub use patterns::*;
pub use markdown::*;
