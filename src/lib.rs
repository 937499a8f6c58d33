//! Telegram custody-wallet bot for Solana: wallet generation, balance,
//! SOL transfers and token buys through Jupiter.

pub mod domains;
pub mod shared;
