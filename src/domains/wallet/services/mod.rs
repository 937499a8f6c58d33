// Wallet domain services
pub mod wallet_service;

pub use wallet_service::*;
