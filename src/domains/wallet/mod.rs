// Wallet domain
pub mod models;
pub mod services;
