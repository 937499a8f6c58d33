// Bot domain (conversation router + Telegram dispatcher)
pub mod models;
pub mod services;
