// External clients
pub mod solana;
pub mod jupiter;
pub mod market_data;
pub mod telegram;

pub use solana::*;
pub use jupiter::*;
pub use market_data::*;
pub use telegram::*;
