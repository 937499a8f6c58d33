// Shared errors
pub mod wallet_error;
pub mod chain_error;
pub mod swap_error;
pub mod market_error;
pub mod telegram_error;
pub mod service_error;

pub use wallet_error::*;
pub use chain_error::*;
pub use swap_error::*;
pub use market_error::*;
pub use telegram_error::*;
pub use service_error::*;
