// Shared module
pub mod config;
pub mod clients;
pub mod database;
pub mod errors;
pub mod services;
pub mod utils;

pub use config::*;
pub use clients::*;
pub use database::*;
pub use errors::*;
pub use services::*;
pub use utils::*;
