// Swap domain services
pub mod swap_service;

pub use swap_service::*;
