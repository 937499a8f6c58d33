// Domain modules
pub mod wallet;
pub mod swap;
pub mod bot;
