// Bot services
pub mod session_store;
pub mod router;
pub mod dispatcher;

pub use session_store::*;
pub use router::*;
pub use dispatcher::*;
