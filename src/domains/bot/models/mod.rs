// Bot domain models
pub mod session;
pub mod callback;
pub mod keyboard;
pub mod event;
pub mod telegram;

pub use session::*;
pub use callback::*;
pub use keyboard::*;
pub use event::*;
pub use telegram::*;
