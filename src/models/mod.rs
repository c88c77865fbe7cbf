pub mod evaluation_log;
pub mod faq;
pub mod message;
pub mod rule;
pub mod ticket;
pub mod user;

pub use evaluation_log::*;
pub use faq::*;
pub use message::*;
pub use rule::*;
pub use ticket::*;
pub use user::*;
