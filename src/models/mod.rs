//! Data models for outgoing bot messages

mod builders;
mod card;
mod response;

pub use builders::*;
pub use card::*;
pub use response::Response;
