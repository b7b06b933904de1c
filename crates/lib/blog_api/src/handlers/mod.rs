//! Request handlers.

pub mod ping;
pub mod posts;
pub mod users;
