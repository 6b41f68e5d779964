//! API route modules.

pub mod root;
pub mod users;
