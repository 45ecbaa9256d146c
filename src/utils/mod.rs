pub mod auth;
pub mod club;
pub mod constants;
pub mod tracing;
