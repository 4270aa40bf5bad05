pub mod auth;
pub mod checks;
pub mod cmd;
pub mod config;
pub mod errors;
pub mod http;
pub mod log;
pub mod suite;
