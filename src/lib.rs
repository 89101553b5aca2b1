pub mod cache;
pub mod config;
pub mod errors;
pub mod fetcher;
pub mod logger;
pub mod server;
pub mod types;
