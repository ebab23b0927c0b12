pub mod config;
pub mod constants;
pub mod error;
pub mod loader;
pub mod logging;
pub mod pipeline;
pub mod storage;
pub mod types;

// Layered boundaries for application logic and infrastructure adapters
pub mod app;
pub mod infra;
