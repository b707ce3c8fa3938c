pub mod cli;
pub mod column_selector;
pub mod config;
pub mod error;
pub mod export;
pub mod loader;
pub mod progress;

