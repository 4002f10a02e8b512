pub mod config;
pub mod error;

// Dataset loading and normalization
pub mod dataset;

// Embedding backend and cache
pub mod embedding;

// Search engine
pub mod search;

// CLI
pub mod cli;

// Re-exports
pub use config::Settings;
pub use error::{Error, Result};
