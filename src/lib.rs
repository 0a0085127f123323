//! Migrated-coin filter library
//!
//! Finds freshly migrated pump.fun tokens and narrows them through market,
//! anti-rug, volume, sentiment and holder checks.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use config::Config;
pub use error::{Error, Result};
pub use pipeline::{Pipeline, PipelineReport};
