//! CLI library components for linkform.

pub mod config;
pub mod logging;
pub mod pipeline;
pub mod types;
