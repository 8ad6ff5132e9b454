//! Inlay Common Utilities
//!
//! Shared infrastructure for all Inlay crates:
//! - Error types and result aliases
//! - Color parsing and contrast utilities
//! - Tracing/logging initialization
//! - Configuration loading

pub mod color;
pub mod config;
pub mod error;
pub mod logging;

pub use color::*;
pub use config::*;
pub use error::*;
