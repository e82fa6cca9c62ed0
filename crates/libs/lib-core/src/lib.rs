//! # Core Library
//!
//! Configuration and the error taxonomy shared by the address activity crates.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, Result};
