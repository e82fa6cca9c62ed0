//! # Utilities Library
//!
//! Shared utility functions for environment variables, block-time formatting, and validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env_opt, get_env_parse_opt};
pub use time::{format_block_time, format_block_time_in, BLOCK_TIME_FORMAT};
pub use validation::{validate_not_empty, validate_range, validate_url_scheme};
