//! # Centralized Error Handling
//!
//! This module defines the error type [`AppError`] returned by every address
//! activity operation. It follows the `thiserror` pattern for ergonomic error handling.
//!
//! ## Error Categories
//!
//! 1. **Caller Errors** - detected before any network traffic
//!    - [`InvalidAddress`](AppError::InvalidAddress)
//!    - [`Config`](AppError::Config)
//!
//! 2. **Upstream Errors** - reported by or about the ledger endpoint
//!    - [`EndpointUnavailable`](AppError::EndpointUnavailable)
//!    - [`MissingTimestamp`](AppError::MissingTimestamp)
//!
//! Errors are never retried or recovered locally; they reach the caller as-is.
//!
//! ## Usage Example
//!
//! ```rust
//! use lib_core::error::{AppError, Result};
//!
//! fn require_address(addr: &str) -> Result<&str> {
//!     if addr.is_empty() {
//!         return Err(AppError::InvalidAddress("address is empty".to_string()));
//!     }
//!     Ok(addr)
//! }
//! ```

use thiserror::Error;

/// Convenience type alias for `Result<T, AppError>`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Error type covering configuration, input, and ledger endpoint failures.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The supplied string is not a valid ledger account identifier.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// The ledger endpoint could not be reached or returned an error.
    #[error("Endpoint unavailable: {0}")]
    EndpointUnavailable(String),

    /// The endpoint returned a transaction without a usable block time.
    #[error("Missing block time for transaction {signature}")]
    MissingTimestamp { signature: String },

    /// Configuration error during startup or environment loading.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    /// Whether the error was caused by caller input rather than the endpoint.
    pub fn is_client_error(&self) -> bool {
        matches!(self, AppError::InvalidAddress(_) | AppError::Config(_))
    }

    /// Stable short code for the variant, for logs and structured output.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidAddress(_) => "InvalidAddress",
            AppError::EndpointUnavailable(_) => "EndpointUnavailable",
            AppError::MissingTimestamp { .. } => "MissingTimestamp",
            AppError::Config(_) => "Config",
        }
    }
}
