//! # Solana Library
//!
//! Address activity and balance lookups against a Solana JSON-RPC endpoint.
//!
//! ```text
//! AddressActivityService → dyn LedgerReader → SolanaClient → Solana RPC
//! ```

pub mod activity;
pub mod client;
pub mod ledger;
pub mod types;

// Re-export commonly used types from root for convenience
pub use activity::{AddressActivityService, ACTIVITY_LIMIT};
pub use client::{Network, SolanaClient, SolanaClientBuilder};
pub use ledger::LedgerReader;
pub use types::{
    ActivityRecord, Address, AddressSummary, Balance, ConfirmationState, SignatureEntry,
    LAMPORTS_PER_SOL,
};
