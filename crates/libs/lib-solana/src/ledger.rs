//! # Ledger Reader
//!
//! The read-only slice of the ledger RPC that the activity service needs.
//! [`SolanaClient`](crate::client::SolanaClient) is the production implementation;
//! tests plug in an in-memory fake.

use crate::types::SignatureEntry;
use async_trait::async_trait;
use solana_sdk::pubkey::Pubkey;

/// Read access to a ledger endpoint.
#[async_trait]
pub trait LedgerReader: Send + Sync {
    /// Most recent signatures referencing `address`, newest first, at most `limit`.
    async fn recent_signatures(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> anyhow::Result<Vec<SignatureEntry>>;

    /// Current balance of `address` in lamports.
    async fn balance_lamports(&self, address: &Pubkey) -> anyhow::Result<u64>;
}
