//! # Address Activity Types
//!
//! Display-ready shapes returned by the address activity service, plus the raw
//! per-signature row a [`LedgerReader`](crate::ledger::LedgerReader) hands back.
//!
//! ## Type Categories
//!
//! - `Address`: validated account identifier
//! - `SignatureEntry`: raw endpoint row, block time still optional
//! - `ActivityRecord`: normalized row with a formatted timestamp
//! - `Balance`: lamports plus the SOL figure derived from them
//!
//! ## Example
//!
//! ```rust
//! use lib_solana::types::{Address, Balance};
//!
//! let address = Address::parse("11111111111111111111111111111111").unwrap();
//! let balance = Balance::from_lamports(2_500_000_000);
//! assert_eq!(balance.sol, 2.5);
//! println!("{} holds {} SOL", address, balance.sol);
//! ```

use lib_core::{AppError, Result};
use serde::{Serialize, Serializer};
use solana_sdk::pubkey::Pubkey;
use std::fmt;
use std::str::FromStr;

/// Lamports in one SOL.
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// A syntactically valid Solana account address.
///
/// Parsing happens once, up front, so every operation that takes an `Address`
/// can assume a well-formed 32-byte key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(Pubkey);

impl Address {
    /// Parse a base58 address. Surrounding whitespace is ignored.
    ///
    /// # Errors
    ///
    /// `AppError::InvalidAddress` if the input is empty or not a valid public key.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(AppError::InvalidAddress("address is empty".to_string()));
        }

        Pubkey::from_str(trimmed)
            .map(Self)
            .map_err(|e| AppError::InvalidAddress(format!("'{}': {}", trimmed, e)))
    }

    /// The underlying public key.
    pub fn pubkey(&self) -> &Pubkey {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl From<Pubkey> for Address {
    fn from(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(&self.0)
    }
}

/// Finality level reported by the ledger for a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmationState {
    Processed,
    Confirmed,
    Finalized,
}

impl ConfirmationState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfirmationState::Processed => "processed",
            ConfirmationState::Confirmed => "confirmed",
            ConfirmationState::Finalized => "finalized",
        }
    }
}

impl fmt::Display for ConfirmationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw signature row as reported by the ledger endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct SignatureEntry {
    /// Transaction signature (base58)
    pub signature: String,
    /// Slot the transaction landed in
    pub slot: u64,
    /// Block time in seconds since the Unix epoch, if the node has it
    pub block_time: Option<i64>,
    /// Whether the transaction executed with an error
    pub failed: bool,
    /// Memo attached to the transaction, if any
    pub memo: Option<String>,
    /// Finality level, if reported
    pub confirmation: Option<ConfirmationState>,
}

/// One historical transaction reference, ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityRecord {
    /// Transaction signature
    pub signature: String,
    /// Block time formatted in the local time zone
    pub observed_at: String,
    /// Finality level reported by the endpoint
    pub confirmation: Option<ConfirmationState>,
    /// Slot the transaction landed in
    pub slot: u64,
    /// Whether the transaction executed with an error
    pub failed: bool,
    /// Memo attached to the transaction, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

impl TryFrom<SignatureEntry> for ActivityRecord {
    type Error = AppError;

    /// Fails with `MissingTimestamp` if the entry has no block time, or one
    /// that cannot be represented as a calendar date.
    fn try_from(entry: SignatureEntry) -> Result<Self> {
        let observed_at = entry
            .block_time
            .and_then(lib_utils::format_block_time)
            .ok_or_else(|| AppError::MissingTimestamp {
                signature: entry.signature.clone(),
            })?;

        Ok(Self {
            signature: entry.signature,
            observed_at,
            confirmation: entry.confirmation,
            slot: entry.slot,
            failed: entry.failed,
            memo: entry.memo,
        })
    }
}

/// Spendable balance of an account.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Balance {
    /// Balance in lamports (smallest unit)
    pub lamports: u64,
    /// Balance in SOL (`lamports / 1_000_000_000`)
    pub sol: f64,
}

impl Balance {
    pub fn from_lamports(lamports: u64) -> Self {
        Self {
            lamports,
            sol: lamports as f64 / LAMPORTS_PER_SOL as f64,
        }
    }
}

/// Balance and recent activity for one address.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AddressSummary {
    pub address: Address,
    pub balance: Balance,
    pub activity: Vec<ActivityRecord>,
}
