//! # Address Activity Service
//!
//! Looks up recent transaction activity and the spendable balance of an address
//! and normalizes both into display-ready shapes.
//!
//! ## Behavior
//!
//! - Addresses are validated before any request is made.
//! - At most [`ACTIVITY_LIMIT`] records are returned, in the order the endpoint
//!   supplied them (newest first). No re-sorting.
//! - A record without a block time fails the whole call with
//!   `AppError::MissingTimestamp`; callers never see a partial list.
//! - Endpoint failures surface as `AppError::EndpointUnavailable`. Nothing is
//!   retried or cached, and no timeout is added on top of the client's own.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lib_solana::{AddressActivityService, Network, SolanaClient};
//! use std::sync::Arc;
//!
//! # async fn example() -> lib_core::Result<()> {
//! let client = SolanaClient::new(Network::Devnet, None);
//! let service = AddressActivityService::new(Arc::new(client));
//!
//! let balance = service.fetch_balance("11111111111111111111111111111111").await?;
//! let activity = service.fetch_recent_activity("11111111111111111111111111111111").await?;
//! println!("{} SOL, {} recent transactions", balance.sol, activity.len());
//! # Ok(())
//! # }
//! ```

use crate::ledger::LedgerReader;
use crate::types::{ActivityRecord, Address, AddressSummary, Balance};
use lib_core::{AppError, Result};
use std::sync::Arc;
use tracing::{debug, instrument, warn};

/// Maximum number of activity records requested per lookup.
pub const ACTIVITY_LIMIT: usize = 10;

/// Service for address activity and balance lookups.
///
/// Holds no state besides the injected reader, so it can be shared freely
/// across tasks.
#[derive(Clone)]
pub struct AddressActivityService {
    ledger: Arc<dyn LedgerReader>,
}

impl AddressActivityService {
    pub fn new(ledger: Arc<dyn LedgerReader>) -> Self {
        Self { ledger }
    }

    /// Fetch the most recent transactions referencing `address`.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidAddress` - malformed address, no request made
    /// * `AppError::EndpointUnavailable` - the endpoint request failed
    /// * `AppError::MissingTimestamp` - a returned transaction has no block time
    #[instrument(skip(self), fields(address = %address))]
    pub async fn fetch_recent_activity(&self, address: &str) -> Result<Vec<ActivityRecord>> {
        let address = Address::parse(address)?;
        self.recent_activity(&address).await
    }

    /// Fetch the spendable balance of `address` in SOL.
    ///
    /// # Errors
    ///
    /// * `AppError::InvalidAddress` - malformed address, no request made
    /// * `AppError::EndpointUnavailable` - the endpoint request failed
    #[instrument(skip(self), fields(address = %address))]
    pub async fn fetch_balance(&self, address: &str) -> Result<Balance> {
        let address = Address::parse(address)?;
        self.balance(&address).await
    }

    /// Fetch balance and recent activity for `address`, one after the other.
    ///
    /// Fails with the first error either lookup produces.
    #[instrument(skip(self), fields(address = %address))]
    pub async fn fetch_summary(&self, address: &str) -> Result<AddressSummary> {
        let address = Address::parse(address)?;
        let balance = self.balance(&address).await?;
        let activity = self.recent_activity(&address).await?;

        Ok(AddressSummary {
            address,
            balance,
            activity,
        })
    }

    async fn recent_activity(&self, address: &Address) -> Result<Vec<ActivityRecord>> {
        debug!("Getting recent activity (limit: {})", ACTIVITY_LIMIT);

        let entries = self
            .ledger
            .recent_signatures(address.pubkey(), ACTIVITY_LIMIT)
            .await
            .map_err(endpoint_unavailable)?;

        let records = entries
            .into_iter()
            .take(ACTIVITY_LIMIT)
            .map(ActivityRecord::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!("Normalized {} activity records", records.len());
        Ok(records)
    }

    async fn balance(&self, address: &Address) -> Result<Balance> {
        let lamports = self
            .ledger
            .balance_lamports(address.pubkey())
            .await
            .map_err(endpoint_unavailable)?;

        debug!("Balance: {} lamports", lamports);
        Ok(Balance::from_lamports(lamports))
    }
}

fn endpoint_unavailable(err: anyhow::Error) -> AppError {
    warn!("Ledger endpoint request failed: {:#}", err);
    AppError::EndpointUnavailable(format!("{:#}", err))
}
