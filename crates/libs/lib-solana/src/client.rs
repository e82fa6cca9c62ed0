//! # Solana RPC Client
//!
//! Provides a thin wrapper around the nonblocking Solana RPC client with network
//! selection, and implements [`LedgerReader`] on top of it.
//!
//! ## Network Selection
//!
//! - **Mainnet** with a Helius API key: `https://mainnet.helius-rpc.com/?api-key={key}`
//! - **Mainnet** without a key: `https://api.mainnet-beta.solana.com`
//! - **Devnet**: `https://api.devnet.solana.com`
//!
//! A custom RPC URL overrides all of the above.
//!
//! ## Example
//!
//! ```rust,no_run
//! use lib_solana::client::{Network, SolanaClient};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let client = SolanaClient::builder()
//!     .network(Network::Devnet)
//!     .timeout(Duration::from_secs(30))
//!     .build();
//!
//! client.health_check().await?;
//! # Ok(())
//! # }
//! ```

use crate::ledger::LedgerReader;
use crate::types::{ConfirmationState, SignatureEntry};
use async_trait::async_trait;
use lib_core::{AppError, Config};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_client::GetConfirmedSignaturesForAddress2Config;
use solana_client::rpc_response::RpcConfirmedTransactionStatusWithSignature;
use solana_sdk::pubkey::Pubkey;
use solana_transaction_status_client_types::TransactionConfirmationStatus;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

const MAINNET_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
const DEVNET_RPC_URL: &str = "https://api.devnet.solana.com";

/// Solana network selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Network {
    /// Solana mainnet-beta (production network)
    #[default]
    Mainnet,
    /// Solana devnet (test network)
    Devnet,
}

impl Network {
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Mainnet => "mainnet",
            Network::Devnet => "devnet",
        }
    }

    /// Resolve the RPC URL for this network.
    pub fn rpc_url(&self, helius_api_key: Option<&str>) -> String {
        match self {
            Network::Mainnet => match helius_api_key {
                Some(key) => format!("https://mainnet.helius-rpc.com/?api-key={}", key),
                None => MAINNET_RPC_URL.to_string(),
            },
            Network::Devnet => DEVNET_RPC_URL.to_string(),
        }
    }
}

impl FromStr for Network {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Network::Mainnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(AppError::Config(format!("Unknown Solana network: '{}'", other))),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Solana RPC client wrapper.
///
/// Cheap to clone; the underlying HTTP client is shared.
#[derive(Clone)]
pub struct SolanaClient {
    rpc: Arc<RpcClient>,
    network: Network,
}

/// Builder for configuring SolanaClient.
#[derive(Debug, Clone, Default)]
pub struct SolanaClientBuilder {
    network: Network,
    helius_api_key: Option<String>,
    custom_rpc_url: Option<String>,
    timeout: Option<Duration>,
}

impl SolanaClientBuilder {
    /// Set the Solana network.
    pub fn network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    /// Set the Helius API key for premium RPC access.
    pub fn helius_api_key(mut self, key: impl Into<String>) -> Self {
        self.helius_api_key = Some(key.into());
        self
    }

    /// Set a custom RPC URL (overrides network-based URL).
    pub fn custom_rpc_url(mut self, url: impl Into<String>) -> Self {
        self.custom_rpc_url = Some(url.into());
        self
    }

    /// Set the per-request timeout enforced by the RPC client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// The URL the built client will talk to.
    pub fn resolved_url(&self) -> String {
        self.custom_rpc_url
            .clone()
            .unwrap_or_else(|| self.network.rpc_url(self.helius_api_key.as_deref()))
    }

    /// Build the SolanaClient with configured settings.
    ///
    /// No network traffic happens here; the connection is made on first use.
    pub fn build(self) -> SolanaClient {
        let rpc_url = self.resolved_url();
        info!(
            "Connecting to Solana RPC: {} ({})",
            redact_url(&rpc_url),
            self.network
        );

        let rpc = match self.timeout {
            Some(timeout) => RpcClient::new_with_timeout(rpc_url, timeout),
            None => RpcClient::new(rpc_url),
        };

        SolanaClient {
            rpc: Arc::new(rpc),
            network: self.network,
        }
    }
}

impl SolanaClient {
    /// Create a builder for configuring a client.
    pub fn builder() -> SolanaClientBuilder {
        SolanaClientBuilder::default()
    }

    /// Create a client for `network`, optionally using a Helius API key on mainnet.
    pub fn new(network: Network, helius_api_key: Option<String>) -> Self {
        let mut builder = Self::builder().network(network);
        if let Some(key) = helius_api_key {
            builder = builder.helius_api_key(key);
        }
        builder.build()
    }

    /// Create a client from validated configuration.
    pub fn from_config(config: &Config) -> lib_core::Result<Self> {
        Ok(Self::builder_from_config(config)?.build())
    }

    fn builder_from_config(config: &Config) -> lib_core::Result<SolanaClientBuilder> {
        let mut builder = Self::builder().network(config.network.parse()?);

        if let Some(key) = &config.helius_api_key {
            builder = builder.helius_api_key(key.clone());
        }
        if let Some(url) = &config.rpc_url {
            builder = builder.custom_rpc_url(url.clone());
        }
        if let Some(secs) = config.rpc_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        Ok(builder)
    }

    /// Get the network this client is connected to.
    pub fn network(&self) -> Network {
        self.network
    }

    /// The RPC URL in use.
    pub fn rpc_url(&self) -> String {
        self.rpc.url()
    }

    /// Check if the RPC endpoint is reachable.
    pub async fn health_check(&self) -> anyhow::Result<()> {
        let _ = self
            .rpc
            .get_version()
            .await
            .map_err(|e| anyhow::anyhow!("Health check failed: {}", e))?;
        Ok(())
    }

    /// Get the balance of an account in lamports.
    pub async fn get_balance(&self, pubkey: &Pubkey) -> anyhow::Result<u64> {
        self.rpc
            .get_balance(pubkey)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get balance: {}", e))
    }

    /// Get up to `limit` transaction signatures for an address, newest first.
    pub async fn get_signatures_for_address(
        &self,
        pubkey: &Pubkey,
        limit: usize,
    ) -> anyhow::Result<Vec<RpcConfirmedTransactionStatusWithSignature>> {
        self.rpc
            .get_signatures_for_address_with_config(pubkey, signatures_config(limit))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to get signatures: {}", e))
    }
}

#[async_trait]
impl LedgerReader for SolanaClient {
    async fn recent_signatures(
        &self,
        address: &Pubkey,
        limit: usize,
    ) -> anyhow::Result<Vec<SignatureEntry>> {
        let statuses = self.get_signatures_for_address(address, limit).await?;
        debug!("Endpoint returned {} signatures for {}", statuses.len(), address);
        Ok(statuses.into_iter().map(SignatureEntry::from).collect())
    }

    async fn balance_lamports(&self, address: &Pubkey) -> anyhow::Result<u64> {
        self.get_balance(address).await
    }
}

impl From<TransactionConfirmationStatus> for ConfirmationState {
    fn from(status: TransactionConfirmationStatus) -> Self {
        match status {
            TransactionConfirmationStatus::Processed => ConfirmationState::Processed,
            TransactionConfirmationStatus::Confirmed => ConfirmationState::Confirmed,
            TransactionConfirmationStatus::Finalized => ConfirmationState::Finalized,
        }
    }
}

impl From<RpcConfirmedTransactionStatusWithSignature> for SignatureEntry {
    fn from(status: RpcConfirmedTransactionStatusWithSignature) -> Self {
        Self {
            signature: status.signature,
            slot: status.slot,
            block_time: status.block_time,
            failed: status.err.is_some(),
            memo: status.memo,
            confirmation: status.confirmation_status.map(ConfirmationState::from),
        }
    }
}

/// Request options for `getSignaturesForAddress`: newest first, capped at `limit`.
fn signatures_config(limit: usize) -> GetConfirmedSignaturesForAddress2Config {
    GetConfirmedSignaturesForAddress2Config {
        limit: Some(limit),
        ..Default::default()
    }
}

/// Strip the query string so API keys never reach the logs.
fn redact_url(url: &str) -> &str {
    url.split_once('?').map_or(url, |(base, _)| base)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_from_str() {
        assert_eq!("mainnet".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!("Mainnet-Beta".parse::<Network>().unwrap(), Network::Mainnet);
        assert_eq!(" DEVNET ".parse::<Network>().unwrap(), Network::Devnet);
        assert!(matches!("testnet".parse::<Network>(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_url_resolution() {
        assert_eq!(Network::Mainnet.rpc_url(None), MAINNET_RPC_URL);
        assert_eq!(
            Network::Mainnet.rpc_url(Some("abc")),
            "https://mainnet.helius-rpc.com/?api-key=abc"
        );
        assert_eq!(Network::Devnet.rpc_url(Some("abc")), DEVNET_RPC_URL);

        let builder = SolanaClient::builder()
            .network(Network::Mainnet)
            .helius_api_key("abc")
            .custom_rpc_url("http://127.0.0.1:8899");
        assert_eq!(builder.resolved_url(), "http://127.0.0.1:8899");
    }

    #[test]
    fn test_builder_from_config() {
        let config = Config {
            network: "devnet".to_string(),
            rpc_timeout_secs: Some(10),
            ..Default::default()
        };
        let builder = SolanaClient::builder_from_config(&config).unwrap();
        assert_eq!(builder.resolved_url(), DEVNET_RPC_URL);
        assert_eq!(builder.timeout, Some(Duration::from_secs(10)));

        let bad = Config {
            network: "localnet".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            SolanaClient::builder_from_config(&bad),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_redact_url() {
        assert_eq!(
            redact_url("https://mainnet.helius-rpc.com/?api-key=secret"),
            "https://mainnet.helius-rpc.com/"
        );
        assert_eq!(redact_url(DEVNET_RPC_URL), DEVNET_RPC_URL);
    }

    #[test]
    fn test_signature_entry_from_rpc_status() {
        let status = RpcConfirmedTransactionStatusWithSignature {
            signature: "sig".to_string(),
            slot: 42,
            err: None,
            memo: Some("invoice 7".to_string()),
            block_time: Some(1_700_000_000),
            confirmation_status: Some(TransactionConfirmationStatus::Confirmed),
        };

        let entry = SignatureEntry::from(status);
        assert_eq!(entry.signature, "sig");
        assert_eq!(entry.slot, 42);
        assert!(!entry.failed);
        assert_eq!(entry.memo.as_deref(), Some("invoice 7"));
        assert_eq!(entry.block_time, Some(1_700_000_000));
        assert_eq!(entry.confirmation, Some(ConfirmationState::Confirmed));
    }

    #[tokio::test]
    async fn test_client_construction_is_lazy() {
        let client = SolanaClient::new(Network::Devnet, None);
        assert_eq!(client.network(), Network::Devnet);
        assert_eq!(client.rpc_url(), DEVNET_RPC_URL);
    }

    // region:    --- Mock RPC endpoint

    use crate::activity::{AddressActivityService, ACTIVITY_LIMIT};
    use solana_client::rpc_request::RpcRequest;
    use std::collections::HashMap;

    const SYSTEM_ADDRESS: &str = "11111111111111111111111111111111";

    fn mock_client(rpc: RpcClient) -> SolanaClient {
        SolanaClient {
            rpc: Arc::new(rpc),
            network: Network::Devnet,
        }
    }

    fn mock_service(rpc: RpcClient) -> AddressActivityService {
        AddressActivityService::new(Arc::new(mock_client(rpc)))
    }

    fn rpc_status(index: usize, block_time: Option<i64>) -> RpcConfirmedTransactionStatusWithSignature {
        RpcConfirmedTransactionStatusWithSignature {
            signature: format!("mocksig{}", index),
            slot: 1_000 - index as u64,
            err: None,
            memo: None,
            block_time,
            confirmation_status: Some(TransactionConfirmationStatus::Finalized),
        }
    }

    fn signatures_mock(statuses: Vec<RpcConfirmedTransactionStatusWithSignature>) -> RpcClient {
        let mut mocks = HashMap::new();
        mocks.insert(
            RpcRequest::GetSignaturesForAddress,
            serde_json::to_value(statuses).unwrap(),
        );
        RpcClient::new_mock_with_mocks("succeeds".to_string(), mocks)
    }

    #[test]
    fn test_signatures_request_carries_limit() {
        let config = signatures_config(ACTIVITY_LIMIT);
        assert_eq!(config.limit, Some(10));
        assert!(config.before.is_none());
        assert!(config.until.is_none());
    }

    #[tokio::test]
    async fn test_rpc_balance_is_converted() {
        let service = mock_service(RpcClient::new_mock("succeeds".to_string()));

        let balance = service.fetch_balance(SYSTEM_ADDRESS).await.unwrap();

        assert_eq!(balance.lamports, 50);
        assert_eq!(balance.sol, 50.0 / 1e9);
    }

    #[tokio::test]
    async fn test_rpc_row_without_block_time_is_missing_timestamp() {
        // The stock mock endpoint answers getSignaturesForAddress with a row
        // that carries no block time.
        let service = mock_service(RpcClient::new_mock("succeeds".to_string()));

        let result = service.fetch_recent_activity(SYSTEM_ADDRESS).await;

        assert!(matches!(result, Err(AppError::MissingTimestamp { .. })));
    }

    #[tokio::test]
    async fn test_rpc_failure_is_endpoint_unavailable() {
        let service = mock_service(RpcClient::new_mock("fails".to_string()));

        assert!(matches!(
            service.fetch_balance(SYSTEM_ADDRESS).await,
            Err(AppError::EndpointUnavailable(ref msg)) if msg.contains("Failed to get balance")
        ));
        assert!(matches!(
            service.fetch_recent_activity(SYSTEM_ADDRESS).await,
            Err(AppError::EndpointUnavailable(ref msg)) if msg.contains("Failed to get signatures")
        ));
    }

    #[tokio::test]
    async fn test_rpc_rows_keep_order_and_cap() {
        let statuses = (0..12)
            .map(|i| rpc_status(i, Some(1_700_000_000 - i as i64)))
            .collect();
        let service = mock_service(signatures_mock(statuses));

        let records = service.fetch_recent_activity(SYSTEM_ADDRESS).await.unwrap();

        assert_eq!(records.len(), ACTIVITY_LIMIT);
        assert_eq!(records[0].signature, "mocksig0");
        assert_eq!(records[9].signature, "mocksig9");
        assert_eq!(records[0].confirmation, Some(ConfirmationState::Finalized));
        assert_eq!(records[0].slot, 1_000);
    }

    #[tokio::test]
    async fn test_rpc_missing_block_time_names_signature() {
        let statuses = vec![
            rpc_status(0, Some(1_700_000_000)),
            rpc_status(1, Some(1_700_000_100)),
            rpc_status(2, None),
        ];
        let service = mock_service(signatures_mock(statuses));

        assert_eq!(
            service.fetch_recent_activity(SYSTEM_ADDRESS).await,
            Err(AppError::MissingTimestamp {
                signature: "mocksig2".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_health_check_against_mock() {
        assert!(mock_client(RpcClient::new_mock("succeeds".to_string()))
            .health_check()
            .await
            .is_ok());
        assert!(mock_client(RpcClient::new_mock("fails".to_string()))
            .health_check()
            .await
            .is_err());
    }

    // endregion: --- Mock RPC endpoint
}
