//! # Application Configuration
//!
//! Ledger endpoint configuration loaded from environment variables.
//! Configuration is validated on load so a misconfigured process fails fast.
//!
//! The loaded [`Config`] is owned by the caller and handed to whatever builds
//! the RPC client; there is no process-wide instance.
//!
//! ```rust,no_run
//! use lib_core::config::Config;
//!
//! # fn main() -> lib_core::Result<()> {
//! let config = Config::load()?;
//! println!("network: {}", config.network);
//! # Ok(())
//! # }
//! ```

use crate::error::{AppError, Result};
use lib_utils::{envs, validate_not_empty, validate_range, validate_url_scheme};

/// Networks accepted in `SOLANA_NETWORK`.
pub const SUPPORTED_NETWORKS: &[&str] = &["mainnet", "mainnet-beta", "devnet"];

/// Bounds for `RPC_TIMEOUT_SECS`.
const MIN_TIMEOUT_SECS: u64 = 1;
const MAX_TIMEOUT_SECS: u64 = 300;

/// Ledger endpoint configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// Target cluster name (`SOLANA_NETWORK`, default `mainnet`)
    pub network: String,

    /// Helius API key for the premium mainnet endpoint (`HELIUS_API_KEY`)
    pub helius_api_key: Option<String>,

    /// Explicit RPC URL, overrides network-based selection (`SOLANA_RPC_URL`)
    pub rpc_url: Option<String>,

    /// Request timeout enforced by the RPC client (`RPC_TIMEOUT_SECS`)
    ///
    /// When unset, the client library default applies.
    pub rpc_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: "mainnet".to_string(),
            helius_api_key: None,
            rpc_url: None,
            rpc_timeout_secs: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let network = envs::get_env_opt("SOLANA_NETWORK")
            .map(|n| n.to_lowercase())
            .unwrap_or_else(|| "mainnet".to_string());

        let rpc_timeout_secs = envs::get_env_parse_opt::<u64>("RPC_TIMEOUT_SECS")
            .map_err(|e| AppError::Config(format!("RPC_TIMEOUT_SECS must be a valid number: {}", e)))?;

        Ok(Self {
            network,
            helius_api_key: envs::get_env_opt("HELIUS_API_KEY"),
            rpc_url: envs::get_env_opt("SOLANA_RPC_URL"),
            rpc_timeout_secs,
        })
    }

    /// Load from the environment and validate in one step.
    pub fn load() -> Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        validate_not_empty(&self.network, "SOLANA_NETWORK").map_err(AppError::Config)?;

        if !SUPPORTED_NETWORKS.contains(&self.network.as_str()) {
            return Err(AppError::Config(format!(
                "SOLANA_NETWORK must be one of {}, got '{}'",
                SUPPORTED_NETWORKS.join(", "),
                self.network
            )));
        }

        if let Some(key) = &self.helius_api_key {
            validate_not_empty(key, "HELIUS_API_KEY").map_err(AppError::Config)?;
        }

        if let Some(url) = &self.rpc_url {
            validate_url_scheme(url, "SOLANA_RPC_URL").map_err(AppError::Config)?;
        }

        if let Some(secs) = self.rpc_timeout_secs {
            validate_range(secs, MIN_TIMEOUT_SECS, MAX_TIMEOUT_SECS, "RPC_TIMEOUT_SECS")
                .map_err(AppError::Config)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_devnet_with_custom_url_is_valid() {
        let config = Config {
            network: "devnet".to_string(),
            rpc_url: Some("http://127.0.0.1:8899".to_string()),
            rpc_timeout_secs: Some(30),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_network_rejected() {
        let config = Config {
            network: "testnet".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
        assert!(err.to_string().contains("testnet"));
    }

    #[test]
    fn test_bad_rpc_url_rejected() {
        let config = Config {
            rpc_url: Some("api.devnet.solana.com".to_string()),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_timeout_out_of_range_rejected() {
        for secs in [0, 301] {
            let config = Config {
                rpc_timeout_secs: Some(secs),
                ..Default::default()
            };
            assert!(matches!(config.validate(), Err(AppError::Config(_))), "{} secs", secs);
        }
    }
}
