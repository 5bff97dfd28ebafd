//! Configuration for the round claimer
//!
//! Configuration is loaded once at startup and never mutated afterwards:
//! 1. A JSON config file passed with `--config` (or built-in defaults)
//! 2. Environment overrides (`CHAIN_ID`, `RPC_ENDPOINT`, ...), `.env` included

pub mod chain;

use crate::coins::GasPrice;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub use chain::ChainDescriptor;

/// Environment variable names
pub mod env_vars {
    pub const CHAIN_ID: &str = "CHAIN_ID";
    pub const CHAIN_NAME: &str = "CHAIN_NAME";
    pub const RPC_ENDPOINT: &str = "RPC_ENDPOINT";
    pub const REST_ENDPOINT: &str = "REST_ENDPOINT";
    pub const BECH32_PREFIX: &str = "BECH32_PREFIX";
    pub const COIN_DENOM: &str = "COIN_DENOM";
    pub const COIN_DECIMALS: &str = "COIN_DECIMALS";
    pub const GAS_PRICE: &str = "GAS_PRICE";
    pub const CONTRACT_ADDRESS: &str = "CONTRACT_ADDRESS";
    pub const LAST_VALID_ROUND: &str = "LAST_VALID_ROUND";
    pub const WALLET_BRIDGE_URL: &str = "WALLET_BRIDGE_URL";
    /// Read directly by the bridge transport, never stored in `Config`
    pub const WALLET_BRIDGE_TOKEN: &str = "WALLET_BRIDGE_TOKEN";
}

/// Static description of the chain and the prediction-market contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc_endpoint: String,
    pub rest_endpoint: String,
    pub bech32_prefix: String,
    /// Minimal denomination, e.g. `ujuno`
    pub coin_denom: String,
    pub coin_decimals: u8,
    /// Price per unit of gas in `coin_denom`, without the denom suffix
    pub gas_price: String,
    /// Prediction-market contract that pays out winnings
    pub contract_address: String,
    /// Highest round id accepted by the claim flow
    pub last_valid_round: u64,
    /// Transaction hashes are appended to this prefix for display
    #[serde(default = "default_explorer_tx_url")]
    pub explorer_tx_url: String,
    /// How long `connect` waits for the wallet provider to become ready
    #[serde(default = "default_provider_wait_ms")]
    pub provider_wait_ms: u64,
}

fn default_explorer_tx_url() -> String {
    "https://www.mintscan.io/juno/txs/".to_string()
}

fn default_provider_wait_ms() -> u64 {
    5_000
}

impl ChainConfig {
    /// Gas price as `<price><denom>`
    pub fn gas_price(&self) -> Result<GasPrice> {
        format!("{}{}", self.gas_price, self.coin_denom).parse()
    }

    pub fn provider_wait(&self) -> Duration {
        Duration::from_millis(self.provider_wait_ms)
    }

    /// Explorer link for a transaction hash
    pub fn explorer_link(&self, tx_hash: &str) -> String {
        format!("{}{}", self.explorer_tx_url, tx_hash)
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            chain_id: "juno-1".to_string(),
            chain_name: "Juno".to_string(),
            rpc_endpoint: "https://juno-rpc.polkachu.com".to_string(),
            rest_endpoint: "https://juno-api.polkachu.com".to_string(),
            bech32_prefix: "juno".to_string(),
            coin_denom: "ujuno".to_string(),
            coin_decimals: 6,
            gas_price: "0.075".to_string(),
            contract_address:
                "juno1uugwj8uneuvllu2e2znn2nfha0sq6n45stv6g3vg4w3v07uy2quqzxueun".to_string(),
            last_valid_round: 10765,
            explorer_tx_url: default_explorer_tx_url(),
            provider_wait_ms: default_provider_wait_ms(),
        }
    }
}

/// Wallet bridge settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// JSON-RPC endpoint of the wallet daemon
    pub url: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            url: "http://127.0.0.1:8645".to_string(),
        }
    }
}

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub chain: ChainConfig,
    #[serde(default)]
    pub bridge: BridgeSettings,
    /// Path to the claim audit log (JSONL); disabled when absent
    #[serde(default)]
    pub audit_log_path: Option<String>,
}

impl Config {
    /// Load from an optional JSON file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&content)
                    .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?
            }
            None => Config::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from a variable lookup (the process environment in
    /// production)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let chain = &mut self.chain;
        let string_overrides: [(&str, &mut String); 9] = [
            (env_vars::CHAIN_ID, &mut chain.chain_id),
            (env_vars::CHAIN_NAME, &mut chain.chain_name),
            (env_vars::RPC_ENDPOINT, &mut chain.rpc_endpoint),
            (env_vars::REST_ENDPOINT, &mut chain.rest_endpoint),
            (env_vars::BECH32_PREFIX, &mut chain.bech32_prefix),
            (env_vars::COIN_DENOM, &mut chain.coin_denom),
            (env_vars::GAS_PRICE, &mut chain.gas_price),
            (env_vars::CONTRACT_ADDRESS, &mut chain.contract_address),
            (env_vars::WALLET_BRIDGE_URL, &mut self.bridge.url),
        ];
        for (name, slot) in string_overrides {
            if let Some(value) = lookup(name) {
                tracing::debug!(var = name, "Using environment override");
                *slot = value;
            }
        }

        if let Some(value) = lookup(env_vars::COIN_DECIMALS) {
            chain.coin_decimals = value.trim().parse().map_err(|e| {
                Error::Config(format!("{} must be an integer: {}", env_vars::COIN_DECIMALS, e))
            })?;
        }
        if let Some(value) = lookup(env_vars::LAST_VALID_ROUND) {
            chain.last_valid_round = value.trim().parse().map_err(|e| {
                Error::Config(format!(
                    "{} must be an integer: {}",
                    env_vars::LAST_VALID_ROUND,
                    e
                ))
            })?;
        }

        Ok(())
    }

    /// Reject configurations the claim flow cannot work with
    pub fn validate(&self) -> Result<()> {
        for (name, endpoint) in [
            ("rpc_endpoint", &self.chain.rpc_endpoint),
            ("rest_endpoint", &self.chain.rest_endpoint),
            ("bridge.url", &self.bridge.url),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| Error::Config(format!("Invalid {}: {}", name, e)))?;
        }

        self.chain
            .gas_price()
            .map_err(|e| Error::Config(format!("Invalid gas price: {}", e)))?;

        if self.chain.contract_address.is_empty() {
            return Err(Error::Config("contract_address is empty".to_string()));
        }
        if self.chain.last_valid_round == 0 {
            return Err(Error::Config("last_valid_round must be at least 1".to_string()));
        }

        Ok(())
    }
}
