//! Chain description handed to the wallet provider
//!
//! Wallets only sign for chains they know about. The descriptor is built
//! from `ChainConfig` and registered once per session manager.

use super::ChainConfig;
use crate::coins::display_denom;
use serde::{Deserialize, Serialize};

/// SLIP-44 coin type shared by Cosmos SDK chains
pub const COSMOS_COIN_TYPE: u32 = 118;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bip44 {
    pub coin_type: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bech32Config {
    pub bech32_prefix_acc_addr: String,
    pub bech32_prefix_acc_pub: String,
    pub bech32_prefix_val_addr: String,
    pub bech32_prefix_val_pub: String,
    pub bech32_prefix_cons_addr: String,
    pub bech32_prefix_cons_pub: String,
}

impl Bech32Config {
    pub fn from_prefix(prefix: &str) -> Self {
        Self {
            bech32_prefix_acc_addr: prefix.to_string(),
            bech32_prefix_acc_pub: format!("{prefix}pub"),
            bech32_prefix_val_addr: format!("{prefix}valoper"),
            bech32_prefix_val_pub: format!("{prefix}valoperpub"),
            bech32_prefix_cons_addr: format!("{prefix}valcons"),
            bech32_prefix_cons_pub: format!("{prefix}valconspub"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Currency {
    /// Display symbol, e.g. `JUNO`
    pub coin_denom: String,
    /// On-chain denomination, e.g. `ujuno`
    pub coin_minimal_denom: String,
    pub coin_decimals: u8,
}

/// Wire shape of a chain suggestion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub chain_id: String,
    pub chain_name: String,
    pub rpc: String,
    pub rest: String,
    pub bip44: Bip44,
    pub bech32_config: Bech32Config,
    pub currencies: Vec<Currency>,
    pub fee_currencies: Vec<Currency>,
    pub stake_currency: Currency,
    pub coin_type: u32,
}

impl ChainDescriptor {
    pub fn from_config(config: &ChainConfig) -> Self {
        let currency = Currency {
            coin_denom: display_denom(&config.coin_denom),
            coin_minimal_denom: config.coin_denom.clone(),
            coin_decimals: config.coin_decimals,
        };

        Self {
            chain_id: config.chain_id.clone(),
            chain_name: config.chain_name.clone(),
            rpc: config.rpc_endpoint.clone(),
            rest: config.rest_endpoint.clone(),
            bip44: Bip44 {
                coin_type: COSMOS_COIN_TYPE,
            },
            bech32_config: Bech32Config::from_prefix(&config.bech32_prefix),
            currencies: vec![currency.clone()],
            fee_currencies: vec![currency.clone()],
            stake_currency: currency,
            coin_type: COSMOS_COIN_TYPE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_from_default_config() {
        let descriptor = ChainDescriptor::from_config(&ChainConfig::default());

        assert_eq!(descriptor.chain_id, "juno-1");
        assert_eq!(descriptor.stake_currency.coin_denom, "JUNO");
        assert_eq!(descriptor.stake_currency.coin_minimal_denom, "ujuno");
        assert_eq!(descriptor.bech32_config.bech32_prefix_val_pub, "junovaloperpub");
        assert_eq!(descriptor.bip44.coin_type, 118);
    }

    #[test]
    fn descriptor_serializes_camel_case() {
        let value = serde_json::to_value(ChainDescriptor::from_config(&ChainConfig::default()))
            .unwrap();
        assert_eq!(value["bech32Config"]["bech32PrefixAccAddr"], "juno");
        assert_eq!(value["feeCurrencies"][0]["coinDecimals"], 6);
        assert_eq!(value["coinType"], 118);
    }
}
