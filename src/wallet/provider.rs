//! Wallet provider contract
//!
//! Key material stays inside the wallet. This crate only ever sees public
//! account data, key names and signed transaction bytes.

use crate::client::{EncodeObject, StdFee};
use crate::config::ChainDescriptor;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Public data for one signing account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountData {
    pub address: String,
    #[serde(default)]
    pub algo: String,
    /// Base64 public key
    #[serde(default)]
    pub pubkey: String,
}

/// Human-readable key metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyInfo {
    pub name: String,
    #[serde(default)]
    pub bech32_address: String,
}

/// Notifications pushed by the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalletEvent {
    /// The active key or account set changed
    KeystoreChanged,
}

/// Everything the wallet needs to produce a signed transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignRequest {
    pub chain_id: String,
    pub messages: Vec<EncodeObject>,
    pub fee: StdFee,
    #[serde(default)]
    pub memo: String,
}

/// Encoded `TxRaw` bytes ready for broadcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTx {
    #[serde(with = "crate::client::base64_bytes")]
    pub tx_bytes: Vec<u8>,
}

/// Signs on behalf of the wallet's accounts without exposing keys
#[async_trait]
pub trait OfflineSigner: Send + Sync {
    async fn get_accounts(&self) -> Result<Vec<AccountData>>;

    async fn sign(&self, signer_address: &str, request: &SignRequest) -> Result<SignedTx>;

    /// Encode `request` with an empty signature for gas simulation.
    /// Must not prompt the user.
    async fn encode_for_simulation(
        &self,
        signer_address: &str,
        request: &SignRequest,
    ) -> Result<SignedTx>;
}

/// A wallet that holds keys and authorizes signing
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Ask the user to authorize this client for `chain_id`
    async fn enable(&self, chain_id: &str) -> Result<()>;

    async fn get_offline_signer(&self, chain_id: &str) -> Result<Arc<dyn OfflineSigner>>;

    async fn get_key(&self, chain_id: &str) -> Result<KeyInfo>;

    /// Register a chain the wallet may not know yet; known chains are a no-op
    async fn experimental_suggest_chain(&self, descriptor: &ChainDescriptor) -> Result<()>;
}
