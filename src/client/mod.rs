//! Signing client contract
//!
//! A signing client turns messages into signed, broadcast transactions. It
//! is opened from a wallet's offline signer and bound to one RPC endpoint.
//! `crate::bridge::RpcSigningConnector` is the production implementation.

use crate::coins::{Coin, GasPrice};
use crate::wallet::OfflineSigner;
use crate::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Type URL of a CosmWasm contract execution
pub const MSG_EXECUTE_CONTRACT_TYPE_URL: &str = "/cosmwasm.wasm.v1.MsgExecuteContract";

/// Base64 encoding for raw byte fields on the wire
pub(crate) mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD.decode(encoded).map_err(serde::de::Error::custom)
    }
}

/// Instruction for a deployed contract to run one of its entry points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgExecuteContract {
    pub sender: String,
    pub contract: String,
    /// UTF-8 JSON body
    #[serde(with = "base64_bytes")]
    pub msg: Vec<u8>,
    #[serde(default)]
    pub funds: Vec<Coin>,
}

/// A message tagged with its protobuf type URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeObject {
    pub type_url: String,
    pub value: MsgExecuteContract,
}

/// Fee selection for a broadcast
#[derive(Debug, Clone, PartialEq)]
pub enum Fee {
    /// Simulate, then pay for the estimated gas at the client's gas price
    Auto,
    /// Explicit fee
    Fixed(StdFee),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StdFee {
    pub amount: Vec<Coin>,
    pub gas: String,
}

impl StdFee {
    pub fn new(amount: Coin, gas_limit: u64) -> Self {
        Self {
            amount: vec![amount],
            gas: gas_limit.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SigningClientOptions {
    pub gas_price: GasPrice,
}

/// Outcome of a broadcast that reached the node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliverTxResponse {
    pub transaction_hash: String,
    /// Zero on success
    pub code: u32,
    #[serde(default)]
    pub raw_log: String,
}

impl DeliverTxResponse {
    pub fn is_success(&self) -> bool {
        self.code == 0
    }
}

/// Network-connected signer and broadcaster
#[async_trait]
pub trait SigningClient: Send + Sync {
    /// Sign `messages` as `signer_address` and broadcast them in one transaction
    async fn sign_and_broadcast(
        &self,
        signer_address: &str,
        messages: Vec<EncodeObject>,
        fee: Fee,
    ) -> Result<DeliverTxResponse>;

    /// Close the underlying network connection
    async fn disconnect(&self);
}

/// Opens signing clients
#[async_trait]
pub trait SigningClientConnector: Send + Sync {
    async fn connect_with_signer(
        &self,
        rpc_endpoint: &str,
        signer: Arc<dyn OfflineSigner>,
        options: SigningClientOptions,
    ) -> Result<Arc<dyn SigningClient>>;
}
