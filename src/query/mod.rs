//! Read path: batched contract queries
//!
//! `BatchQueryClient` sends CosmWasm smart queries over Tendermint JSON-RPC,
//! several per HTTP round trip when asked to. `MarketQuerier` layers the
//! prediction market's query messages on top. The claim flow never uses it.

mod market;

pub use market::{ContractConfig, FinishedRound, MarketQuerier, Position, QueryMsg};

use crate::rpc::cosmos::{QuerySmartContractStateRequest, QuerySmartContractStateResponse};
use crate::rpc::TendermintRpc;
use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use prost::Message;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

/// gRPC method path served through `abci_query`
pub const SMART_CONTRACT_STATE_PATH: &str = "/cosmwasm.wasm.v1.Query/SmartContractState";

/// Serialize to JSON, then base64
pub fn to_binary<T: Serialize>(value: &T) -> Result<String> {
    Ok(STANDARD.encode(serde_json::to_vec(value)?))
}

/// Inverse of [`to_binary`]
pub fn from_binary<T: DeserializeOwned>(encoded: &str) -> Result<T> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| Error::InvalidArgument(format!("Invalid base64: {}", e)))?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn encode_smart_query<Q: Serialize>(contract: &str, query: &Q) -> Result<Vec<u8>> {
    Ok(QuerySmartContractStateRequest {
        address: contract.to_string(),
        query_data: serde_json::to_vec(query)?,
    }
    .encode_to_vec())
}

fn decode_smart_response(payload: &[u8]) -> Result<Value> {
    let response = QuerySmartContractStateResponse::decode(payload)?;
    if response.data.is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_slice(&response.data)?)
}

/// Query client against one RPC endpoint
#[derive(Debug, Clone)]
pub struct BatchQueryClient {
    rpc: TendermintRpc,
}

impl BatchQueryClient {
    pub fn connect(rpc_endpoint: &str) -> Result<Self> {
        Ok(Self {
            rpc: TendermintRpc::new(rpc_endpoint)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        self.rpc.endpoint()
    }

    /// One smart query
    pub async fn query_contract_smart<Q, R>(&self, contract: &str, query: &Q) -> Result<R>
    where
        Q: Serialize,
        R: DeserializeOwned,
    {
        let data = encode_smart_query(contract, query)?;
        let payload = self
            .rpc
            .abci_query(SMART_CONTRACT_STATE_PATH, &data)
            .await?
            .into_value()?;
        Ok(serde_json::from_value(decode_smart_response(&payload)?)?)
    }

    /// Several smart queries in one batch; each entry succeeds or fails alone
    pub async fn query_contract_smart_many<Q>(
        &self,
        queries: &[(&str, Q)],
    ) -> Result<Vec<Result<Value>>>
    where
        Q: Serialize,
    {
        let mut calls = Vec::with_capacity(queries.len());
        for (contract, query) in queries {
            let data = encode_smart_query(contract, query)?;
            calls.push((
                "abci_query",
                TendermintRpc::abci_query_params(SMART_CONTRACT_STATE_PATH, &data)?,
            ));
        }

        let results = self.rpc.call_batch(calls).await?;
        Ok(results
            .into_iter()
            .map(|result| {
                let payload = TendermintRpc::parse_abci_query(result?)?.into_value()?;
                decode_smart_response(&payload)
            })
            .collect())
    }
}
