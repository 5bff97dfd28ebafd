//! Tendermint JSON-RPC over HTTP
//!
//! Single calls and batches (one POST carrying an array of requests). Batch
//! responses may arrive in any order; they are matched back by request id.

pub mod cosmos;

use crate::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use jsonrpsee::core::client::ClientT;
use jsonrpsee::core::params::{BatchRequestBuilder, ObjectParams};
use jsonrpsee::core::traits::ToRpcParams;
use jsonrpsee::core::ClientError;
use jsonrpsee::http_client::{HttpClient, HttpClientBuilder};
use jsonrpsee::types::ErrorObject;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Error object answered by the node, with its `data` detail when present
pub(crate) fn call_error(error: &ErrorObject<'_>) -> Error {
    let detail = match error.data().map(|data| serde_json::from_str::<Value>(data.get())) {
        Some(Ok(Value::String(data))) if !data.is_empty() => format!(": {}", data),
        Some(Ok(Value::String(_))) | Some(Ok(Value::Null)) | None => String::new(),
        Some(Ok(other)) => format!(": {}", other),
        Some(Err(_)) => String::new(),
    };
    Error::Rpc(format!("{} ({}){}", error.message(), error.code(), detail))
}

fn client_error(error: ClientError) -> Error {
    match error {
        ClientError::Call(error) => call_error(&error),
        other => Error::Network(other),
    }
}

/// `abci_query` response body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AbciQueryResponse {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub codespace: String,
    /// Base64 payload
    #[serde(default)]
    pub value: Option<String>,
}

impl AbciQueryResponse {
    /// Decoded payload, failing on a non-zero code
    pub fn into_value(self) -> Result<Vec<u8>> {
        if self.code != 0 {
            return Err(Error::Rpc(format!(
                "query failed with code {} ({}): {}",
                self.code, self.codespace, self.log
            )));
        }
        match self.value {
            Some(value) => STANDARD
                .decode(value)
                .map_err(|e| Error::Rpc(format!("invalid base64 in query response: {}", e))),
            None => Ok(Vec::new()),
        }
    }
}

#[derive(Debug, Deserialize)]
struct AbciQueryEnvelope {
    response: AbciQueryResponse,
}

/// `broadcast_tx_sync` response body (CheckTx outcome)
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastTxResponse {
    #[serde(default)]
    pub code: u32,
    #[serde(default)]
    pub log: String,
    #[serde(default)]
    pub codespace: String,
    pub hash: String,
}

/// JSON-RPC client bound to one node
#[derive(Debug, Clone)]
pub struct TendermintRpc {
    client: HttpClient,
    endpoint: String,
}

impl TendermintRpc {
    pub fn new(endpoint: impl Into<String>) -> Result<Self> {
        let endpoint = endpoint.into();
        url::Url::parse(&endpoint)
            .map_err(|e| Error::Config(format!("Invalid RPC endpoint {}: {}", endpoint, e)))?;
        let client = HttpClientBuilder::default()
            .build(&endpoint)
            .map_err(|e| Error::Config(format!("Invalid RPC endpoint {}: {}", endpoint, e)))?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Single request
    pub async fn call<R, P>(&self, method: &str, params: P) -> Result<R>
    where
        R: DeserializeOwned,
        P: ToRpcParams + Send,
    {
        self.client
            .request(method, params)
            .await
            .map_err(client_error)
    }

    /// Batched requests; results come back in the order of `calls`
    pub async fn call_batch(&self, calls: Vec<(&str, ObjectParams)>) -> Result<Vec<Result<Value>>> {
        if calls.is_empty() {
            return Ok(Vec::new());
        }

        tracing::debug!(
            endpoint = %self.endpoint,
            batch_size = calls.len(),
            "Sending JSON-RPC batch"
        );

        let mut batch = BatchRequestBuilder::new();
        for (method, params) in calls {
            batch.insert(method, params)?;
        }

        let responses = self
            .client
            .batch_request::<Value>(batch)
            .await
            .map_err(client_error)?;

        Ok(responses
            .into_iter()
            .map(|response| response.map_err(|e| call_error(&e)))
            .collect())
    }

    /// Parameters of an `abci_query` call
    pub fn abci_query_params(path: &str, data: &[u8]) -> Result<ObjectParams> {
        let mut params = ObjectParams::new();
        params.insert("path", path)?;
        params.insert("data", hex::encode(data))?;
        params.insert("prove", false)?;
        Ok(params)
    }

    /// Decode the result of an `abci_query` call
    pub fn parse_abci_query(result: Value) -> Result<AbciQueryResponse> {
        let envelope: AbciQueryEnvelope = serde_json::from_value(result)?;
        Ok(envelope.response)
    }

    pub async fn abci_query(&self, path: &str, data: &[u8]) -> Result<AbciQueryResponse> {
        let result: Value = self
            .call("abci_query", Self::abci_query_params(path, data)?)
            .await?;
        Self::parse_abci_query(result)
    }

    /// Submit a signed transaction and wait for CheckTx only
    pub async fn broadcast_tx_sync(&self, tx_bytes: &[u8]) -> Result<BroadcastTxResponse> {
        let mut params = ObjectParams::new();
        params.insert("tx", STANDARD.encode(tx_bytes))?;
        self.call("broadcast_tx_sync", params).await
    }
}
