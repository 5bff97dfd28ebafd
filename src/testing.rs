//! In-memory wallet and signing client doubles for unit tests, plus a
//! scripted JSON-RPC node for HTTP-level tests

use crate::client::{
    DeliverTxResponse, EncodeObject, Fee, SigningClient, SigningClientConnector,
    SigningClientOptions,
};
use crate::config::ChainDescriptor;
use crate::wallet::{AccountData, KeyInfo, OfflineSigner, SignRequest, SignedTx, WalletProvider};
use crate::{Error, Result};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use wiremock::{Request, Respond, ResponseTemplate};

#[derive(Default)]
struct WalletState {
    address: String,
    name: String,
    fail_enable: bool,
    enabled: Vec<String>,
    suggested: Vec<String>,
}

/// Wallet with one switchable account
#[derive(Clone)]
pub struct MockWallet {
    state: Arc<Mutex<WalletState>>,
}

impl MockWallet {
    pub fn new(address: &str, name: &str) -> Self {
        Self {
            state: Arc::new(Mutex::new(WalletState {
                address: address.to_string(),
                name: name.to_string(),
                ..Default::default()
            })),
        }
    }

    /// Switch the active account, as a user would in the wallet UI
    pub fn set_account(&self, address: &str, name: &str) {
        let mut state = self.state.lock().unwrap();
        state.address = address.to_string();
        state.name = name.to_string();
    }

    pub fn fail_enable(&self, fail: bool) {
        self.state.lock().unwrap().fail_enable = fail;
    }

    pub fn suggest_count(&self) -> usize {
        self.state.lock().unwrap().suggested.len()
    }

    pub fn enable_count(&self) -> usize {
        self.state.lock().unwrap().enabled.len()
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn enable(&self, chain_id: &str) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_enable {
            return Err(Error::Wallet("Request rejected".to_string()));
        }
        state.enabled.push(chain_id.to_string());
        Ok(())
    }

    async fn get_offline_signer(&self, _chain_id: &str) -> Result<Arc<dyn OfflineSigner>> {
        Ok(Arc::new(MockSigner {
            state: Arc::clone(&self.state),
        }))
    }

    async fn get_key(&self, _chain_id: &str) -> Result<KeyInfo> {
        let state = self.state.lock().unwrap();
        Ok(KeyInfo {
            name: state.name.clone(),
            bech32_address: state.address.clone(),
        })
    }

    async fn experimental_suggest_chain(&self, descriptor: &ChainDescriptor) -> Result<()> {
        self.state
            .lock()
            .unwrap()
            .suggested
            .push(descriptor.chain_id.clone());
        Ok(())
    }
}

struct MockSigner {
    state: Arc<Mutex<WalletState>>,
}

#[async_trait]
impl OfflineSigner for MockSigner {
    async fn get_accounts(&self) -> Result<Vec<AccountData>> {
        let state = self.state.lock().unwrap();
        if state.address.is_empty() {
            return Ok(vec![]);
        }
        Ok(vec![AccountData {
            address: state.address.clone(),
            algo: "secp256k1".to_string(),
            pubkey: String::new(),
        }])
    }

    async fn sign(&self, _signer_address: &str, request: &SignRequest) -> Result<SignedTx> {
        Ok(SignedTx {
            tx_bytes: serde_json::to_vec(request)?,
        })
    }

    async fn encode_for_simulation(
        &self,
        signer_address: &str,
        request: &SignRequest,
    ) -> Result<SignedTx> {
        self.sign(signer_address, request).await
    }
}

/// How a mock client answers broadcasts
#[derive(Clone)]
pub enum Outcome {
    Success(String),
    ChainError(u32, String),
    Fail(String),
    /// The wallet refused to sign
    WalletRejection(String),
}

pub struct MockClient {
    outcome: Outcome,
    broadcasts: Mutex<Vec<(String, Vec<EncodeObject>, Fee)>>,
    disconnected: AtomicBool,
}

impl MockClient {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            broadcasts: Mutex::new(vec![]),
            disconnected: AtomicBool::new(false),
        }
    }

    pub fn broadcast_count(&self) -> usize {
        self.broadcasts.lock().unwrap().len()
    }

    pub fn last_broadcast(&self) -> Option<(String, Vec<EncodeObject>, Fee)> {
        self.broadcasts.lock().unwrap().last().cloned()
    }

    pub fn is_disconnected(&self) -> bool {
        self.disconnected.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SigningClient for MockClient {
    async fn sign_and_broadcast(
        &self,
        signer_address: &str,
        messages: Vec<EncodeObject>,
        fee: Fee,
    ) -> Result<DeliverTxResponse> {
        self.broadcasts
            .lock()
            .unwrap()
            .push((signer_address.to_string(), messages, fee));

        match &self.outcome {
            Outcome::Success(hash) => Ok(DeliverTxResponse {
                transaction_hash: hash.clone(),
                code: 0,
                raw_log: String::new(),
            }),
            Outcome::ChainError(code, log) => Ok(DeliverTxResponse {
                transaction_hash: "FAILEDHASH".to_string(),
                code: *code,
                raw_log: log.clone(),
            }),
            Outcome::Fail(message) => Err(Error::SubmissionFailed(message.clone())),
            Outcome::WalletRejection(message) => Err(Error::Wallet(message.clone())),
        }
    }

    async fn disconnect(&self) {
        self.disconnected.store(true, Ordering::SeqCst);
    }
}

/// Connector that records every client it opens
pub struct MockConnector {
    outcome: Outcome,
    fail: AtomicBool,
    connects: AtomicUsize,
    clients: Mutex<Vec<Arc<MockClient>>>,
}

impl MockConnector {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            fail: AtomicBool::new(false),
            connects: AtomicUsize::new(0),
            clients: Mutex::new(vec![]),
        }
    }

    pub fn fail_connect(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn clients(&self) -> Vec<Arc<MockClient>> {
        self.clients.lock().unwrap().clone()
    }
}

#[async_trait]
impl SigningClientConnector for MockConnector {
    async fn connect_with_signer(
        &self,
        _rpc_endpoint: &str,
        _signer: Arc<dyn OfflineSigner>,
        _options: SigningClientOptions,
    ) -> Result<Arc<dyn SigningClient>> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(Error::Rpc("connection refused".to_string()));
        }
        let client = Arc::new(MockClient::new(self.outcome.clone()));
        self.clients.lock().unwrap().push(Arc::clone(&client));
        Ok(client)
    }
}

#[derive(Clone)]
enum Answer {
    Result(Value),
    Error(Value),
    EchoParams,
}

/// JSON-RPC node answering by method name
///
/// Replies echo the request id. Batches are answered in reverse order.
#[derive(Clone, Default)]
pub struct RpcNode {
    answers: HashMap<String, Answer>,
}

impl RpcNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn result(mut self, method: &str, result: Value) -> Self {
        self.answers
            .insert(method.to_string(), Answer::Result(result));
        self
    }

    pub fn error(mut self, method: &str, code: i64, message: &str, data: Option<&str>) -> Self {
        let mut error = json!({ "code": code, "message": message });
        if let Some(data) = data {
            error["data"] = json!(data);
        }
        self.answers.insert(method.to_string(), Answer::Error(error));
        self
    }

    /// Answer `method` with its own params
    pub fn echo_params(mut self, method: &str) -> Self {
        self.answers.insert(method.to_string(), Answer::EchoParams);
        self
    }

    fn answer(&self, call: &Value) -> Value {
        let method = call["method"].as_str().unwrap_or_default();
        let mut reply = match self.answers.get(method) {
            Some(Answer::Result(result)) => json!({ "result": result }),
            Some(Answer::Error(error)) => json!({ "error": error }),
            Some(Answer::EchoParams) => json!({ "result": call["params"] }),
            None => json!({ "error": { "code": -32601, "message": "Method not found" } }),
        };
        reply["jsonrpc"] = json!("2.0");
        reply["id"] = call["id"].clone();
        reply
    }
}

impl Respond for RpcNode {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let reply = match body {
            Value::Array(calls) => Value::Array(calls.iter().rev().map(|c| self.answer(c)).collect()),
            call => self.answer(&call),
        };
        ResponseTemplate::new(200).set_body_json(reply)
    }
}

/// Methods of the requests a mock server received, in order
pub async fn received_methods(server: &wiremock::MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter_map(|request| serde_json::from_slice::<Value>(&request.body).ok())
        .filter_map(|call| call["method"].as_str().map(str::to_string))
        .collect()
}
