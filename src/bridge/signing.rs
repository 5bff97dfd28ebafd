//! Signing client over Tendermint RPC
//!
//! Automatic fees follow the usual Cosmos client recipe: simulate a draft
//! transaction, scale the gas used by 1.3 (rounded to the nearest unit), and
//! pay for it at the configured gas price.

use crate::client::{
    DeliverTxResponse, EncodeObject, Fee, SigningClient, SigningClientConnector,
    SigningClientOptions, StdFee,
};
use crate::coins::GasPrice;
use crate::rpc::cosmos::{SimulateRequest, SimulateResponse};
use crate::rpc::TendermintRpc;
use crate::wallet::{OfflineSigner, SignRequest};
use crate::{Error, Result};
use async_trait::async_trait;
use jsonrpsee::rpc_params;
use prost::Message;
use serde::Deserialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, info};

/// Headroom applied to simulated gas, as numerator over [`GAS_MULTIPLIER_DENOMINATOR`]
pub const GAS_MULTIPLIER: u64 = 13;
pub const GAS_MULTIPLIER_DENOMINATOR: u64 = 10;

const SIMULATE_PATH: &str = "/cosmos.tx.v1beta1.Service/Simulate";

#[derive(Debug, Deserialize)]
struct NodeStatus {
    node_info: NodeInfo,
}

#[derive(Debug, Deserialize)]
struct NodeInfo {
    network: String,
}

/// Gas limit for a simulated usage; integer math, half rounds up
pub(crate) fn gas_limit(gas_used: u64) -> u64 {
    let scaled = u128::from(gas_used) * u128::from(GAS_MULTIPLIER);
    let denominator = u128::from(GAS_MULTIPLIER_DENOMINATOR);
    u64::try_from((scaled + denominator / 2) / denominator).unwrap_or(u64::MAX)
}

/// Fee for a simulated gas usage
pub(crate) fn auto_fee(gas_used: u64, gas_price: &GasPrice) -> StdFee {
    let gas_limit = gas_limit(gas_used);
    StdFee::new(gas_price.fee_for(gas_limit), gas_limit)
}

fn parse_gas_used(payload: &[u8]) -> Result<u64> {
    SimulateResponse::decode(payload)?
        .gas_info
        .map(|gas_info| gas_info.gas_used)
        .ok_or_else(|| Error::Rpc("simulation response without gas info".to_string()))
}

/// Opens [`RpcSigningClient`]s
#[derive(Debug, Default, Clone, Copy)]
pub struct RpcSigningConnector;

#[async_trait]
impl SigningClientConnector for RpcSigningConnector {
    async fn connect_with_signer(
        &self,
        rpc_endpoint: &str,
        signer: Arc<dyn OfflineSigner>,
        options: SigningClientOptions,
    ) -> Result<Arc<dyn SigningClient>> {
        let rpc = TendermintRpc::new(rpc_endpoint)?;
        let status: NodeStatus = rpc.call("status", rpc_params![]).await?;

        info!(
            endpoint = rpc_endpoint,
            chain_id = %status.node_info.network,
            gas_price = %options.gas_price,
            "Signing client connected"
        );

        Ok(Arc::new(RpcSigningClient::new(
            rpc,
            signer,
            options,
            status.node_info.network,
        )))
    }
}

pub struct RpcSigningClient {
    rpc: TendermintRpc,
    signer: Arc<dyn OfflineSigner>,
    gas_price: GasPrice,
    chain_id: String,
    closed: AtomicBool,
}

impl RpcSigningClient {
    pub fn new(
        rpc: TendermintRpc,
        signer: Arc<dyn OfflineSigner>,
        options: SigningClientOptions,
        chain_id: String,
    ) -> Self {
        Self {
            rpc,
            signer,
            gas_price: options.gas_price,
            chain_id,
            closed: AtomicBool::new(false),
        }
    }

    pub fn chain_id(&self) -> &str {
        &self.chain_id
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(Error::Rpc("signing client is disconnected".to_string()));
        }
        Ok(())
    }

    /// Gas used by `messages`, per a node-side simulation
    async fn simulate(&self, signer_address: &str, messages: &[EncodeObject]) -> Result<u64> {
        let draft = SignRequest {
            chain_id: self.chain_id.clone(),
            messages: messages.to_vec(),
            fee: StdFee {
                amount: vec![],
                gas: "0".to_string(),
            },
            memo: String::new(),
        };
        let encoded = self
            .signer
            .encode_for_simulation(signer_address, &draft)
            .await?;

        let request = SimulateRequest {
            tx_bytes: encoded.tx_bytes,
        };
        let response = self
            .rpc
            .abci_query(SIMULATE_PATH, &request.encode_to_vec())
            .await?;
        if response.code != 0 {
            // Contract errors surface here, before anything is signed
            return Err(Error::SubmissionFailed(response.log));
        }

        let gas_used = parse_gas_used(&response.into_value()?)?;
        debug!(gas_used = gas_used, "Simulated transaction");
        Ok(gas_used)
    }
}

#[async_trait]
impl SigningClient for RpcSigningClient {
    async fn sign_and_broadcast(
        &self,
        signer_address: &str,
        messages: Vec<EncodeObject>,
        fee: Fee,
    ) -> Result<DeliverTxResponse> {
        self.ensure_open()?;

        let fee = match fee {
            Fee::Fixed(fee) => fee,
            Fee::Auto => auto_fee(
                self.simulate(signer_address, &messages).await?,
                &self.gas_price,
            ),
        };

        let request = SignRequest {
            chain_id: self.chain_id.clone(),
            messages,
            fee,
            memo: String::new(),
        };
        let signed = self.signer.sign(signer_address, &request).await?;

        let response = self.rpc.broadcast_tx_sync(&signed.tx_bytes).await?;
        info!(
            tx_hash = %response.hash,
            code = response.code,
            codespace = %response.codespace,
            "Transaction broadcast"
        );

        Ok(DeliverTxResponse {
            transaction_hash: response.hash,
            code: response.code,
            raw_log: response.log,
        })
    }

    /// Further calls fail; the HTTP pool is released with the last reference
    async fn disconnect(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
