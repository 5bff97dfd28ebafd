//! Wallet provider backed by the bridge daemon

use super::BridgeTransport;
use crate::config::ChainDescriptor;
use crate::wallet::{AccountData, KeyInfo, OfflineSigner, SignRequest, SignedTx, WalletProvider};
use crate::Result;
use async_trait::async_trait;
use jsonrpsee::rpc_params;
use serde_json::Value;
use std::sync::Arc;

pub struct BridgeWallet {
    transport: Arc<BridgeTransport>,
}

impl BridgeWallet {
    pub fn new(transport: Arc<BridgeTransport>) -> Self {
        Self { transport }
    }

    /// The wallet if the daemon answers, `None` otherwise
    pub async fn detect(transport: Arc<BridgeTransport>) -> Option<Self> {
        match transport.call::<Value>("wallet_ping", rpc_params![]).await {
            Ok(_) => {
                tracing::debug!(url = %transport.url(), "Wallet bridge reachable");
                Some(Self::new(transport))
            }
            Err(e) => {
                tracing::warn!(url = %transport.url(), error = %e, "Wallet bridge not reachable");
                None
            }
        }
    }
}

#[async_trait]
impl WalletProvider for BridgeWallet {
    async fn enable(&self, chain_id: &str) -> Result<()> {
        self.transport
            .call::<Value>("wallet_enable", rpc_params![chain_id])
            .await?;
        Ok(())
    }

    async fn get_offline_signer(&self, chain_id: &str) -> Result<Arc<dyn OfflineSigner>> {
        Ok(Arc::new(BridgeSigner {
            transport: Arc::clone(&self.transport),
            chain_id: chain_id.to_string(),
        }))
    }

    async fn get_key(&self, chain_id: &str) -> Result<KeyInfo> {
        self.transport
            .call("wallet_getKey", rpc_params![chain_id])
            .await
    }

    async fn experimental_suggest_chain(&self, descriptor: &ChainDescriptor) -> Result<()> {
        self.transport
            .call::<Value>("wallet_suggestChain", rpc_params![descriptor])
            .await?;
        Ok(())
    }
}

/// Offline signer for one chain on the bridge
pub struct BridgeSigner {
    transport: Arc<BridgeTransport>,
    chain_id: String,
}

#[async_trait]
impl OfflineSigner for BridgeSigner {
    async fn get_accounts(&self) -> Result<Vec<AccountData>> {
        self.transport
            .call("wallet_getAccounts", rpc_params![&self.chain_id])
            .await
    }

    async fn sign(&self, signer_address: &str, request: &SignRequest) -> Result<SignedTx> {
        self.transport
            .call("wallet_signTx", rpc_params![signer_address, request])
            .await
    }

    async fn encode_for_simulation(
        &self,
        signer_address: &str,
        request: &SignRequest,
    ) -> Result<SignedTx> {
        self.transport
            .call("wallet_encodeSimulation", rpc_params![signer_address, request])
            .await
    }
}
