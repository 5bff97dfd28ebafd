//! Wallet session management
//!
//! A session ties one wallet account to one open signing client. Session
//! fields are committed together only after every connect step succeeded,
//! so observers never see an address paired with a dead client.

use crate::client::{SigningClient, SigningClientConnector, SigningClientOptions};
use crate::config::{ChainConfig, ChainDescriptor};
use crate::wallet::{OfflineSigner, ProviderSlot, WalletEvent, WalletProvider};
use crate::{Error, Result};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Connection state shown to the user
#[derive(Clone, Default)]
pub struct Session {
    /// Empty when disconnected
    pub wallet_address: String,
    pub signing_client: Option<Arc<dyn SigningClient>>,
    pub display_name: String,
    pub connecting: bool,
    pub last_error: Option<String>,
}

impl Session {
    pub fn is_connected(&self) -> bool {
        !self.wallet_address.is_empty() && self.signing_client.is_some()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("wallet_address", &self.wallet_address)
            .field("signing_client", &self.signing_client.as_ref().map(|_| "open"))
            .field("display_name", &self.display_name)
            .field("connecting", &self.connecting)
            .field("last_error", &self.last_error)
            .finish()
    }
}

/// Result of a fully successful connect, not yet committed
struct Established {
    client: Arc<dyn SigningClient>,
    address: String,
    display_name: String,
}

/// Holds `connecting` up for the lifetime of a connect attempt, including a
/// cancelled one
struct ConnectingGuard<'a>(&'a mut bool);

impl<'a> ConnectingGuard<'a> {
    fn raise(flag: &'a mut bool) -> Self {
        *flag = true;
        Self(flag)
    }
}

impl Drop for ConnectingGuard<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}

/// Owns the session lifecycle for one configured chain
///
/// Every operation takes `&mut self`: a second connect or claim cannot start
/// while one is in flight on the same manager.
pub struct SessionManager {
    config: ChainConfig,
    slot: ProviderSlot,
    connector: Arc<dyn SigningClientConnector>,
    session: Session,
    chain_suggested: bool,
}

impl SessionManager {
    pub fn new(
        config: ChainConfig,
        slot: ProviderSlot,
        connector: Arc<dyn SigningClientConnector>,
    ) -> Self {
        Self {
            config,
            slot,
            connector,
            session: Session::default(),
            chain_suggested: false,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &ChainConfig {
        &self.config
    }

    /// Connect to the wallet and open a signing client
    ///
    /// On failure the address, client and display name are left untouched
    /// and the error is also recorded in `last_error`.
    pub async fn connect(&mut self) -> Result<()> {
        let outcome = {
            let _connecting = ConnectingGuard::raise(&mut self.session.connecting);
            establish(
                &mut self.slot,
                &self.config,
                self.connector.as_ref(),
                &mut self.chain_suggested,
            )
            .await
        };

        match outcome {
            Ok(established) => {
                let previous = self.session.signing_client.replace(established.client);
                self.session.wallet_address = established.address;
                self.session.display_name = established.display_name;
                self.session.last_error = None;

                if let Some(previous) = previous {
                    previous.disconnect().await;
                }

                info!(
                    address = %self.session.wallet_address,
                    name = %self.session.display_name,
                    chain_id = %self.config.chain_id,
                    "Wallet connected"
                );
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Wallet connection failed");
                self.session.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Close the signing client and reset to the empty session. Idempotent.
    pub async fn disconnect(&mut self) {
        if let Some(client) = self.session.signing_client.take() {
            client.disconnect().await;
            info!(address = %self.session.wallet_address, "Wallet disconnected");
        }
        self.session = Session::default();
    }

    /// React to a wallet notification
    pub async fn handle_event(&mut self, event: WalletEvent) -> Result<()> {
        match event {
            WalletEvent::KeystoreChanged => {
                debug!("Wallet keystore changed, reconnecting");
                self.disconnect().await;
                self.connect().await
            }
        }
    }
}

async fn establish(
    slot: &mut ProviderSlot,
    config: &ChainConfig,
    connector: &dyn SigningClientConnector,
    chain_suggested: &mut bool,
) -> Result<Established> {
    let provider = slot.acquire(config.provider_wait()).await?;
    let chain_id = config.chain_id.clone();

    if !*chain_suggested {
        let descriptor = ChainDescriptor::from_config(config);
        match provider.experimental_suggest_chain(&descriptor).await {
            Ok(()) => *chain_suggested = true,
            // enable() below reports the decisive failure
            Err(e) => warn!(error = %e, chain_id = %chain_id, "Chain suggestion failed"),
        }
    }

    provider.enable(&chain_id).await?;
    let signer = provider.get_offline_signer(&chain_id).await?;

    let options = SigningClientOptions {
        gas_price: config.gas_price()?,
    };
    let client = connector
        .connect_with_signer(&config.rpc_endpoint, Arc::clone(&signer), options)
        .await?;

    match read_identity(provider.as_ref(), signer.as_ref(), &chain_id).await {
        Ok((address, display_name)) => Ok(Established {
            client,
            address,
            display_name,
        }),
        Err(e) => {
            client.disconnect().await;
            Err(e)
        }
    }
}

/// Primary account address and key name
async fn read_identity(
    provider: &dyn WalletProvider,
    signer: &dyn OfflineSigner,
    chain_id: &str,
) -> Result<(String, String)> {
    let address = signer
        .get_accounts()
        .await?
        .into_iter()
        .map(|account| account.address)
        .find(|address| !address.is_empty())
        .ok_or_else(|| Error::Wallet(format!("No accounts available for {}", chain_id)))?;

    let key = provider.get_key(chain_id).await?;
    let display_name = if key.name.is_empty() {
        address.clone()
    } else {
        key.name
    };

    Ok((address, display_name))
}
