//! Wallet bridge
//!
//! Production collaborators for the session manager:
//! - [`BridgeWallet`]: a wallet daemon reached over JSON-RPC/HTTP that holds
//!   the keys, prompts the user and signs
//! - [`RpcSigningConnector`]: opens signing clients that simulate, have the
//!   wallet sign, and broadcast through a Tendermint RPC node
//!
//! SECURITY NOTE:
//! - Keys stay in the daemon; only signed bytes cross the bridge
//! - The bridge token is held as a secret and never logged

mod signing;
mod transport;
mod wallet;

pub use signing::{RpcSigningClient, RpcSigningConnector, GAS_MULTIPLIER};
pub use transport::BridgeTransport;
pub use wallet::{BridgeSigner, BridgeWallet};
