//! Wallet provider abstraction
//!
//! The wallet is an explicit dependency of the session manager rather than
//! ambient global state. Private keys never enter this crate.

mod provider;
mod slot;

pub use provider::{
    AccountData, KeyInfo, OfflineSigner, SignRequest, SignedTx, WalletEvent, WalletProvider,
};
pub use slot::{ProviderInjector, ProviderSlot};
