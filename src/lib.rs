//! Round Claimer
//!
//! Wallet session lifecycle and winnings claims for a CosmWasm prediction
//! market:
//! - Connect a wallet account and open a signing client for it
//! - Submit `collect_winnings` claims for finished rounds
//! - Read contract state (config, status, rounds, positions) over Tendermint RPC
//!
//! # Security Model
//!
//! - Private keys never enter this crate; signing is delegated to the wallet
//! - Session fields change all at once, or not at all
//! - Every claim attempt can be journaled to a JSONL audit file

pub mod audit;
pub mod bridge;
pub mod claim;
pub mod client;
pub mod coins;
pub mod config;
pub mod query;
pub mod rpc;
pub mod session;
pub mod wallet;

mod error;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use claim::{ClaimSubmitter, SubmissionResult};
pub use config::{ChainConfig, Config};
pub use error::{Error, Result};
pub use session::{Session, SessionManager};
