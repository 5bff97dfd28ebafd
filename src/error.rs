//! Error types for the round claimer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Wallet provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Wallet not connected")]
    NotConnected,

    #[error("Need to input a valid round, last valid round was {last_valid} (got {input:?})")]
    InvalidRound { input: String, last_valid: u64 },

    /// Carries the collaborator's message verbatim
    #[error("{0}")]
    SubmissionFailed(String),

    #[error("Wallet error: {0}")]
    Wallet(String),

    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Network error: {0}")]
    Network(#[from] jsonrpsee::core::ClientError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Protobuf decode error: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl Error {
    /// The underlying message, without the variant's prefix
    ///
    /// Shown next to a failed submission exactly as the wallet, node or
    /// transport reported it.
    pub fn into_submission_message(self) -> String {
        match self {
            Error::SubmissionFailed(message)
            | Error::ProviderUnavailable(message)
            | Error::Wallet(message)
            | Error::Rpc(message)
            | Error::Config(message)
            | Error::InvalidArgument(message) => message,
            Error::Network(e) => e.to_string(),
            Error::Json(e) => e.to_string(),
            Error::Decode(e) => e.to_string(),
            other @ (Error::NotConnected | Error::InvalidRound { .. }) => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
