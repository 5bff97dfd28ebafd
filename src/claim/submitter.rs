//! Claim submission

use super::ClaimRequest;
use crate::client::Fee;
use crate::config::ChainConfig;
use crate::session::Session;
use crate::{Error, Result};
use serde::Serialize;
use tracing::{info, warn};

/// Successful claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub transaction_hash: String,
}

/// Parse a round id, accepting only integers in `[1, last_valid]`
pub fn parse_round_id(input: &str, last_valid: u64) -> Result<u64> {
    let invalid = || Error::InvalidRound {
        input: input.to_string(),
        last_valid,
    };

    let round: u64 = input.trim().parse().map_err(|_| invalid())?;
    if round == 0 || round > last_valid {
        return Err(invalid());
    }
    Ok(round)
}

/// Builds and broadcasts `collect_winnings` claims
#[derive(Debug, Clone)]
pub struct ClaimSubmitter {
    contract_address: String,
    last_valid_round: u64,
}

impl ClaimSubmitter {
    pub fn new(config: &ChainConfig) -> Self {
        Self {
            contract_address: config.contract_address.clone(),
            last_valid_round: config.last_valid_round,
        }
    }

    pub fn contract_address(&self) -> &str {
        &self.contract_address
    }

    /// Claim winnings for one round through the session's signing client
    ///
    /// Rejected input never reaches the network. A single attempt is made;
    /// calling twice submits twice.
    pub async fn submit_claim(&self, session: &Session, round_id: &str) -> Result<SubmissionResult> {
        let client = match &session.signing_client {
            Some(client) if !session.wallet_address.is_empty() => client,
            _ => return Err(Error::NotConnected),
        };

        let round = parse_round_id(round_id, self.last_valid_round)?;

        let request = ClaimRequest::new(session.wallet_address.clone(), vec![round.to_string()]);
        let message = request.to_message(&self.contract_address)?;

        info!(
            sender = %request.sender,
            round = round,
            contract = %self.contract_address,
            "Submitting claim"
        );

        let response = client
            .sign_and_broadcast(&session.wallet_address, vec![message], Fee::Auto)
            .await
            .map_err(|e| Error::SubmissionFailed(e.into_submission_message()))?;

        if !response.is_success() {
            warn!(
                code = response.code,
                tx_hash = %response.transaction_hash,
                "Claim rejected by chain"
            );
            let message = if response.raw_log.is_empty() {
                format!(
                    "Transaction {} failed with code {}",
                    response.transaction_hash, response.code
                )
            } else {
                response.raw_log
            };
            return Err(Error::SubmissionFailed(message));
        }

        info!(tx_hash = %response.transaction_hash, round = round, "Rewards claimed");
        Ok(SubmissionResult {
            transaction_hash: response.transaction_hash,
        })
    }
}
