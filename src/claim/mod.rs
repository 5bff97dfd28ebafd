//! Winnings claims against the prediction-market contract
//!
//! `build_claim_message` is pure; `ClaimSubmitter` validates input against
//! the session and configuration, then broadcasts one message.

mod submitter;

pub use submitter::{parse_round_id, ClaimSubmitter, SubmissionResult};

use crate::client::{EncodeObject, MsgExecuteContract, MSG_EXECUTE_CONTRACT_TYPE_URL};
use crate::coins::Coin;
use crate::Result;
use serde::{Deserialize, Serialize};

/// Execute entry points of the prediction-market contract used here
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    CollectWinnings { rounds: Vec<String> },
}

/// One claim action, built per request and never stored
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimRequest {
    pub sender: String,
    pub round_ids: Vec<String>,
    pub funds: Vec<Coin>,
}

impl ClaimRequest {
    pub fn new(sender: impl Into<String>, round_ids: Vec<String>) -> Self {
        Self {
            sender: sender.into(),
            round_ids,
            funds: Vec::new(),
        }
    }

    pub fn with_funds(mut self, funds: Vec<Coin>) -> Self {
        self.funds = funds;
        self
    }

    pub fn to_message(&self, contract: &str) -> Result<EncodeObject> {
        build_claim_message(contract, &self.sender, &self.round_ids, &self.funds)
    }
}

/// Build a `collect_winnings` execution addressed to `contract`
pub fn build_claim_message(
    contract: &str,
    sender: &str,
    round_ids: &[String],
    funds: &[Coin],
) -> Result<EncodeObject> {
    let body = ExecuteMsg::CollectWinnings {
        rounds: round_ids.to_vec(),
    };

    Ok(EncodeObject {
        type_url: MSG_EXECUTE_CONTRACT_TYPE_URL.to_string(),
        value: MsgExecuteContract {
            sender: sender.to_string(),
            contract: contract.to_string(),
            msg: serde_json::to_vec(&body)?,
            funds: funds.to_vec(),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTRACT: &str = "juno1uugwj8uneuvllu2e2znn2nfha0sq6n45stv6g3vg4w3v07uy2quqzxueun";

    #[test]
    fn claim_body_matches_contract_schema() {
        let message =
            build_claim_message(CONTRACT, "juno1sender", &["10765".to_string()], &[]).unwrap();

        assert_eq!(message.type_url, "/cosmwasm.wasm.v1.MsgExecuteContract");
        assert_eq!(message.value.contract, CONTRACT);
        assert_eq!(message.value.sender, "juno1sender");
        assert_eq!(
            std::str::from_utf8(&message.value.msg).unwrap(),
            r#"{"collect_winnings":{"rounds":["10765"]}}"#
        );
        assert!(message.value.funds.is_empty());
    }

    #[test]
    fn rounds_keep_their_order() {
        let rounds = vec!["3".to_string(), "1".to_string(), "2".to_string()];
        let message = build_claim_message(CONTRACT, "juno1sender", &rounds, &[]).unwrap();

        let decoded: ExecuteMsg = serde_json::from_slice(&message.value.msg).unwrap();
        assert_eq!(decoded, ExecuteMsg::CollectWinnings { rounds });
    }

    #[test]
    fn request_carries_funds() {
        let request = ClaimRequest::new("juno1sender", vec!["7".to_string()])
            .with_funds(vec![Coin::new("1", "ujuno")]);
        let message = request.to_message(CONTRACT).unwrap();
        assert_eq!(message.value.funds, vec![Coin::new("1", "ujuno")]);
    }
}
