//! Prediction-market contract queries

use super::BatchQueryClient;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    Status {},
    MyCurrentPosition { address: String },
    FinishedRound { round_id: String },
}

/// Contract configuration; amounts are decimal strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    pub burn_addr: String,
    pub burn_fee: String,
    pub cw20_stake_external_rewards_addr: String,
    pub fast_oracle_addr: String,
    pub minimum_bet: String,
    pub next_round_seconds: String,
    pub staker_fee: String,
}

/// A settled round; times are nanoseconds since the epoch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedRound {
    pub id: String,
    pub bid_time: String,
    pub open_time: String,
    pub close_time: String,
    pub open_price: String,
    pub close_price: String,
    pub bull_amount: String,
    pub bear_amount: String,
    /// `bull`, `bear`, or absent when undecided
    #[serde(default)]
    pub winner: Option<String>,
}

/// An account's stake in the live and next rounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub live_bear_amount: String,
    pub live_bull_amount: String,
    pub next_bear_amount: String,
    pub next_bull_amount: String,
}

/// Typed queries against one market contract
#[derive(Debug, Clone)]
pub struct MarketQuerier {
    client: BatchQueryClient,
    contract: String,
}

impl MarketQuerier {
    pub fn new(client: BatchQueryClient, contract: impl Into<String>) -> Self {
        Self {
            client,
            contract: contract.into(),
        }
    }

    pub fn contract(&self) -> &str {
        &self.contract
    }

    pub async fn config(&self) -> Result<ContractConfig> {
        self.client
            .query_contract_smart(&self.contract, &QueryMsg::Config {})
            .await
    }

    /// Shape varies between contract versions, so it stays untyped
    pub async fn status(&self) -> Result<Value> {
        self.client
            .query_contract_smart(&self.contract, &QueryMsg::Status {})
            .await
    }

    pub async fn finished_round(&self, round_id: u64) -> Result<FinishedRound> {
        self.client
            .query_contract_smart(
                &self.contract,
                &QueryMsg::FinishedRound {
                    round_id: round_id.to_string(),
                },
            )
            .await
    }

    pub async fn my_current_position(&self, address: &str) -> Result<Position> {
        self.client
            .query_contract_smart(
                &self.contract,
                &QueryMsg::MyCurrentPosition {
                    address: address.to_string(),
                },
            )
            .await
    }

    /// Several finished rounds in one round trip, in request order
    pub async fn finished_rounds(&self, round_ids: &[u64]) -> Result<Vec<Result<FinishedRound>>> {
        let queries: Vec<(&str, QueryMsg)> = round_ids
            .iter()
            .map(|id| {
                (
                    self.contract.as_str(),
                    QueryMsg::FinishedRound {
                        round_id: id.to_string(),
                    },
                )
            })
            .collect();

        let results = self.client.query_contract_smart_many(&queries).await?;
        Ok(results
            .into_iter()
            .map(|result| {
                result.and_then(|value| serde_json::from_value(value).map_err(Error::from))
            })
            .collect())
    }
}
