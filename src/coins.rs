//! Coin amounts, denominations and gas prices

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Micro-denominations carry six decimals
const MICRO_FACTOR: f64 = 1_000_000.0;

/// A single coin amount in its minimal denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    /// Integer amount as a decimal string
    pub amount: String,
}

impl Coin {
    pub fn new(amount: impl Into<String>, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Zero amount of the given denomination
    pub fn zero(denom: impl Into<String>) -> Self {
        Self::new("0", denom)
    }
}

/// Gas price expressed as `<price><denom>`, e.g. `0.025ujuno`
#[derive(Debug, Clone, PartialEq)]
pub struct GasPrice {
    pub amount: f64,
    pub denom: String,
}

impl GasPrice {
    /// Fee for the given gas limit, rounded up to a whole minimal unit
    pub fn fee_for(&self, gas_limit: u64) -> Coin {
        let amount = (self.amount * gas_limit as f64).ceil() as u128;
        Coin::new(amount.to_string(), self.denom.clone())
    }
}

impl FromStr for GasPrice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let split = s
            .find(|c: char| c.is_ascii_alphabetic())
            .ok_or_else(|| Error::InvalidArgument(format!("Invalid gas price string: {}", s)))?;
        let (amount, denom) = s.split_at(split);

        if amount.is_empty() || !amount.chars().all(|c| c.is_ascii_digit() || c == '.') {
            return Err(Error::InvalidArgument(format!(
                "Invalid gas price amount: {}",
                s
            )));
        }
        let valid_denom = denom.starts_with(|c: char| c.is_ascii_lowercase())
            && denom
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '/');
        if !valid_denom {
            return Err(Error::InvalidArgument(format!(
                "Invalid gas price denom: {}",
                s
            )));
        }

        let amount: f64 = amount
            .parse()
            .map_err(|e| Error::InvalidArgument(format!("Invalid gas price amount: {}", e)))?;

        Ok(Self {
            amount,
            denom: denom.to_string(),
        })
    }
}

impl fmt::Display for GasPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Convert a micro-denominated amount (e.g. `ujuno`) to whole units.
/// Unparseable input yields zero.
pub fn micro_to_denom(amount: &str) -> f64 {
    amount
        .trim()
        .parse::<f64>()
        .map(|v| v / MICRO_FACTOR)
        .unwrap_or(0.0)
}

/// Convert whole units to a micro-denominated amount string.
/// Unparseable input yields `"0"`.
pub fn denom_to_micro(amount: &str) -> String {
    match amount.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => format!("{}", (v * MICRO_FACTOR).round() as u128),
        _ => "0".to_string(),
    }
}

/// Display symbol for a minimal denomination: `ujuno` -> `JUNO`
pub fn display_denom(minimal_denom: &str) -> String {
    minimal_denom.chars().skip(1).collect::<String>().to_uppercase()
}

/// Two decimals above 0.01, full precision below
pub fn to_fixed_decimals(amount: f64) -> String {
    if amount > 0.01 {
        format!("{:.2}", amount)
    } else {
        amount.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_gas_price() {
        let price: GasPrice = "0.025ujuno".parse().unwrap();
        assert_eq!(price.amount, 0.025);
        assert_eq!(price.denom, "ujuno");
        assert_eq!(price.to_string(), "0.025ujuno");
    }

    #[test]
    fn parses_ibc_denom() {
        assert!("0.1ibc/ABC123".parse::<GasPrice>().is_err());

        let price: GasPrice = "0.1ibc/abc123".parse().unwrap();
        assert_eq!(price.denom, "ibc/abc123");
    }

    #[test]
    fn rejects_malformed_gas_price() {
        assert!("ujuno".parse::<GasPrice>().is_err());
        assert!("0.025".parse::<GasPrice>().is_err());
        assert!("0.025 ujuno".parse::<GasPrice>().is_err());
        assert!("0.025uJUNO".parse::<GasPrice>().is_err());
    }

    #[test]
    fn fee_rounds_up() {
        let price: GasPrice = "0.025ujuno".parse().unwrap();
        assert_eq!(price.fee_for(200_000), Coin::new("5000", "ujuno"));
        assert_eq!(price.fee_for(1), Coin::new("1", "ujuno"));
    }

    #[test]
    fn micro_conversions() {
        assert_eq!(micro_to_denom("2500000"), 2.5);
        assert_eq!(micro_to_denom("garbage"), 0.0);
        assert_eq!(denom_to_micro("1.5"), "1500000");
        assert_eq!(denom_to_micro("nope"), "0");
    }

    #[test]
    fn display_denom_strips_micro_prefix() {
        assert_eq!(display_denom("ujuno"), "JUNO");
        assert_eq!(display_denom("ustars"), "STARS");
    }

    #[test]
    fn fixed_decimals() {
        assert_eq!(to_fixed_decimals(1.23456), "1.23");
        assert_eq!(to_fixed_decimals(0.005), "0.005");
    }
}
