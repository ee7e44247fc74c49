use crate::error::VizError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One option contract row as reported by the data provider.
///
/// Field names serialize in camelCase so provider-shaped JSON/CSV rows map
/// directly onto this struct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    #[serde(default)]
    pub contract_symbol: Option<String>,
    pub strike: f64,
    pub last_price: f64,
    pub bid: f64,
    pub ask: f64,
    pub change: f64,
    pub percent_change: f64,
    pub volume: u64,
    pub open_interest: u64,
    pub implied_volatility: f64,
    pub in_the_money: bool,
}

/// Call and put contracts available for one underlying and expiry date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OptionChain {
    pub calls: Vec<OptionContract>,
    pub puts: Vec<OptionContract>,
}

impl OptionChain {
    pub fn side(&self, kind: OptionKind) -> &[OptionContract] {
        match kind {
            OptionKind::Calls => &self.calls,
            OptionKind::Puts => &self.puts,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty() && self.puts.is_empty()
    }
}

/// Which side of the chain to display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OptionKind {
    #[serde(rename = "calls")]
    Calls,
    #[serde(rename = "puts")]
    Puts,
}

impl OptionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionKind::Calls => "calls",
            OptionKind::Puts => "puts",
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKind {
    type Err = VizError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "calls" => Ok(OptionKind::Calls),
            "puts" => Ok(OptionKind::Puts),
            other => Err(VizError::InvalidKind(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contract(strike: f64) -> OptionContract {
        OptionContract {
            contract_symbol: None,
            strike,
            last_price: 1.0,
            bid: 0.9,
            ask: 1.1,
            change: 0.05,
            percent_change: 5.0,
            volume: 10,
            open_interest: 100,
            implied_volatility: 0.25,
            in_the_money: false,
        }
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("calls".parse::<OptionKind>().unwrap(), OptionKind::Calls);
        assert_eq!("puts".parse::<OptionKind>().unwrap(), OptionKind::Puts);
        for bad in ["call", "PUTS", "straddles", ""] {
            assert!(matches!(
                bad.parse::<OptionKind>(),
                Err(VizError::InvalidKind(_))
            ));
        }
    }

    #[test]
    fn test_chain_side_selection() {
        let chain = OptionChain {
            calls: vec![contract(100.0)],
            puts: vec![contract(95.0), contract(90.0)],
        };
        assert_eq!(chain.side(OptionKind::Calls).len(), 1);
        assert_eq!(chain.side(OptionKind::Puts).len(), 2);
        assert!(!chain.is_empty());
    }

    #[test]
    fn test_contract_deserializes_from_camel_case() {
        let raw = r#"{
            "contractSymbol": "AAPL260918C00200000",
            "strike": 200.0,
            "lastPrice": 12.35,
            "bid": 12.1,
            "ask": 12.6,
            "change": -0.42,
            "percentChange": -3.29,
            "volume": 523,
            "openInterest": 10412,
            "impliedVolatility": 0.3114,
            "inTheMoney": true
        }"#;
        let parsed: OptionContract = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.contract_symbol.as_deref(), Some("AAPL260918C00200000"));
        assert_eq!(parsed.strike, 200.0);
        assert!(parsed.in_the_money);
    }
}
