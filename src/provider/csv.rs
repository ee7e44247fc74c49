//! CSV fixture loaders for feeding a [`MemoryTicker`](super::MemoryTicker).
//!
//! Price files carry `time,open,high,low,close,volume` rows; chain files
//! carry one contract per row with an `expiry` and `kind` column in front of
//! the provider-shaped contract fields.

use crate::error::VizError;
use crate::models::{OptionChain, OptionContract, OptionKind, PriceBar};
use crate::utils::date::parse_date;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

/// Raw price row as it appears in a CSV fixture.
#[derive(Debug, Deserialize)]
struct RawPriceRow {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl RawPriceRow {
    /// Convert to a [`PriceBar`], accepting daily (`YYYY-MM-DD`) or intraday
    /// (`YYYY-MM-DD HH:MM`) timestamps.
    fn to_price_bar(&self) -> Result<PriceBar, VizError> {
        let time = match NaiveDateTime::parse_from_str(&self.time, "%Y-%m-%d %H:%M") {
            Ok(dt) => dt,
            Err(_) => NaiveDate::parse_from_str(&self.time, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .ok_or_else(|| VizError::BadDate {
                    value: self.time.clone(),
                    context: "price csv",
                })?,
        };

        Ok(PriceBar::new(
            time.and_utc(),
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ))
    }
}

/// Raw option chain row: expiry + side + provider-shaped contract fields.
///
/// Spelled out field by field; the csv deserializer cannot flatten a nested
/// struct with numeric fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawChainRow {
    expiry: String,
    kind: String,
    #[serde(default)]
    contract_symbol: Option<String>,
    strike: f64,
    last_price: f64,
    bid: f64,
    ask: f64,
    change: f64,
    percent_change: f64,
    volume: u64,
    open_interest: u64,
    implied_volatility: f64,
    in_the_money: bool,
}

impl RawChainRow {
    fn into_contract(self) -> OptionContract {
        OptionContract {
            contract_symbol: self.contract_symbol,
            strike: self.strike,
            last_price: self.last_price,
            bid: self.bid,
            ask: self.ask,
            change: self.change,
            percent_change: self.percent_change,
            volume: self.volume,
            open_interest: self.open_interest,
            implied_volatility: self.implied_volatility,
            in_the_money: self.in_the_money,
        }
    }
}

/// Load price bars from a CSV reader.
pub fn read_price_csv<R: Read>(reader: R) -> Result<Vec<PriceBar>, VizError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut bars = Vec::new();
    for row in csv_reader.deserialize() {
        let row: RawPriceRow = row?;
        bars.push(row.to_price_bar()?);
    }
    bars.sort_by(|a, b| a.time.cmp(&b.time));
    Ok(bars)
}

/// Load price bars from a CSV file.
pub fn load_price_csv(path: impl AsRef<Path>) -> Result<Vec<PriceBar>, VizError> {
    let file = std::fs::File::open(path)?;
    read_price_csv(file)
}

/// Load option chains from a CSV reader, grouped by expiry date.
pub fn read_chain_csv<R: Read>(reader: R) -> Result<BTreeMap<NaiveDate, OptionChain>, VizError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut chains: BTreeMap<NaiveDate, OptionChain> = BTreeMap::new();

    for row in csv_reader.deserialize() {
        let row: RawChainRow = row?;
        let expiry = parse_date(&row.expiry).ok_or_else(|| VizError::BadDate {
            value: row.expiry.clone(),
            context: "chain csv",
        })?;
        let kind: OptionKind = row.kind.parse()?;

        let chain = chains.entry(expiry).or_default();
        match kind {
            OptionKind::Calls => chain.calls.push(row.into_contract()),
            OptionKind::Puts => chain.puts.push(row.into_contract()),
        }
    }

    Ok(chains)
}

/// Load option chains from a CSV file.
pub fn load_chain_csv(path: impl AsRef<Path>) -> Result<BTreeMap<NaiveDate, OptionChain>, VizError> {
    let file = std::fs::File::open(path)?;
    read_chain_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRICES: &str = "\
time,open,high,low,close,volume
2026-07-02,102.4,104.1,102.0,103.7,980000
2026-07-01,101.2,103.0,100.8,102.4,1200000
";

    const INTRADAY: &str = "\
time,open,high,low,close,volume
2026-08-24 09:30,101.2,101.5,101.1,101.4,52000
2026-08-24 09:35,101.4,101.8,101.3,101.7,48000
";

    const CHAIN: &str = "\
expiry,kind,contractSymbol,strike,lastPrice,bid,ask,change,percentChange,volume,openInterest,impliedVolatility,inTheMoney
2026-09-18,calls,AAPL260918C00200000,200.0,12.35,12.1,12.6,-0.42,-3.29,523,10412,0.3114,true
2026-09-18,puts,AAPL260918P00200000,200.0,8.05,7.9,8.2,0.31,4.01,311,8450,0.2987,false
2026-12-18,calls,AAPL261218C00210000,210.0,14.6,14.4,14.9,0.12,0.83,120,4100,0.3322,false
";

    #[test]
    fn test_price_rows_parse_and_sort() {
        let bars = read_price_csv(PRICES.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert!(bars[0].time < bars[1].time);
        assert_eq!(bars[0].close, 102.4);
    }

    #[test]
    fn test_intraday_timestamps_parse() {
        let bars = read_price_csv(INTRADAY.as_bytes()).unwrap();
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].time.format("%H:%M").to_string(), "09:35");
    }

    #[test]
    fn test_bad_price_date_reported() {
        let csv = "time,open,high,low,close,volume\n07/01/2026,1,1,1,1,1\n";
        assert!(matches!(
            read_price_csv(csv.as_bytes()),
            Err(VizError::BadDate { .. })
        ));
    }

    #[test]
    fn test_chain_rows_group_by_expiry_and_side() {
        let chains = read_chain_csv(CHAIN.as_bytes()).unwrap();
        assert_eq!(chains.len(), 2);

        let near = chains
            .get(&NaiveDate::from_ymd_opt(2026, 9, 18).unwrap())
            .unwrap();
        assert_eq!(near.calls.len(), 1);
        assert_eq!(near.puts.len(), 1);
        assert_eq!(near.calls[0].strike, 200.0);
        assert!(near.calls[0].in_the_money);

        let far = chains
            .get(&NaiveDate::from_ymd_opt(2026, 12, 18).unwrap())
            .unwrap();
        assert_eq!(far.calls.len(), 1);
        assert!(far.puts.is_empty());
    }

    #[test]
    fn test_unknown_chain_kind_rejected() {
        let csv = "\
expiry,kind,contractSymbol,strike,lastPrice,bid,ask,change,percentChange,volume,openInterest,impliedVolatility,inTheMoney
2026-09-18,straddles,X,200.0,1,1,1,0,0,1,1,0.2,false
";
        assert!(matches!(
            read_chain_csv(csv.as_bytes()),
            Err(VizError::InvalidKind(_))
        ));
    }
}
