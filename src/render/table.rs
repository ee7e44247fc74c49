//! Styled options chain table for one expiry and side.

use crate::error::VizError;
use crate::models::{OptionContract, OptionKind};
use crate::provider::StockData;
use crate::utils::date::parse_date;
use chrono::NaiveDate;
use std::fmt;
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};
use tracing::debug;

/// One displayed table row. The ten columns and their labels are fixed.
#[derive(Tabled)]
struct OptionRow {
    #[tabled(rename = "Strike")]
    strike: String,
    #[tabled(rename = "Last Price")]
    last_price: String,
    #[tabled(rename = "Bid")]
    bid: String,
    #[tabled(rename = "Ask")]
    ask: String,
    #[tabled(rename = "Change")]
    change: String,
    #[tabled(rename = "Percent Change")]
    percent_change: String,
    #[tabled(rename = "Volume")]
    volume: String,
    #[tabled(rename = "Open Interest")]
    open_interest: String,
    #[tabled(rename = "Implied Volatility")]
    implied_volatility: String,
    #[tabled(rename = "In The Money")]
    in_the_money: String,
}

impl OptionRow {
    fn from_contract(contract: &OptionContract) -> Self {
        Self {
            strike: fmt3(contract.strike),
            last_price: fmt3(contract.last_price),
            bid: fmt3(contract.bid),
            ask: fmt3(contract.ask),
            change: fmt3(contract.change),
            percent_change: fmt3(contract.percent_change),
            volume: contract.volume.to_string(),
            open_interest: contract.open_interest.to_string(),
            implied_volatility: fmt3(contract.implied_volatility),
            in_the_money: contract.in_the_money.to_string(),
        }
    }
}

/// Round to three decimals and render without trailing zeros.
fn fmt3(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    format!("{}", rounded)
}

/// A rendered options chain table.
///
/// Produced by [`options_table`]; renders through `Display`.
#[derive(Debug, Clone)]
pub struct OptionsTable {
    symbol: String,
    expiry: NaiveDate,
    kind: OptionKind,
    rows: usize,
    rendered: String,
}

impl OptionsTable {
    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn expiry(&self) -> NaiveDate {
        self.expiry
    }

    pub fn kind(&self) -> OptionKind {
        self.kind
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Display labels of the ten columns, in rendered order.
    pub fn column_labels() -> Vec<String> {
        <OptionRow as Tabled>::headers()
            .into_iter()
            .map(|label| label.into_owned())
            .collect()
    }
}

impl fmt::Display for OptionsTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rendered)
    }
}

/// Render the option chain of `stock` for one expiry and side.
///
/// `date` (`YYYY-MM-DD`) must be one of the provider's listed expiries and
/// defaults to the nearest one; `kind` must be `calls` or `puts` and
/// defaults to `calls`. Numeric cells are rounded to three decimals.
pub fn options_table<P: StockData>(
    stock: &P,
    date: Option<&str>,
    kind: Option<&str>,
) -> Result<OptionsTable, VizError> {
    let kind: OptionKind = kind.unwrap_or("calls").parse()?;

    let expiries = stock.option_expiries();
    let expiry = match date {
        Some(raw) => {
            let parsed =
                parse_date(raw).ok_or_else(|| VizError::InvalidExpiry(raw.to_string()))?;
            if !expiries.contains(&parsed) {
                return Err(VizError::InvalidExpiry(raw.to_string()));
            }
            parsed
        }
        None => *expiries
            .first()
            .ok_or_else(|| VizError::NoExpiries(stock.symbol().to_string()))?,
    };

    let chain = stock.option_chain(expiry)?;
    let contracts = chain.side(kind);
    debug!(
        symbol = stock.symbol(),
        expiry = %expiry,
        kind = kind.as_str(),
        rows = contracts.len(),
        "rendering options table"
    );

    let rows: Vec<OptionRow> = contracts.iter().map(OptionRow::from_contract).collect();
    let mut table = Table::new(rows);
    table.with(Style::modern()).with(Alignment::center());

    Ok(OptionsTable {
        symbol: stock.symbol().to_string(),
        expiry,
        kind,
        rows: contracts.len(),
        rendered: table.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OptionChain;
    use crate::provider::MemoryTicker;

    fn contract(strike: f64, iv: f64) -> OptionContract {
        OptionContract {
            contract_symbol: None,
            strike,
            last_price: 12.3456,
            bid: 12.1,
            ask: 12.6,
            change: -0.4249,
            percent_change: -3.2951,
            volume: 523,
            open_interest: 10_412,
            implied_volatility: iv,
            in_the_money: true,
        }
    }

    fn ticker() -> MemoryTicker {
        let near = NaiveDate::from_ymd_opt(2026, 9, 18).unwrap();
        let far = NaiveDate::from_ymd_opt(2026, 12, 18).unwrap();
        MemoryTicker::new("AAPL")
            .with_chain(
                near,
                OptionChain {
                    calls: vec![contract(200.0, 0.31141)],
                    puts: vec![contract(195.0, 0.29873), contract(190.0, 0.3)],
                },
            )
            .with_chain(
                far,
                OptionChain {
                    calls: vec![contract(210.0, 0.3322)],
                    puts: vec![],
                },
            )
    }

    #[test]
    fn test_ten_columns_in_documented_order() {
        let labels = OptionsTable::column_labels();
        assert_eq!(
            labels,
            vec![
                "Strike",
                "Last Price",
                "Bid",
                "Ask",
                "Change",
                "Percent Change",
                "Volume",
                "Open Interest",
                "Implied Volatility",
                "In The Money",
            ]
        );
        assert_eq!(<OptionRow as Tabled>::LENGTH, 10);
    }

    #[test]
    fn test_defaults_to_nearest_expiry_and_calls() {
        let table = options_table(&ticker(), None, None).unwrap();
        assert_eq!(table.expiry(), NaiveDate::from_ymd_opt(2026, 9, 18).unwrap());
        assert_eq!(table.kind(), OptionKind::Calls);
        assert_eq!(table.rows(), 1);
    }

    #[test]
    fn test_explicit_date_and_puts() {
        let table = options_table(&ticker(), Some("2026-09-18"), Some("puts")).unwrap();
        assert_eq!(table.kind(), OptionKind::Puts);
        assert_eq!(table.rows(), 2);
        assert!(table.to_string().contains("195"));
    }

    #[test]
    fn test_unknown_date_rejected() {
        for bad in ["2026-01-02", "09/18/2026", "soon"] {
            let err = options_table(&ticker(), Some(bad), None).unwrap_err();
            assert!(matches!(err, VizError::InvalidExpiry(_)), "{bad}");
        }
    }

    #[test]
    fn test_unsupported_kind_rejected() {
        for bad in ["call", "straddles", "PUTS", ""] {
            let err = options_table(&ticker(), None, Some(bad)).unwrap_err();
            assert!(matches!(err, VizError::InvalidKind(_)), "{bad}");
        }
    }

    #[test]
    fn test_no_expiries_reported() {
        let empty = MemoryTicker::new("AAPL");
        let err = options_table(&empty, None, None).unwrap_err();
        assert!(matches!(err, VizError::NoExpiries(_)));
    }

    #[test]
    fn test_numeric_cells_rounded_to_three_decimals() {
        let rendered = options_table(&ticker(), None, None).unwrap().to_string();
        // 12.3456 -> 12.346, -0.4249 -> -0.425, 0.31141 -> 0.311
        assert!(rendered.contains("12.346"));
        assert!(rendered.contains("-0.425"));
        assert!(rendered.contains("0.311"));
        assert!(!rendered.contains("12.3456"));
    }

    #[test]
    fn test_fmt3() {
        assert_eq!(fmt3(1.23456), "1.235");
        assert_eq!(fmt3(1.5), "1.5");
        assert_eq!(fmt3(200.0), "200");
        assert_eq!(fmt3(-3.2951), "-3.295");
    }

    #[test]
    fn test_header_labels_rendered() {
        let rendered = options_table(&ticker(), None, None).unwrap().to_string();
        for label in OptionsTable::column_labels() {
            assert!(rendered.contains(&label), "missing column {label}");
        }
    }
}
