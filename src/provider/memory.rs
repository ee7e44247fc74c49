use crate::error::VizError;
use crate::models::{Interval, OptionChain, Period, PriceBar};
use crate::provider::StockData;
use crate::utils::date::format_date;
use chrono::{NaiveDate, Utc};
use std::collections::BTreeMap;

/// In-memory [`StockData`] implementation.
///
/// Holds daily bars, intraday bars and option chains keyed by expiry.
/// Used by the CLI (fed from CSV fixtures) and by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryTicker {
    symbol: String,
    logo_url: Option<String>,
    daily: Vec<PriceBar>,
    intraday: Vec<PriceBar>,
    chains: BTreeMap<NaiveDate, OptionChain>,
}

impl MemoryTicker {
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Daily bars, any order; `history` sorts and filters.
    pub fn with_daily(mut self, bars: Vec<PriceBar>) -> Self {
        self.daily = bars;
        self
    }

    /// Intraday bars backing the one-day view.
    pub fn with_intraday(mut self, bars: Vec<PriceBar>) -> Self {
        self.intraday = bars;
        self
    }

    pub fn with_logo_url(mut self, url: impl Into<String>) -> Self {
        self.logo_url = Some(url.into());
        self
    }

    pub fn with_chain(mut self, expiry: NaiveDate, chain: OptionChain) -> Self {
        self.chains.insert(expiry, chain);
        self
    }

    pub fn with_chains(mut self, chains: BTreeMap<NaiveDate, OptionChain>) -> Self {
        self.chains = chains;
        self
    }
}

impl StockData for MemoryTicker {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn logo_url(&self) -> Option<&str> {
        self.logo_url.as_deref()
    }

    fn history(&self, period: Period, interval: Interval) -> Result<Vec<PriceBar>, VizError> {
        let source = match interval {
            Interval::FiveMinutes => &self.intraday,
            Interval::OneDay => &self.daily,
        };

        let cutoff = period.cutoff(Utc::now());
        let mut bars: Vec<PriceBar> = source
            .iter()
            .filter(|bar| bar.time >= cutoff)
            .cloned()
            .collect();
        bars.sort_by(|a, b| a.time.cmp(&b.time));
        Ok(bars)
    }

    fn option_expiries(&self) -> Vec<NaiveDate> {
        // BTreeMap keys iterate in ascending order, so nearest expiry first
        self.chains.keys().copied().collect()
    }

    fn option_chain(&self, expiry: NaiveDate) -> Result<OptionChain, VizError> {
        self.chains
            .get(&expiry)
            .cloned()
            .ok_or_else(|| VizError::InvalidExpiry(format_date(expiry)))
    }
}
