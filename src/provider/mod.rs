pub mod csv;
pub mod memory;

pub use memory::MemoryTicker;

use crate::error::VizError;
use crate::models::{Interval, OptionChain, Period, PriceBar};
use chrono::NaiveDate;

/// Source of market data for one underlying ticker.
///
/// The renderers only consume this trait; where the data comes from (an API
/// client, local fixtures, a test double) is the caller's business.
pub trait StockData {
    /// Ticker symbol, e.g. "AAPL".
    fn symbol(&self) -> &str;

    /// Company logo URL, if the provider knows one.
    fn logo_url(&self) -> Option<&str> {
        None
    }

    /// Price history covering `period`, sampled at `interval`, sorted by
    /// time ascending.
    fn history(&self, period: Period, interval: Interval) -> Result<Vec<PriceBar>, VizError>;

    /// Available option expiry dates, sorted ascending (nearest first).
    fn option_expiries(&self) -> Vec<NaiveDate>;

    /// Option chain for one of the dates returned by
    /// [`StockData::option_expiries`].
    fn option_chain(&self, expiry: NaiveDate) -> Result<OptionChain, VizError>;
}
