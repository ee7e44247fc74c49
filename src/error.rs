use crate::models::market::Period;
use thiserror::Error;

/// Errors surfaced by providers and the two renderers.
#[derive(Debug, Error)]
pub enum VizError {
    #[error("incorrect period '{0}' specified, allowed: 1d, 1mo, 3mo, 1y, 2y, 5y, 10y, ytd, max")]
    InvalidPeriod(String),

    #[error("invalid expiry '{0}' selected, check StockData::option_expiries for available dates")]
    InvalidExpiry(String),

    #[error("invalid option kind '{0}', only 'calls' and 'puts' are supported")]
    InvalidKind(String),

    #[error("no price history returned for '{symbol}' over period {period}")]
    NoData { symbol: String, period: Period },

    #[error("no option expiries listed for '{0}'")]
    NoExpiries(String),

    #[error("provider error: {0}")]
    Provider(String),

    #[error("chart rendering failed: {0}")]
    Draw(String),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid date '{value}' in {context}, expected YYYY-MM-DD")]
    BadDate { value: String, context: &'static str },
}
