//! # Tickerviz - Stock Chart & Options Table Rendering
//!
//! A small Rust library that turns ticker data into visualizations:
//! - Single-line closing price charts (in-memory SVG) over a fixed set of
//!   time periods, with an optional company logo overlay
//! - Styled option chain tables for a chosen expiry date and side
//!
//! Data comes from any [`provider::StockData`] implementation; the crate
//! ships an in-memory one plus CSV fixture loaders. There is no network
//! access, caching or storage here, only validation and rendering.
//!
//! ## Quick Start
//!
//! ```rust
//! use tickerviz::prelude::*;
//! use chrono::{TimeZone, Utc};
//!
//! let bars = vec![
//!     PriceBar::new(Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap(), 101.2, 103.0, 100.8, 102.4, 1_200_000),
//!     PriceBar::new(Utc.with_ymd_and_hms(2026, 7, 2, 0, 0, 0).unwrap(), 102.4, 104.1, 102.0, 103.7, 980_000),
//! ];
//! let ticker = MemoryTicker::new("AAPL").with_daily(bars);
//!
//! let chart = stock_chart(&ticker, "max").unwrap();
//! assert!(chart.as_svg().contains("Stock: AAPL, Time Period: max"));
//! ```

pub mod error;
pub mod models;
pub mod provider;
pub mod render;
pub mod utils;

// Prelude for convenient imports
pub mod prelude {
    //! Prelude module for convenient imports
    //!
    //! Import this module to get the most commonly used types and functions:
    //! ```rust
    //! use tickerviz::prelude::*;
    //! ```

    pub use crate::error::VizError;
    pub use crate::models::{Interval, OptionChain, OptionContract, OptionKind, Period, PriceBar};
    pub use crate::provider::{MemoryTicker, StockData};
    pub use crate::render::{options_table, stock_chart, OptionsTable, PriceChart};
}

// Re-export the two renderers and commonly used utilities
pub use render::{options_table, stock_chart};
pub use utils::{init_logger, Timer};
