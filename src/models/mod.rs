pub mod market;
pub mod options;

pub use market::{Interval, Period, PriceBar};
pub use options::{OptionChain, OptionContract, OptionKind};
