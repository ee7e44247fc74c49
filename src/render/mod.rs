pub mod chart;
pub mod table;

pub use chart::{stock_chart, PriceChart};
pub use table::{options_table, OptionsTable};
