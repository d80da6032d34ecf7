// Market module: symbol matching and summary assembly over the latest EOD dataset.

pub mod format;
pub mod matcher;
pub mod summary;

pub use matcher::{TickerQuery, match_row};
pub use summary::summarize;
