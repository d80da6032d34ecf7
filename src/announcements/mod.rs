// Announcement listing enriched with company names from the EOD dataset.

pub mod enricher;

pub use enricher::{SymbolMap, list_enriched, ticker_guess};
