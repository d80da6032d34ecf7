use crate::dataset;
use crate::market::format::{format_currency, format_fixed, format_pct};
use crate::market::matcher::{TickerQuery, find_row};
use crate::model::{DatasetFile, MarketSummary, Row, SummaryError};
use crate::normalizer::{to_integer, to_number};
use crate::resolver::pick;
use crate::utils::filename_date;
use std::path::Path;
use tracing::{info, warn};

const PRICE: &[&str] = &["Price", "Close", "ClosePrice", "LastPrice"];
const CHANGE_1D: &[&str] = &["Price Change % 1 day"];
const CHANGE_1W: &[&str] = &["Price Change % 1 week"];
const TURNOVER: &[&str] = &[
    "Price * Volume (Turnover) 1 day",
    "Volume",
    "Volume(24H)",
    "TradedQty",
    "TOTTRDQTY",
];
const MCAP: &[&str] = &["Market capitalization", "Mcap", "MarketCap"];
const RANK: &[&str] = &["Rank"];
const VWAP: &[&str] = &["Volume Weighted Average Price 1 day", "VWAP", "Volume Weighted Average Price"];
const ATR14: &[&str] = &["Average True Range % (14) 1 day", "ATR14", "ATR_14", "ATR(14)"];
const RELATIVE_VOL: &[&str] = &[
    "Relative Volume 1 day",
    "RelVol",
    "relative_volume",
    "relative vol",
    "RelativeVolume",
];
const VOL_CHANGE: &[&str] = &["Volume Change % 1 day"];
const VOLATILITY: &[&str] = &["Volatility 1 day", "Volatility"];
const BETA: &[&str] = &["Beta"];
const COMPANY: &[&str] = &["Description", "Company", "CompanyName", "NameOfTheCompany"];
const TICKER: &[&str] = &["Symbol", "Ticker", "SecurityCode", "Security Code", "Scrip"];

/// Looks `ticker` up in the latest dataset under `data_dir`.
pub fn summarize(data_dir: &Path, ticker: &str) -> Result<MarketSummary, SummaryError> {
    let query = TickerQuery::new(ticker);
    if query.is_empty() {
        return Err(SummaryError::EmptyTicker);
    }

    let dataset = dataset::load_latest(data_dir)?;
    let Some((index, tier)) = find_row(&dataset.rows, &query) else {
        warn!("Ticker '{}' not found in {}", ticker, dataset.file.file_name);
        return Err(SummaryError::NotFound {
            ticker: ticker.to_string(),
            file: dataset.file.file_name.clone(),
        });
    };
    info!("Matched '{}' at row {} via {} tier", ticker, index, tier);

    Ok(build_summary(&dataset.rows[index], &dataset.file, ticker))
}

/// Assembles the response for a matched row. Missing or unparseable fields
/// come out as `None` in both raw and display form.
pub fn build_summary(row: &Row, file: &DatasetFile, ticker: &str) -> MarketSummary {
    let number = |candidates: &[&str]| to_number(pick(row, candidates));
    let raw = |candidates: &[&str]| pick(row, candidates).map(String::from);

    let price = number(PRICE);
    let change_1d = number(CHANGE_1D);
    let change_1w = number(CHANGE_1W);
    let volume_raw = raw(TURNOVER);
    let volume = to_number(volume_raw.as_deref());
    let mcap_raw = raw(MCAP);
    let mcap = to_number(mcap_raw.as_deref());
    let vwap = number(VWAP);
    let atr14 = number(ATR14);

    let resolved_ticker = pick(row, TICKER)
        .filter(|s| !s.is_empty())
        .unwrap_or(ticker)
        .trim()
        .to_uppercase();

    MarketSummary {
        ticker: resolved_ticker,
        company: raw(COMPANY).filter(|c| !c.is_empty()),
        csv_filename: file.file_name.clone(),
        eod_date: filename_date(&file.file_name).map(|d| d.format("%Y-%m-%d").to_string()),
        price,
        price_display: price.map(format_currency),
        change_1d_pct: change_1d,
        change_1d_display: change_1d.map(format_pct),
        change_1w_pct: change_1w,
        change_1w_display: change_1w.map(format_pct),
        volume_24h_raw: volume_raw,
        volume_24h: volume,
        volume_24h_display: volume.map(format_currency),
        mcap_raw,
        mcap,
        mcap_display: mcap.map(format_currency),
        rank: to_integer(pick(row, RANK)),
        vwap,
        vwap_display: vwap.map(format_fixed),
        atr14,
        atr14_display: atr14.map(format_pct),
        relative_vol: number(RELATIVE_VOL),
        vol_change: number(VOL_CHANGE),
        volatility: number(VOLATILITY),
        beta: number(BETA),
    }
}
