//! CSV market data adapter.
//!
//! Reads a directory holding one `<SYMBOL>.csv` daily bar file per symbol
//! (`date,open,high,low,close,volume`) and a `quotes.csv` snapshot
//! (`symbol,last_price,intraday_volume`). Quotes are loaded once; bar files
//! are read on demand.

use crate::domain::error::ScanError;
use crate::domain::universe::normalize_symbol;
use crate::ports::market_data_port::MarketDataPort;
use chrono::NaiveDate;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::info;

pub const QUOTES_FILE: &str = "quotes.csv";

/// Open, high and low columns are present in the files but unused.
#[derive(Debug, Clone, Deserialize)]
struct DailyBar {
    date: NaiveDate,
    close: f64,
    volume: u64,
}

#[derive(Debug, Clone, Deserialize)]
struct QuoteRow {
    symbol: String,
    last_price: f64,
    intraday_volume: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Quote {
    last_price: f64,
    intraday_volume: u64,
}

pub struct CsvMarketDataAdapter {
    base_path: PathBuf,
    quotes: HashMap<String, Quote>,
}

impl CsvMarketDataAdapter {
    pub fn new(base_path: PathBuf) -> Result<Self, ScanError> {
        let quotes = load_quotes(&base_path.join(QUOTES_FILE))?;
        info!(
            path = %base_path.display(),
            quotes = quotes.len(),
            "loaded market data quotes"
        );
        Ok(Self { base_path, quotes })
    }

    fn bars_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }

    fn quote(&self, symbol: &str) -> Result<Quote, ScanError> {
        let symbol = normalize_symbol(symbol);
        self.quotes
            .get(&symbol)
            .copied()
            .ok_or(ScanError::NoData { symbol })
    }

    /// Daily bars sorted oldest first.
    fn daily_bars(&self, symbol: &str) -> Result<Vec<DailyBar>, ScanError> {
        let symbol = normalize_symbol(symbol);
        let path = self.bars_path(&symbol);
        let mut rdr = csv::Reader::from_path(&path).map_err(|e| {
            ScanError::provider(&symbol, format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut bars = Vec::new();
        for row in rdr.deserialize::<DailyBar>() {
            let bar =
                row.map_err(|e| ScanError::provider(&symbol, format!("CSV parse error: {}", e)))?;
            bars.push(bar);
        }
        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }
}

fn load_quotes(path: &Path) -> Result<HashMap<String, Quote>, ScanError> {
    let mut rdr = csv::Reader::from_path(path).map_err(|e| {
        ScanError::provider(
            "quotes",
            format!("failed to read {}: {}", path.display(), e),
        )
    })?;

    let mut quotes = HashMap::new();
    for row in rdr.deserialize::<QuoteRow>() {
        let row = row.map_err(|e| ScanError::provider("quotes", format!("CSV parse error: {}", e)))?;
        quotes.insert(
            normalize_symbol(&row.symbol),
            Quote {
                last_price: row.last_price,
                intraday_volume: row.intraday_volume,
            },
        );
    }
    Ok(quotes)
}

impl MarketDataPort for CsvMarketDataAdapter {
    fn get_last_price(&self, symbol: &str) -> Result<f64, ScanError> {
        self.quote(symbol).map(|q| q.last_price)
    }

    fn get_prev_close(&self, symbol: &str) -> Result<f64, ScanError> {
        self.daily_bars(symbol)?
            .last()
            .map(|bar| bar.close)
            .ok_or_else(|| ScanError::NoData {
                symbol: normalize_symbol(symbol),
            })
    }

    fn get_intraday_volume(&self, symbol: &str) -> Result<u64, ScanError> {
        self.quote(symbol).map(|q| q.intraday_volume)
    }

    fn get_historical_daily_volume(
        &self,
        symbol: &str,
        lookback_days: usize,
    ) -> Result<Vec<u64>, ScanError> {
        let bars = self.daily_bars(symbol)?;
        let skip = bars.len().saturating_sub(lookback_days);
        Ok(bars.iter().skip(skip).map(|b| b.volume).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_data() -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().to_path_buf();

        // Deliberately out of order.
        let bars = "date,open,high,low,close,volume\n\
            2024-01-17,110.0,120.0,105.0,115.0,55000\n\
            2024-01-15,100.0,110.0,90.0,105.0,50000\n\
            2024-01-16,105.0,115.0,100.0,110.0,60000\n";
        fs::write(path.join("ABC.csv"), bars).unwrap();
        fs::write(path.join("EMPTY.csv"), "date,open,high,low,close,volume\n").unwrap();
        fs::write(
            path.join(QUOTES_FILE),
            "symbol,last_price,intraday_volume\nabc,126.5,90000\nEMPTY,3.0,10\n",
        )
        .unwrap();

        (dir, path)
    }

    #[test]
    fn quotes_are_keyed_uppercase() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path).unwrap();
        assert_eq!(adapter.get_last_price("ABC").unwrap(), 126.5);
        assert_eq!(adapter.get_last_price("abc").unwrap(), 126.5);
        assert_eq!(adapter.get_intraday_volume("ABC").unwrap(), 90000);
    }

    #[test]
    fn prev_close_is_latest_bar() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path).unwrap();
        assert_eq!(adapter.get_prev_close("ABC").unwrap(), 115.0);
    }

    #[test]
    fn history_is_last_n_oldest_first() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path).unwrap();
        assert_eq!(
            adapter.get_historical_daily_volume("ABC", 2).unwrap(),
            vec![60000, 55000]
        );
        assert_eq!(
            adapter.get_historical_daily_volume("ABC", 30).unwrap(),
            vec![50000, 60000, 55000]
        );
    }

    #[test]
    fn unknown_symbol_is_no_data() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path).unwrap();
        assert!(matches!(
            adapter.get_last_price("ZZZ"),
            Err(ScanError::NoData { symbol }) if symbol == "ZZZ"
        ));
        assert!(matches!(
            adapter.get_prev_close("ZZZ"),
            Err(ScanError::Provider { .. })
        ));
    }

    #[test]
    fn empty_bar_file() {
        let (_dir, path) = setup_test_data();
        let adapter = CsvMarketDataAdapter::new(path).unwrap();
        assert!(matches!(
            adapter.get_prev_close("EMPTY"),
            Err(ScanError::NoData { .. })
        ));
        assert!(
            adapter
                .get_historical_daily_volume("EMPTY", 30)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn missing_quotes_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(CsvMarketDataAdapter::new(dir.path().to_path_buf()).is_err());
    }

    #[test]
    fn malformed_bar_is_provider_error() {
        let (_dir, path) = setup_test_data();
        fs::write(
            path.join("BAD.csv"),
            "date,open,high,low,close,volume\nnot-a-date,1,1,1,1,1\n",
        )
        .unwrap();
        let adapter = CsvMarketDataAdapter::new(path).unwrap();
        let err = adapter.get_prev_close("BAD").unwrap_err();
        assert!(err.to_string().contains("CSV parse error"));
    }
}
