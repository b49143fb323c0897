//! In-memory market data with per-symbol presets.

use crate::domain::error::ScanError;
use crate::domain::universe::normalize_symbol;
use crate::ports::market_data_port::MarketDataPort;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Clone, PartialEq)]
pub struct MockQuote {
    pub price: f64,
    pub prev_close: f64,
    pub intraday_volume: u64,
    /// Daily volumes, oldest first.
    pub history: Vec<u64>,
}

impl MockQuote {
    pub fn new(price: f64, prev_close: f64, intraday_volume: u64, history: Vec<u64>) -> Self {
        Self {
            price,
            prev_close,
            intraday_volume,
            history,
        }
    }
}

/// Unknown symbols return a provider error.
#[derive(Debug, Default)]
pub struct MockMarketDataAdapter {
    quotes: RwLock<HashMap<String, MockQuote>>,
}

impl MockMarketDataAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(self, symbol: &str, quote: MockQuote) -> Self {
        self.set_quote(symbol, quote);
        self
    }

    pub fn set_quote(&self, symbol: &str, quote: MockQuote) {
        self.quotes
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(normalize_symbol(symbol), quote);
    }

    fn lookup<T>(&self, symbol: &str, f: impl FnOnce(&MockQuote) -> T) -> Result<T, ScanError> {
        let symbol = normalize_symbol(symbol);
        self.quotes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&symbol)
            .map(f)
            .ok_or_else(|| ScanError::provider(&symbol, "no mock data"))
    }
}

impl MarketDataPort for MockMarketDataAdapter {
    fn get_last_price(&self, symbol: &str) -> Result<f64, ScanError> {
        self.lookup(symbol, |q| q.price)
    }

    fn get_prev_close(&self, symbol: &str) -> Result<f64, ScanError> {
        self.lookup(symbol, |q| q.prev_close)
    }

    fn get_intraday_volume(&self, symbol: &str) -> Result<u64, ScanError> {
        self.lookup(symbol, |q| q.intraday_volume)
    }

    fn get_historical_daily_volume(
        &self,
        symbol: &str,
        lookback_days: usize,
    ) -> Result<Vec<u64>, ScanError> {
        self.lookup(symbol, |q| {
            let skip = q.history.len().saturating_sub(lookback_days);
            q.history[skip..].to_vec()
        })
    }
}
