#![allow(dead_code)]

use chrono::{DateTime, Duration, TimeZone, Utc};
use pillarscan::domain::catalyst::Catalyst;
use pillarscan::domain::clock::{Clock, ManualClock};
use pillarscan::domain::error::ScanError;
use pillarscan::domain::scanner::ScannerModule;
use pillarscan::domain::scanner_config::ScannerConfig;
use pillarscan::ports::fundamentals_port::FundamentalsPort;
use pillarscan::ports::market_data_port::MarketDataPort;
use pillarscan::ports::news_port::NewsPort;
use pillarscan::ports::provider_bundle::ProviderBundle;
use pillarscan::ports::universe_port::UniversePort;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// 2024-01-08 is a Monday in EST: the open is 14:30 UTC.
pub fn session_time(minutes_after_open: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 8, 14, 30, 0).unwrap() + Duration::minutes(minutes_after_open)
}

#[derive(Debug, Clone)]
pub struct Quote {
    pub price: f64,
    pub prev_close: f64,
    pub volume: u64,
    pub history: Vec<u64>,
}

pub fn quote(price: f64, prev_close: f64, volume: u64, avg: u64) -> Quote {
    Quote {
        price,
        prev_close,
        volume,
        history: vec![avg; 30],
    }
}

#[derive(Default)]
pub struct MockMarketData {
    pub quotes: HashMap<String, Quote>,
    pub errors: HashMap<String, String>,
    pub history_errors: HashMap<String, String>,
    pub price_calls: AtomicUsize,
    pub history_calls: AtomicUsize,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_quote(mut self, symbol: &str, quote: Quote) -> Self {
        self.quotes.insert(symbol.to_string(), quote);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn with_history_error(mut self, symbol: &str, reason: &str) -> Self {
        self.history_errors
            .insert(symbol.to_string(), reason.to_string());
        self
    }

    pub fn price_calls(&self) -> usize {
        self.price_calls.load(Ordering::SeqCst)
    }

    pub fn history_calls(&self) -> usize {
        self.history_calls.load(Ordering::SeqCst)
    }

    fn quote(&self, symbol: &str) -> Result<&Quote, ScanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ScanError::provider(symbol, reason.clone()));
        }
        self.quotes.get(symbol).ok_or(ScanError::NoData {
            symbol: symbol.to_string(),
        })
    }
}

impl MarketDataPort for MockMarketData {
    fn get_last_price(&self, symbol: &str) -> Result<f64, ScanError> {
        self.price_calls.fetch_add(1, Ordering::SeqCst);
        self.quote(symbol).map(|q| q.price)
    }

    fn get_prev_close(&self, symbol: &str) -> Result<f64, ScanError> {
        self.quote(symbol).map(|q| q.prev_close)
    }

    fn get_intraday_volume(&self, symbol: &str) -> Result<u64, ScanError> {
        self.quote(symbol).map(|q| q.volume)
    }

    fn get_historical_daily_volume(
        &self,
        symbol: &str,
        lookback_days: usize,
    ) -> Result<Vec<u64>, ScanError> {
        self.history_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = self.history_errors.get(symbol) {
            return Err(ScanError::provider(symbol, reason.clone()));
        }
        let history = &self.quote(symbol)?.history;
        let skip = history.len().saturating_sub(lookback_days);
        Ok(history[skip..].to_vec())
    }
}

#[derive(Default)]
pub struct MockNews {
    pub catalysts: HashMap<String, Catalyst>,
    pub errors: HashMap<String, String>,
}

impl MockNews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalyst(mut self, symbol: &str, catalyst_type: &str, headline: &str) -> Self {
        self.catalysts.insert(
            symbol.to_string(),
            Catalyst::new(symbol, headline, catalyst_type, session_time(-60)),
        );
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl NewsPort for MockNews {
    fn get_recent_catalyst(
        &self,
        symbol: &str,
        _lookback_hours: i64,
    ) -> Result<Option<Catalyst>, ScanError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(ScanError::provider(symbol, reason.clone()));
        }
        Ok(self.catalysts.get(symbol).cloned())
    }
}

#[derive(Default)]
pub struct MockFundamentals {
    pub floats: HashMap<String, u64>,
}

impl MockFundamentals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_float(mut self, symbol: &str, shares: u64) -> Self {
        self.floats.insert(symbol.to_string(), shares);
        self
    }
}

impl FundamentalsPort for MockFundamentals {
    fn get_float_shares(&self, symbol: &str) -> Result<Option<u64>, ScanError> {
        Ok(self.floats.get(symbol).copied())
    }
}

pub struct MockUniverse {
    pub symbols: Vec<String>,
}

impl MockUniverse {
    pub fn new(symbols: &[&str]) -> Self {
        Self {
            symbols: symbols.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl UniversePort for MockUniverse {
    fn get_universe(&self) -> Vec<String> {
        self.symbols.clone()
    }

    fn refresh(&self) -> Result<(), ScanError> {
        Ok(())
    }
}

pub fn bundle(
    market_data: Arc<MockMarketData>,
    news: MockNews,
    fundamentals: MockFundamentals,
    universe: &[&str],
) -> ProviderBundle {
    ProviderBundle {
        market_data,
        news: Arc::new(news),
        fundamentals: Arc::new(fundamentals),
        universe: Arc::new(MockUniverse::new(universe)),
    }
}

/// A scanner over `bundle` whose clock starts `minutes_after_open` into
/// the 2024-01-08 session.
pub fn scanner_at(
    config: ScannerConfig,
    bundle: ProviderBundle,
    minutes_after_open: i64,
) -> (ScannerModule, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::new(session_time(minutes_after_open)));
    let dyn_clock: Arc<dyn Clock> = clock.clone();
    (ScannerModule::with_clock(config, bundle, dyn_clock), clock)
}

/// Thresholds from the reference all-pass scenario.
pub fn scenario_config() -> ScannerConfig {
    let mut config = ScannerConfig::default();
    config.momentum.min_pct_move = 10.0;
    config.momentum.min_early_session_rvol = 2.0;
    config.volume.min_relative_volume = 2.0;
    config
}
