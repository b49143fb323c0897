//! Two-tier scanner cache.
//!
//! - [`HistoricalDataCache`]: average daily volume per symbol, warmed once
//!   before the session and read on every evaluation.
//! - [`ScannerResultsCache`]: completed scan results with a short TTL, so
//!   rapid repeat queries skip the providers.
//!
//! Both are plain owned values behind `RwLock`s and can be shared across
//! scan workers.

use crate::domain::clock::Clock;
use crate::domain::context::average_volume;
use crate::domain::scan_result::ScanResult;
use crate::domain::universe::normalize_symbol;
use crate::ports::market_data_port::MarketDataPort;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::{debug, info, warn};

/// How long a warm stays fresh for [`HistoricalDataCache::is_warm`].
pub const WARM_STALE_AFTER_HOURS: i64 = 24;

#[derive(Debug, Default)]
struct HistoricalSnapshot {
    avg_volume: HashMap<String, f64>,
    warmed_at: Option<DateTime<Utc>>,
}

/// Outcome of one warm cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WarmReport {
    pub warmed: usize,
    pub empty: Vec<String>,
    pub failed: Vec<String>,
}

pub struct HistoricalDataCache {
    snapshot: RwLock<HistoricalSnapshot>,
    lookback_days: usize,
    clock: Arc<dyn Clock>,
}

impl HistoricalDataCache {
    pub fn new(lookback_days: usize, clock: Arc<dyn Clock>) -> Self {
        Self {
            snapshot: RwLock::new(HistoricalSnapshot::default()),
            lookback_days,
            clock,
        }
    }

    pub fn lookback_days(&self) -> usize {
        self.lookback_days
    }

    /// Fetch history for every symbol and replace the cached averages.
    ///
    /// A symbol whose fetch fails is logged and left out; the rest still warm.
    pub fn warm(&self, symbols: &[String], provider: &dyn MarketDataPort) -> WarmReport {
        info!(symbols = symbols.len(), "warming historical cache");

        let mut avg_volume = HashMap::with_capacity(symbols.len());
        let mut report = WarmReport::default();

        for symbol in symbols {
            let symbol = normalize_symbol(symbol);
            match provider.get_historical_daily_volume(&symbol, self.lookback_days) {
                Ok(history) => match average_volume(&history) {
                    Some(avg) => {
                        avg_volume.insert(symbol, avg);
                    }
                    None => {
                        debug!(symbol = %symbol, "no volume history");
                        report.empty.push(symbol);
                    }
                },
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "failed to warm cache");
                    report.failed.push(symbol);
                }
            }
        }

        report.warmed = avg_volume.len();
        let mut snapshot = self.snapshot.write().unwrap_or_else(PoisonError::into_inner);
        *snapshot = HistoricalSnapshot {
            avg_volume,
            warmed_at: Some(self.clock.now()),
        };
        info!(warmed = report.warmed, failed = report.failed.len(), "historical cache warmed");
        report
    }

    pub fn get_avg_volume(&self, symbol: &str) -> Option<f64> {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        snapshot.avg_volume.get(&normalize_symbol(symbol)).copied()
    }

    /// True if a warm completed within the last 24 hours. Advisory only.
    pub fn is_warm(&self) -> bool {
        let snapshot = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        match snapshot.warmed_at {
            Some(at) => self.clock.now() - at < Duration::hours(WARM_STALE_AFTER_HOURS),
            None => false,
        }
    }

    pub fn warmed_at(&self) -> Option<DateTime<Utc>> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .warmed_at
    }

    pub fn len(&self) -> usize {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .avg_volume
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

type CacheEntry = (DateTime<Utc>, Arc<ScanResult>);

/// Per-symbol results with lazy expiry: an entry older than the TTL is
/// dropped on the read that finds it.
pub struct ScannerResultsCache {
    entries: RwLock<HashMap<String, CacheEntry>>,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ScannerResultsCache {
    pub fn new(ttl_seconds: i64, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl: Duration::try_seconds(ttl_seconds.max(0)).unwrap_or(Duration::MAX),
            clock,
        }
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }

    fn is_expired(&self, cached_at: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        now - cached_at > self.ttl
    }

    pub fn get(&self, symbol: &str) -> Option<Arc<ScanResult>> {
        let key = normalize_symbol(symbol);
        let now = self.clock.now();
        {
            let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
            match entries.get(&key) {
                None => return None,
                Some((cached_at, result)) if !self.is_expired(*cached_at, now) => {
                    return Some(Arc::clone(result));
                }
                Some(_) => {}
            }
        }

        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        // Another writer may have refreshed the entry between the two locks.
        match entries.get(&key) {
            Some((cached_at, result)) if !self.is_expired(*cached_at, now) => {
                Some(Arc::clone(result))
            }
            Some(_) => {
                entries.remove(&key);
                debug!(symbol = %key, "expired cache entry evicted");
                None
            }
            None => None,
        }
    }

    /// Store `result`, replacing any entry for its symbol.
    pub fn put(&self, result: Arc<ScanResult>) {
        let key = normalize_symbol(&result.symbol);
        let now = self.clock.now();
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, (now, result));
    }

    pub fn invalidate(&self, symbol: &str) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&normalize_symbol(symbol));
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Entries currently held, expired or not.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
