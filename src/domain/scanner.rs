//! Scanner orchestrator.
//!
//! For each symbol: check the results cache, otherwise build an
//! [`EvaluationContext`] from the providers, run every enabled pillar
//! against it, and cache the aggregated [`ScanResult`]. A provider failure
//! skips that symbol for this cycle and never aborts a bulk scan.

use crate::domain::cache::{HistoricalDataCache, ScannerResultsCache, WarmReport};
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::context::{EvaluationContext, average_volume};
use crate::domain::error::ScanError;
use crate::domain::pillar::{Pillar, build_pillars};
use crate::domain::scan_result::ScanResult;
use crate::domain::scanner_config::ScannerConfig;
use crate::domain::session::is_market_open;
use crate::domain::universe::normalize_symbol;
use crate::ports::provider_bundle::ProviderBundle;
use rayon::prelude::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, error, info, warn};

/// Cooperative cancellation for a scan. Cancelling stops new symbol
/// evaluations from starting; ones already running complete.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

pub struct ScannerModule {
    config: ScannerConfig,
    providers: ProviderBundle,
    pillars: Vec<Box<dyn Pillar>>,
    historical_cache: HistoricalDataCache,
    results_cache: ScannerResultsCache,
    clock: Arc<dyn Clock>,
}

impl ScannerModule {
    pub fn new(config: ScannerConfig, providers: ProviderBundle) -> Self {
        Self::with_clock(config, providers, Arc::new(SystemClock))
    }

    pub fn with_clock(
        config: ScannerConfig,
        providers: ProviderBundle,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let pillars = build_pillars(&config);
        let historical_cache =
            HistoricalDataCache::new(config.volume.lookback_days, Arc::clone(&clock));
        let results_cache = ScannerResultsCache::new(config.ttl_seconds, Arc::clone(&clock));
        info!(pillars = pillars.len(), "scanner initialized");
        Self {
            config,
            providers,
            pillars,
            historical_cache,
            results_cache,
            clock,
        }
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn pillar_names(&self) -> Vec<&'static str> {
        self.pillars.iter().map(|p| p.name()).collect()
    }

    pub fn historical_cache(&self) -> &HistoricalDataCache {
        &self.historical_cache
    }

    pub fn results_cache(&self) -> &ScannerResultsCache {
        &self.results_cache
    }

    /// Pre-session warm of average volumes for the whole universe.
    pub fn warm_cache(&self) -> WarmReport {
        let symbols = self.providers.universe.get_universe();
        self.historical_cache
            .warm(&symbols, self.providers.market_data.as_ref())
    }

    pub fn refresh_universe(&self) -> Result<(), ScanError> {
        self.providers.universe.refresh()
    }

    pub fn invalidate(&self, symbol: &str) {
        self.results_cache.invalidate(symbol);
    }

    /// Scan the universe sequentially. Symbols that fail are left out;
    /// the rest keep universe order.
    pub fn scan(&self) -> Vec<Arc<ScanResult>> {
        self.scan_until(&CancelToken::new())
    }

    /// Sequential scan that stops before the next symbol once `cancel` fires.
    pub fn scan_until(&self, cancel: &CancelToken) -> Vec<Arc<ScanResult>> {
        self.note_session();
        let universe = self.providers.universe.get_universe();
        let mut results = Vec::with_capacity(universe.len());
        for symbol in &universe {
            if cancel.is_cancelled() {
                info!(completed = results.len(), "scan cancelled");
                break;
            }
            if let Some(result) = self.scan_single(symbol) {
                results.push(result);
            }
        }
        info!(
            results = results.len(),
            universe = universe.len(),
            "scan complete"
        );
        results
    }

    /// Scan the universe on a pool of `workers` threads. Results keep
    /// universe order.
    pub fn scan_concurrent(&self, workers: usize, cancel: &CancelToken) -> Vec<Arc<ScanResult>> {
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers.max(1))
            .build()
        {
            Ok(pool) => pool,
            Err(e) => {
                warn!(error = %e, "failed to build worker pool, scanning sequentially");
                return self.scan_until(cancel);
            }
        };

        self.note_session();
        let universe = self.providers.universe.get_universe();
        let results: Vec<Arc<ScanResult>> = pool.install(|| {
            universe
                .par_iter()
                .map(|symbol| {
                    if cancel.is_cancelled() {
                        None
                    } else {
                        self.scan_single(symbol)
                    }
                })
                .collect::<Vec<_>>()
        })
        .into_iter()
        .flatten()
        .collect();

        info!(
            results = results.len(),
            universe = universe.len(),
            workers,
            "concurrent scan complete"
        );
        results
    }

    fn note_session(&self) {
        if !is_market_open(self.clock.now()) {
            debug!("scanning outside the regular session");
        }
    }

    /// Evaluate one symbol, serving from the results cache when fresh.
    /// Returns `None` if the symbol could not be evaluated this cycle.
    pub fn scan_single(&self, symbol: &str) -> Option<Arc<ScanResult>> {
        let symbol = normalize_symbol(symbol);
        if let Some(cached) = self.results_cache.get(&symbol) {
            debug!(symbol = %symbol, "results cache hit");
            return Some(cached);
        }

        match self.build_context(&symbol) {
            Ok(context) => {
                let result = Arc::new(self.evaluate_context(&symbol, &context));
                self.results_cache.put(Arc::clone(&result));
                Some(result)
            }
            Err(e) => {
                error!(symbol = %symbol, error = %e, "error scanning symbol");
                None
            }
        }
    }

    /// Gather provider data for one symbol.
    pub fn build_context(&self, symbol: &str) -> Result<EvaluationContext, ScanError> {
        let md = self.providers.market_data.as_ref();

        let price = md.get_last_price(symbol)?;
        let prev_close = md.get_prev_close(symbol)?;
        let intraday_volume = md.get_intraday_volume(symbol)?;

        let avg_volume = match self.historical_cache.get_avg_volume(symbol) {
            Some(avg) => Some(avg),
            None => {
                debug!(symbol = %symbol, "historical cache miss, fetching history");
                let history =
                    md.get_historical_daily_volume(symbol, self.config.volume.lookback_days)?;
                average_volume(&history)
            }
        };

        let catalyst = self
            .providers
            .news
            .get_recent_catalyst(symbol, self.config.catalyst.lookback_hours)?;
        let float_shares = self.providers.fundamentals.get_float_shares(symbol)?;

        Ok(EvaluationContext {
            price: Some(price),
            prev_close: Some(prev_close),
            intraday_volume: Some(intraday_volume),
            avg_volume,
            catalyst,
            float_shares,
            timestamp: self.clock.now(),
        })
    }

    /// Run every enabled pillar against `context` and aggregate. Pure: no
    /// provider or cache access.
    pub fn evaluate_context(&self, symbol: &str, context: &EvaluationContext) -> ScanResult {
        let details = self
            .pillars
            .iter()
            .map(|pillar| pillar.evaluate(symbol, context))
            .collect();

        ScanResult::new(
            symbol.to_string(),
            context.price.unwrap_or(0.0),
            context.pct_change().unwrap_or(0.0),
            context.relative_volume().unwrap_or(0.0),
            context.float_shares,
            context.catalyst.as_ref().map(|c| c.headline.clone()),
            details,
            context.timestamp,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_token_is_shared_between_clones() {
        let token = CancelToken::new();
        let handle = token.clone();
        assert!(!token.is_cancelled());
        handle.cancel();
        assert!(token.is_cancelled());
    }
}
