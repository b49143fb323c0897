//! Market data port trait. Powers the price, momentum and volume pillars.

use crate::domain::error::ScanError;

pub trait MarketDataPort: Send + Sync {
    fn get_last_price(&self, symbol: &str) -> Result<f64, ScanError>;

    fn get_prev_close(&self, symbol: &str) -> Result<f64, ScanError>;

    fn get_intraday_volume(&self, symbol: &str) -> Result<u64, ScanError>;

    /// Daily volumes for the last `lookback_days` sessions, oldest first.
    fn get_historical_daily_volume(
        &self,
        symbol: &str,
        lookback_days: usize,
    ) -> Result<Vec<u64>, ScanError>;
}
