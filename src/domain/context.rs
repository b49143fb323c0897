//! Per-symbol evaluation context.

use crate::domain::catalyst::Catalyst;
use chrono::{DateTime, Utc};

/// Everything the pillars may look at for one symbol, built fresh for each
/// evaluation and discarded afterwards.
///
/// Market fields are `Option` so that a pillar receiving incomplete data
/// fails with a reason instead of reading a sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationContext {
    pub price: Option<f64>,
    pub prev_close: Option<f64>,
    pub intraday_volume: Option<u64>,
    pub avg_volume: Option<f64>,
    pub catalyst: Option<Catalyst>,
    pub float_shares: Option<u64>,
    pub timestamp: DateTime<Utc>,
}

impl EvaluationContext {
    /// An empty context at `timestamp`; every pillar fails against it.
    pub fn empty(timestamp: DateTime<Utc>) -> Self {
        Self {
            price: None,
            prev_close: None,
            intraday_volume: None,
            avg_volume: None,
            catalyst: None,
            float_shares: None,
            timestamp,
        }
    }

    /// Percent change from the previous close, or `None` when it cannot be
    /// computed.
    pub fn pct_change(&self) -> Option<f64> {
        let price = self.price.filter(|p| p.is_finite())?;
        let prev = self.prev_close.filter(|p| p.is_finite() && *p != 0.0)?;
        Some((price - prev) / prev * 100.0)
    }

    /// Full-session relative volume: intraday volume over the average.
    pub fn relative_volume(&self) -> Option<f64> {
        let volume = self.intraday_volume?;
        let avg = self.avg_volume.filter(|a| a.is_finite() && *a > 0.0)?;
        Some(volume as f64 / avg)
    }
}

/// Arithmetic mean of daily volumes; `None` for an empty history.
pub fn average_volume(history: &[u64]) -> Option<f64> {
    if history.is_empty() {
        return None;
    }
    let total: f64 = history.iter().map(|&v| v as f64).sum();
    Some(total / history.len() as f64)
}
