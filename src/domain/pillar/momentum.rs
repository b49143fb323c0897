//! Momentum pillar: percent move plus early-session relative volume.
//!
//! Early-session RVol scales the historical daily average by the fraction
//! of the regular session that has elapsed, so a stock trading heavily at
//! 10:30 is compared against what it normally trades by 10:30 rather than
//! against a full day. This is a different metric from the volume pillar's
//! full-session ratio and the two can disagree.

use crate::domain::context::EvaluationContext;
use crate::domain::pillar::Pillar;
use crate::domain::scan_result::PillarResult;
use crate::domain::session::{SESSION_MINUTES, is_early_session, session_elapsed_minutes};
use crate::ports::config_port::ConfigPort;
use chrono::{DateTime, Utc};

pub const DEFAULT_MIN_PCT_MOVE: f64 = 10.0;
pub const DEFAULT_MIN_EARLY_SESSION_RVOL: f64 = 5.0;

#[derive(Debug, Clone, PartialEq)]
pub struct MomentumConfig {
    pub enabled: bool,
    pub min_pct_move: f64,
    pub min_early_session_rvol: f64,
}

impl Default for MomentumConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_pct_move: DEFAULT_MIN_PCT_MOVE,
            min_early_session_rvol: DEFAULT_MIN_EARLY_SESSION_RVOL,
        }
    }
}

impl MomentumConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            enabled: config.get_bool("momentum", "enabled", true),
            min_pct_move: config.get_double("momentum", "min_pct_move", DEFAULT_MIN_PCT_MOVE),
            min_early_session_rvol: config.get_double(
                "momentum",
                "min_early_session_rvol",
                DEFAULT_MIN_EARLY_SESSION_RVOL,
            ),
        }
    }
}

/// Intraday volume relative to the share of the daily average expected by
/// `timestamp`. Before the open the elapsed time counts as one minute.
pub fn early_session_rvol(intraday_volume: u64, avg_volume: f64, timestamp: DateTime<Utc>) -> f64 {
    let elapsed = session_elapsed_minutes(timestamp).max(1) as f64;
    let session_fraction = (elapsed / SESSION_MINUTES).min(1.0);
    let expected_volume = (avg_volume * session_fraction).max(1.0);
    intraday_volume as f64 / expected_volume
}

#[derive(Debug, Clone)]
pub struct MomentumPillar {
    config: MomentumConfig,
}

impl MomentumPillar {
    pub fn new(config: MomentumConfig) -> Self {
        Self { config }
    }

    fn fail(&self, reason: &str) -> PillarResult {
        PillarResult::fail(self.name(), None, None, reason)
    }
}

impl Pillar for MomentumPillar {
    fn name(&self) -> &'static str {
        "momentum"
    }

    fn evaluate(&self, _symbol: &str, context: &EvaluationContext) -> PillarResult {
        let (price, prev_close) = match (context.price, context.prev_close) {
            (Some(p), Some(c)) if p.is_finite() && c.is_finite() => (p, c),
            _ => return self.fail("Price or previous close unavailable"),
        };
        if prev_close == 0.0 {
            return self.fail("Previous close is zero");
        }

        let pct_change = (price - prev_close) / prev_close * 100.0;
        let min_move = self.config.min_pct_move;
        if pct_change.abs() < min_move {
            return PillarResult::fail(
                self.name(),
                Some(pct_change.into()),
                Some(min_move.into()),
                format!("% change {pct_change:+.1}% below threshold {min_move:?}%"),
            );
        }

        let (volume, avg) = match (context.intraday_volume, context.avg_volume) {
            (Some(v), Some(a)) if a.is_finite() && a > 0.0 => (v, a),
            _ => return self.fail("Volume data unavailable for RVol calculation"),
        };

        let rvol = early_session_rvol(volume, avg, context.timestamp);
        let min_rvol = self.config.min_early_session_rvol;
        if rvol < min_rvol {
            return PillarResult::fail(
                self.name(),
                Some(pct_change.into()),
                Some(min_rvol.into()),
                format!("Early-session RVol {rvol:.1}x below threshold {min_rvol:?}x"),
            );
        }

        let timing = if is_early_session(context.timestamp) {
            "early session"
        } else {
            "late session"
        };
        PillarResult::pass(
            self.name(),
            pct_change,
            Some(min_move.into()),
            format!("{pct_change:+.1}% move, RVol {rvol:.1}x, {timing}"),
        )
    }
}
