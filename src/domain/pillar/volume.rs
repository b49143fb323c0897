//! Volume pillar: full-session relative volume against the daily average.

use crate::domain::context::EvaluationContext;
use crate::domain::pillar::Pillar;
use crate::domain::scan_result::PillarResult;
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_MIN_RELATIVE_VOLUME: f64 = 5.0;
pub const DEFAULT_LOOKBACK_DAYS: usize = 30;

#[derive(Debug, Clone, PartialEq)]
pub struct VolumeConfig {
    pub enabled: bool,
    pub min_relative_volume: f64,
    /// Days of history averaged into the baseline.
    pub lookback_days: usize,
}

impl Default for VolumeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_relative_volume: DEFAULT_MIN_RELATIVE_VOLUME,
            lookback_days: DEFAULT_LOOKBACK_DAYS,
        }
    }
}

impl VolumeConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            enabled: config.get_bool("volume", "enabled", true),
            min_relative_volume: config.get_double(
                "volume",
                "min_relative_volume",
                DEFAULT_MIN_RELATIVE_VOLUME,
            ),
            lookback_days: config
                .get_int("volume", "lookback_days", DEFAULT_LOOKBACK_DAYS as i64)
                .max(1) as usize,
        }
    }
}

#[derive(Debug, Clone)]
pub struct VolumePillar {
    config: VolumeConfig,
}

impl VolumePillar {
    pub fn new(config: VolumeConfig) -> Self {
        Self { config }
    }

    fn fail(&self, reason: &str) -> PillarResult {
        PillarResult::fail(
            self.name(),
            None,
            Some(self.config.min_relative_volume.into()),
            reason,
        )
    }
}

impl Pillar for VolumePillar {
    fn name(&self) -> &'static str {
        "volume"
    }

    fn evaluate(&self, _symbol: &str, context: &EvaluationContext) -> PillarResult {
        let volume = match context.intraday_volume {
            Some(v) => v,
            None => return self.fail("Intraday volume unavailable"),
        };
        let avg = match context.avg_volume {
            Some(a) if a.is_finite() && a > 0.0 => a,
            _ => return self.fail("Average volume unavailable"),
        };

        let rvol = volume as f64 / avg;
        let min = self.config.min_relative_volume;
        let passed = rvol >= min;
        let reason = if passed {
            format!("RVol {rvol:.1}x meets threshold {min:?}x")
        } else {
            format!("RVol {rvol:.1}x below threshold {min:?}x")
        };

        PillarResult {
            pillar_name: self.name().to_string(),
            passed,
            value: Some(rvol.into()),
            threshold: Some(min.into()),
            reason,
        }
    }
}
