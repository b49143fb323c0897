//! Float pillar: public share count must not exceed a ceiling. Missing
//! float data fails.

use crate::domain::context::EvaluationContext;
use crate::domain::pillar::Pillar;
use crate::domain::scan_result::{PillarResult, PillarValue};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_MAX_SHARES: u64 = 20_000_000;

#[derive(Debug, Clone, PartialEq)]
pub struct FloatConfig {
    pub enabled: bool,
    pub max_shares: u64,
}

impl Default for FloatConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_shares: DEFAULT_MAX_SHARES,
        }
    }
}

impl FloatConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            enabled: config.get_bool("float", "enabled", true),
            max_shares: config
                .get_int("float", "max_shares", DEFAULT_MAX_SHARES as i64)
                .max(0) as u64,
        }
    }
}

/// Human-readable share count: `1.5B`, `12.0M`, `750K`, `999`.
pub fn format_shares(shares: u64) -> String {
    let n = shares as f64;
    if shares >= 1_000_000_000 {
        format!("{:.1}B", n / 1e9)
    } else if shares >= 1_000_000 {
        format!("{:.1}M", n / 1e6)
    } else if shares >= 1_000 {
        format!("{:.0}K", n / 1e3)
    } else {
        shares.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct FloatPillar {
    config: FloatConfig,
}

impl FloatPillar {
    pub fn new(config: FloatConfig) -> Self {
        Self { config }
    }

    fn reason(&self, shares: u64, passed: bool) -> String {
        let formatted = format_shares(shares);
        let limit = format_shares(self.config.max_shares);
        if !passed {
            format!("Float {formatted} exceeds maximum {limit}")
        } else if (shares as f64) < self.config.max_shares as f64 / 2.0 {
            format!("Low float {formatted} (excellent) ≤ {limit}")
        } else {
            format!("Float {formatted} within limit ≤ {limit}")
        }
    }
}

impl Pillar for FloatPillar {
    fn name(&self) -> &'static str {
        "float"
    }

    fn evaluate(&self, _symbol: &str, context: &EvaluationContext) -> PillarResult {
        let threshold = PillarValue::Text(format_shares(self.config.max_shares));
        let shares = match context.float_shares {
            Some(s) => s,
            None => {
                return PillarResult::fail(
                    self.name(),
                    None,
                    Some(threshold),
                    "Float data unavailable - excluded by default",
                );
            }
        };

        let passed = shares <= self.config.max_shares;
        PillarResult {
            pillar_name: self.name().to_string(),
            passed,
            value: Some(shares.into()),
            threshold: Some(threshold),
            reason: self.reason(shares, passed),
        }
    }
}
