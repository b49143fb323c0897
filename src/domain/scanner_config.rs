//! Scanner settings assembled from configuration, with defaults for every
//! absent key.

use crate::domain::pillar::{CatalystConfig, FloatConfig, MomentumConfig, PriceConfig, VolumeConfig};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_TTL_SECONDS: i64 = 5;
pub const DEFAULT_WORKERS: usize = 1;

#[derive(Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    pub price: PriceConfig,
    pub momentum: MomentumConfig,
    pub volume: VolumeConfig,
    pub catalyst: CatalystConfig,
    pub float: FloatConfig,
    /// Results cache time-to-live.
    pub ttl_seconds: i64,
    /// Worker threads for concurrent scans.
    pub workers: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            price: PriceConfig::default(),
            momentum: MomentumConfig::default(),
            volume: VolumeConfig::default(),
            catalyst: CatalystConfig::default(),
            float: FloatConfig::default(),
            ttl_seconds: DEFAULT_TTL_SECONDS,
            workers: DEFAULT_WORKERS,
        }
    }
}

impl ScannerConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            price: PriceConfig::from_config(config),
            momentum: MomentumConfig::from_config(config),
            volume: VolumeConfig::from_config(config),
            catalyst: CatalystConfig::from_config(config),
            float: FloatConfig::from_config(config),
            ttl_seconds: config
                .get_int("cache", "ttl_seconds", DEFAULT_TTL_SECONDS)
                .max(0),
            workers: config.get_int("scan", "workers", DEFAULT_WORKERS as i64).max(1) as usize,
        }
    }

    /// Names of the enabled pillars in evaluation order.
    pub fn enabled_pillars(&self) -> Vec<&'static str> {
        crate::domain::pillar::PillarKind::ALL
            .into_iter()
            .filter(|kind| kind.is_enabled(self))
            .map(|kind| kind.name())
            .collect()
    }
}
