//! Pillar evaluators: independent pass/fail screening rules.
//!
//! Each pillar reads an [`EvaluationContext`] and returns a [`PillarResult`].
//! Evaluation is pure and infallible: missing data is a failing result with
//! a reason, never an error. No pillar sees another pillar's outcome.

pub mod catalyst;
pub mod float;
pub mod momentum;
pub mod price;
pub mod volume;

use crate::domain::context::EvaluationContext;
use crate::domain::scan_result::PillarResult;
use crate::domain::scanner_config::ScannerConfig;
use std::fmt;

pub use catalyst::{CatalystConfig, CatalystPillar};
pub use float::{FloatConfig, FloatPillar, format_shares};
pub use momentum::{MomentumConfig, MomentumPillar};
pub use price::{PriceConfig, PricePillar};
pub use volume::{VolumeConfig, VolumePillar};

pub trait Pillar: Send + Sync {
    fn name(&self) -> &'static str;

    fn evaluate(&self, symbol: &str, context: &EvaluationContext) -> PillarResult;
}

/// The pillar registry, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PillarKind {
    Price,
    Momentum,
    Volume,
    Catalyst,
    Float,
}

impl PillarKind {
    pub const ALL: [PillarKind; 5] = [
        PillarKind::Price,
        PillarKind::Momentum,
        PillarKind::Volume,
        PillarKind::Catalyst,
        PillarKind::Float,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PillarKind::Price => "price",
            PillarKind::Momentum => "momentum",
            PillarKind::Volume => "volume",
            PillarKind::Catalyst => "catalyst",
            PillarKind::Float => "float",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name.trim()))
    }

    pub fn is_enabled(self, config: &ScannerConfig) -> bool {
        match self {
            PillarKind::Price => config.price.enabled,
            PillarKind::Momentum => config.momentum.enabled,
            PillarKind::Volume => config.volume.enabled,
            PillarKind::Catalyst => config.catalyst.enabled,
            PillarKind::Float => config.float.enabled,
        }
    }

    pub fn build(self, config: &ScannerConfig) -> Box<dyn Pillar> {
        match self {
            PillarKind::Price => Box::new(PricePillar::new(config.price.clone())),
            PillarKind::Momentum => Box::new(MomentumPillar::new(config.momentum.clone())),
            PillarKind::Volume => Box::new(VolumePillar::new(config.volume.clone())),
            PillarKind::Catalyst => Box::new(CatalystPillar::new(config.catalyst.clone())),
            PillarKind::Float => Box::new(FloatPillar::new(config.float.clone())),
        }
    }
}

impl fmt::Display for PillarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Instantiate every enabled pillar in registry order.
pub fn build_pillars(config: &ScannerConfig) -> Vec<Box<dyn Pillar>> {
    PillarKind::ALL
        .into_iter()
        .filter(|kind| {
            let enabled = kind.is_enabled(config);
            if !enabled {
                tracing::info!(pillar = kind.name(), "pillar disabled");
            }
            enabled
        })
        .map(|kind| kind.build(config))
        .collect()
}
