//! Catalyst pillar: the symbol must have a recent news event of a
//! recognized type.

use crate::domain::context::EvaluationContext;
use crate::domain::pillar::Pillar;
use crate::domain::scan_result::{PillarResult, PillarValue};
use crate::ports::config_port::ConfigPort;
use std::collections::BTreeSet;

pub const DEFAULT_ALLOWED_TYPES: [&str; 5] = ["earnings", "fda", "mna", "contracts", "guidance"];

/// Never valid catalysts, whatever `allowed_types` says.
pub const EXCLUDED_TYPES: [&str; 4] = ["rumor", "sympathy", "social", "technical"];

pub const DEFAULT_LOOKBACK_HOURS: i64 = 24;

const HEADLINE_PREVIEW_CHARS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalystConfig {
    pub enabled: bool,
    /// Policy-reserved. A missing catalyst fails regardless of this value.
    pub require_news: bool,
    pub lookback_hours: i64,
    pub allowed_types: BTreeSet<String>,
}

impl Default for CatalystConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            require_news: true,
            lookback_hours: DEFAULT_LOOKBACK_HOURS,
            allowed_types: DEFAULT_ALLOWED_TYPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CatalystConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        let defaults = Self::default();
        Self {
            enabled: config.get_bool("catalyst", "enabled", true),
            require_news: config.get_bool("catalyst", "require_news", true),
            lookback_hours: config
                .get_int("catalyst", "lookback_hours", DEFAULT_LOOKBACK_HOURS)
                .max(1),
            allowed_types: config
                .get_list("catalyst", "allowed_types")
                .map(|types| types.into_iter().collect())
                .unwrap_or(defaults.allowed_types),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatalystPillar {
    config: CatalystConfig,
}

impl CatalystPillar {
    pub fn new(config: CatalystConfig) -> Self {
        if !config.require_news {
            tracing::warn!(
                "catalyst.require_news=false is reserved; symbols without news still fail"
            );
        }
        Self { config }
    }

    fn allowed_text(&self) -> PillarValue {
        let types: Vec<&str> = self.config.allowed_types.iter().map(String::as_str).collect();
        PillarValue::Text(types.join(","))
    }
}

impl Pillar for CatalystPillar {
    fn name(&self) -> &'static str {
        "catalyst"
    }

    fn evaluate(&self, _symbol: &str, context: &EvaluationContext) -> PillarResult {
        let catalyst = match &context.catalyst {
            Some(c) => c,
            None => {
                return PillarResult::fail(
                    self.name(),
                    None,
                    Some("requires news".into()),
                    "No catalyst found - rejected (require_news=true)",
                );
            }
        };

        let catalyst_type = catalyst.catalyst_type.trim().to_lowercase();

        if EXCLUDED_TYPES.contains(&catalyst_type.as_str()) {
            return PillarResult::fail(
                self.name(),
                Some(catalyst_type.clone().into()),
                Some(self.allowed_text()),
                format!("Catalyst type '{catalyst_type}' is explicitly excluded"),
            );
        }

        if !self.config.allowed_types.contains(&catalyst_type) {
            return PillarResult::fail(
                self.name(),
                Some(catalyst_type.clone().into()),
                Some(self.allowed_text()),
                format!("Catalyst type '{catalyst_type}' not in allowed list"),
            );
        }

        let preview: String = catalyst
            .headline
            .chars()
            .take(HEADLINE_PREVIEW_CHARS)
            .collect();
        let reason = format!("Valid catalyst: {catalyst_type} - {preview}...");
        PillarResult::pass(self.name(), catalyst_type, Some(self.allowed_text()), reason)
    }
}
