//! Price range pillar.

use crate::domain::context::EvaluationContext;
use crate::domain::pillar::Pillar;
use crate::domain::scan_result::{PillarResult, PillarValue};
use crate::ports::config_port::ConfigPort;

pub const DEFAULT_MIN_PRICE: f64 = 2.0;
pub const DEFAULT_MAX_PRICE: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceConfig {
    pub enabled: bool,
    pub min: f64,
    pub max: f64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min: DEFAULT_MIN_PRICE,
            max: DEFAULT_MAX_PRICE,
        }
    }
}

impl PriceConfig {
    pub fn from_config(config: &dyn ConfigPort) -> Self {
        Self {
            enabled: config.get_bool("price", "enabled", true),
            min: config.get_double("price", "min", DEFAULT_MIN_PRICE),
            max: config.get_double("price", "max", DEFAULT_MAX_PRICE),
        }
    }
}

/// Passes when `min <= price <= max`.
#[derive(Debug, Clone)]
pub struct PricePillar {
    config: PriceConfig,
}

impl PricePillar {
    pub fn new(config: PriceConfig) -> Self {
        Self { config }
    }

    fn threshold(&self) -> PillarValue {
        PillarValue::Text(format!("{:?}-{:?}", self.config.min, self.config.max))
    }

    fn reason(&self, price: f64, passed: bool) -> String {
        let (min, max) = (self.config.min, self.config.max);
        if passed {
            format!("Price ${price:.2} within range ${min:.2}-${max:.2}")
        } else if price < min {
            format!("Price ${price:.2} below minimum ${min:.2}")
        } else {
            format!("Price ${price:.2} above maximum ${max:.2}")
        }
    }
}

impl Pillar for PricePillar {
    fn name(&self) -> &'static str {
        "price"
    }

    fn evaluate(&self, _symbol: &str, context: &EvaluationContext) -> PillarResult {
        let price = match context.price.filter(|p| p.is_finite()) {
            Some(p) => p,
            None => {
                return PillarResult::fail(
                    self.name(),
                    None,
                    Some(self.threshold()),
                    "Price data unavailable",
                );
            }
        };

        let passed = self.config.min <= price && price <= self.config.max;
        PillarResult {
            pillar_name: self.name().to_string(),
            passed,
            value: Some(price.into()),
            threshold: Some(self.threshold()),
            reason: self.reason(price, passed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn pillar() -> PricePillar {
        PricePillar::new(PriceConfig::default())
    }

    fn with_price(price: Option<f64>) -> EvaluationContext {
        let mut ctx = EvaluationContext::empty(Utc::now());
        ctx.price = price;
        ctx
    }

    #[test]
    fn within_range_passes() {
        let result = pillar().evaluate("TEST", &with_price(Some(10.0)));
        assert!(result.passed);
        assert_eq!(result.value, Some(PillarValue::Number(10.0)));
        assert_eq!(result.reason, "Price $10.00 within range $2.00-$20.00");
    }

    #[test]
    fn below_min_fails() {
        let result = pillar().evaluate("TEST", &with_price(Some(1.5)));
        assert!(!result.passed);
        assert!(result.reason.contains("below minimum"));
    }

    #[test]
    fn above_max_fails() {
        let result = pillar().evaluate("TEST", &with_price(Some(25.0)));
        assert!(!result.passed);
        assert!(result.reason.contains("above maximum"));
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(pillar().evaluate("TEST", &with_price(Some(2.0))).passed);
        assert!(pillar().evaluate("TEST", &with_price(Some(20.0))).passed);
    }

    #[test]
    fn missing_price_fails() {
        let result = pillar().evaluate("TEST", &with_price(None));
        assert!(!result.passed);
        assert!(result.value.is_none());
        assert!(result.reason.contains("unavailable"));
    }

    #[test]
    fn non_finite_price_treated_as_missing() {
        let result = pillar().evaluate("TEST", &with_price(Some(f64::NAN)));
        assert!(!result.passed);
        assert_eq!(result.reason, "Price data unavailable");
    }

    #[test]
    fn threshold_text_shows_bounds() {
        let result = pillar().evaluate("TEST", &with_price(Some(5.0)));
        assert_eq!(result.threshold, Some(PillarValue::Text("2.0-20.0".into())));
    }
}
