//! Outcome records produced by a scan.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// A measured value or threshold attached to a pillar outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PillarValue {
    Number(f64),
    Text(String),
}

impl PillarValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            PillarValue::Number(n) => Some(*n),
            PillarValue::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            PillarValue::Number(_) => None,
            PillarValue::Text(s) => Some(s),
        }
    }
}

impl From<f64> for PillarValue {
    fn from(value: f64) -> Self {
        PillarValue::Number(value)
    }
}

impl From<u64> for PillarValue {
    fn from(value: u64) -> Self {
        PillarValue::Number(value as f64)
    }
}

impl From<String> for PillarValue {
    fn from(value: String) -> Self {
        PillarValue::Text(value)
    }
}

impl From<&str> for PillarValue {
    fn from(value: &str) -> Self {
        PillarValue::Text(value.to_string())
    }
}

impl fmt::Display for PillarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PillarValue::Number(n) => write!(f, "{n}"),
            PillarValue::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Result of evaluating one pillar against one symbol.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PillarResult {
    pub pillar_name: String,
    pub passed: bool,
    pub value: Option<PillarValue>,
    pub threshold: Option<PillarValue>,
    pub reason: String,
}

impl PillarResult {
    pub fn pass(
        pillar_name: &str,
        value: impl Into<PillarValue>,
        threshold: Option<PillarValue>,
        reason: String,
    ) -> Self {
        Self {
            pillar_name: pillar_name.to_string(),
            passed: true,
            value: Some(value.into()),
            threshold,
            reason,
        }
    }

    pub fn fail(
        pillar_name: &str,
        value: Option<PillarValue>,
        threshold: Option<PillarValue>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            pillar_name: pillar_name.to_string(),
            passed: false,
            value,
            threshold,
            reason: reason.into(),
        }
    }
}

/// The full evaluation of one symbol.
///
/// `passed_pillars` and `failed_pillars` partition the enabled pillar
/// names in evaluation order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanResult {
    pub symbol: String,
    pub price: f64,
    pub pct_change: f64,
    pub relative_volume: f64,
    pub float_shares: Option<u64>,
    pub catalyst: Option<String>,
    pub passed_pillars: Vec<String>,
    pub failed_pillars: Vec<String>,
    pub pillar_details: BTreeMap<String, PillarResult>,
    pub timestamp: DateTime<Utc>,
}

impl ScanResult {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: String,
        price: f64,
        pct_change: f64,
        relative_volume: f64,
        float_shares: Option<u64>,
        catalyst: Option<String>,
        details: Vec<PillarResult>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let mut passed_pillars = Vec::new();
        let mut failed_pillars = Vec::new();
        let mut pillar_details = BTreeMap::new();
        for result in details {
            if result.passed {
                passed_pillars.push(result.pillar_name.clone());
            } else {
                failed_pillars.push(result.pillar_name.clone());
            }
            pillar_details.insert(result.pillar_name.clone(), result);
        }
        Self {
            symbol,
            price,
            pct_change,
            relative_volume,
            float_shares,
            catalyst,
            passed_pillars,
            failed_pillars,
            pillar_details,
            timestamp,
        }
    }

    /// True when every enabled pillar passed.
    pub fn passed_all(&self) -> bool {
        self.failed_pillars.is_empty()
    }

    pub fn detail(&self, pillar_name: &str) -> Option<&PillarResult> {
        self.pillar_details.get(pillar_name)
    }
}

/// JSON shape of a result: the result's fields plus its `passed_all` verdict.
#[derive(Debug, Serialize)]
pub struct ScanResultView<'a> {
    pub passed_all: bool,
    #[serde(flatten)]
    pub result: &'a ScanResult,
}

impl<'a> From<&'a ScanResult> for ScanResultView<'a> {
    fn from(result: &'a ScanResult) -> Self {
        Self {
            passed_all: result.passed_all(),
            result,
        }
    }
}
