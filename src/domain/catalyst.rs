//! News catalyst records.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A dated news event for a symbol. `catalyst_type` is stored lowercase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalyst {
    pub symbol: String,
    pub headline: String,
    pub catalyst_type: String,
    pub timestamp: DateTime<Utc>,
    pub source: Option<String>,
}

impl Catalyst {
    pub fn new(
        symbol: &str,
        headline: &str,
        catalyst_type: &str,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            symbol: symbol.to_uppercase(),
            headline: headline.to_string(),
            catalyst_type: catalyst_type.trim().to_lowercase(),
            timestamp,
            source: None,
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = Some(source.to_string());
        self
    }
}
