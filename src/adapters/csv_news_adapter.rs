//! CSV catalyst feed: `symbol,headline,catalyst_type,timestamp[,source]`.
//!
//! Timestamps are RFC 3339, or `YYYY-MM-DD HH:MM:SS` read as UTC. A missing
//! file is an empty feed; unparseable rows are skipped with a warning.

use crate::domain::catalyst::Catalyst;
use crate::domain::clock::Clock;
use crate::domain::error::ScanError;
use crate::domain::universe::normalize_symbol;
use crate::ports::news_port::NewsPort;
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

const REQUIRED_COLUMNS: [&str; 4] = ["symbol", "headline", "catalyst_type", "timestamp"];

#[derive(Debug, Deserialize)]
struct NewsRow {
    symbol: String,
    headline: String,
    catalyst_type: String,
    timestamp: String,
    #[serde(default)]
    source: Option<String>,
}

pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

pub struct CsvNewsAdapter {
    catalysts: HashMap<String, Vec<Catalyst>>,
    clock: Arc<dyn Clock>,
}

impl CsvNewsAdapter {
    pub fn from_path<P: AsRef<Path>>(path: P, clock: Arc<dyn Clock>) -> Result<Self, ScanError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "catalyst CSV not found");
            return Ok(Self::from_catalysts(Vec::new(), clock));
        }

        let mut rdr = csv::Reader::from_path(path)
            .map_err(|e| ScanError::provider("news", format!("failed to read {}: {}", path.display(), e)))?;

        let headers = rdr
            .headers()
            .map_err(|e| ScanError::provider("news", format!("CSV parse error: {}", e)))?
            .clone();
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !headers.iter().any(|h| h.trim() == **col))
        {
            error!(path = %path.display(), column = *missing, "catalyst CSV missing required column");
            return Ok(Self::from_catalysts(Vec::new(), clock));
        }

        let mut catalysts = Vec::new();
        for (line, row) in rdr.deserialize::<NewsRow>().enumerate() {
            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    warn!(line = line + 2, error = %e, "skipping malformed catalyst row");
                    continue;
                }
            };
            let Some(timestamp) = parse_timestamp(&row.timestamp) else {
                warn!(line = line + 2, timestamp = %row.timestamp, "skipping catalyst with bad timestamp");
                continue;
            };
            let source = row
                .source
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or("csv");
            catalysts.push(
                Catalyst::new(&row.symbol, &row.headline, &row.catalyst_type, timestamp)
                    .with_source(source),
            );
        }

        let adapter = Self::from_catalysts(catalysts, clock);
        info!(symbols = adapter.catalysts.len(), "loaded catalysts");
        Ok(adapter)
    }

    pub fn from_catalysts(catalysts: Vec<Catalyst>, clock: Arc<dyn Clock>) -> Self {
        let mut by_symbol: HashMap<String, Vec<Catalyst>> = HashMap::new();
        for catalyst in catalysts {
            by_symbol
                .entry(normalize_symbol(&catalyst.symbol))
                .or_default()
                .push(catalyst);
        }
        Self {
            catalysts: by_symbol,
            clock,
        }
    }
}

impl NewsPort for CsvNewsAdapter {
    fn get_recent_catalyst(
        &self,
        symbol: &str,
        lookback_hours: i64,
    ) -> Result<Option<Catalyst>, ScanError> {
        let Some(catalysts) = self.catalysts.get(&normalize_symbol(symbol)) else {
            return Ok(None);
        };
        // A window reaching past the earliest representable time covers everything.
        let cutoff = Duration::try_hours(lookback_hours.max(0))
            .and_then(|window| self.clock.now().checked_sub_signed(window))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Ok(catalysts
            .iter()
            .filter(|c| c.timestamp >= cutoff)
            .max_by_key(|c| c.timestamp)
            .cloned())
    }
}
