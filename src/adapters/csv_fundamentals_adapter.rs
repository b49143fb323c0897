//! CSV float data: `symbol,float_shares`. A blank share count means the
//! float is unknown for that symbol.

use crate::domain::error::ScanError;
use crate::domain::universe::normalize_symbol;
use crate::ports::fundamentals_port::FundamentalsPort;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Deserialize)]
struct FloatRow {
    symbol: String,
    float_shares: Option<String>,
}

fn parse_shares(raw: &str) -> Option<u64> {
    let raw = raw.trim().replace(',', "");
    raw.parse::<u64>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(|v| v as u64)
    })
}

#[derive(Debug, Default)]
pub struct CsvFundamentalsAdapter {
    floats: HashMap<String, u64>,
}

impl CsvFundamentalsAdapter {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScanError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!(path = %path.display(), "float data CSV not found");
            return Ok(Self::default());
        }

        let mut rdr = csv::Reader::from_path(path).map_err(|e| {
            ScanError::provider("fundamentals", format!("failed to read {}: {}", path.display(), e))
        })?;

        let mut floats = HashMap::new();
        for row in rdr.deserialize::<FloatRow>() {
            let row = row.map_err(|e| {
                ScanError::provider("fundamentals", format!("CSV parse error: {}", e))
            })?;
            let raw = match row.float_shares.as_deref().map(str::trim) {
                Some(raw) if !raw.is_empty() => raw,
                _ => continue,
            };
            match parse_shares(raw) {
                Some(shares) => {
                    floats.insert(normalize_symbol(&row.symbol), shares);
                }
                None => warn!(symbol = %row.symbol, value = raw, "skipping unparseable float"),
            }
        }

        info!(symbols = floats.len(), "loaded float data");
        Ok(Self { floats })
    }
}

impl FundamentalsPort for CsvFundamentalsAdapter {
    fn get_float_shares(&self, symbol: &str) -> Result<Option<u64>, ScanError> {
        Ok(self.floats.get(&normalize_symbol(symbol)).copied())
    }
}
