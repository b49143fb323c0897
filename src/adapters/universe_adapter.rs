//! Universe sources: a CSV file with a `symbol` column, or a fixed list
//! from configuration.

use crate::domain::error::ScanError;
use crate::domain::universe::{normalize_symbol, parse_symbols};
use crate::ports::universe_port::UniversePort;
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use tracing::{error, info, warn};

pub struct CsvUniverseAdapter {
    csv_path: PathBuf,
    symbols: RwLock<Vec<String>>,
}

impl CsvUniverseAdapter {
    /// Loads immediately. A missing file yields an empty universe.
    pub fn new(csv_path: PathBuf) -> Result<Self, ScanError> {
        let adapter = Self {
            csv_path,
            symbols: RwLock::new(Vec::new()),
        };
        adapter.refresh()?;
        Ok(adapter)
    }

    fn load(&self) -> Result<Vec<String>, ScanError> {
        if !self.csv_path.exists() {
            warn!(path = %self.csv_path.display(), "universe CSV not found");
            return Ok(Vec::new());
        }

        let mut rdr = csv::Reader::from_path(&self.csv_path).map_err(|e| {
            ScanError::provider(
                "universe",
                format!("failed to read {}: {}", self.csv_path.display(), e),
            )
        })?;
        let headers = rdr
            .headers()
            .map_err(|e| ScanError::provider("universe", format!("CSV parse error: {}", e)))?;
        let Some(column) = headers.iter().position(|h| h.trim() == "symbol") else {
            error!(path = %self.csv_path.display(), "universe CSV missing 'symbol' column");
            return Ok(Vec::new());
        };

        let mut symbols = Vec::new();
        for record in rdr.records() {
            let record = record
                .map_err(|e| ScanError::provider("universe", format!("CSV parse error: {}", e)))?;
            let symbol = record.get(column).map(normalize_symbol).unwrap_or_default();
            if !symbol.is_empty() {
                symbols.push(symbol);
            }
        }
        Ok(symbols)
    }
}

impl UniversePort for CsvUniverseAdapter {
    fn get_universe(&self) -> Vec<String> {
        self.symbols
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn refresh(&self) -> Result<(), ScanError> {
        let symbols = self.load()?;
        info!(
            count = symbols.len(),
            path = %self.csv_path.display(),
            "loaded universe"
        );
        *self.symbols.write().unwrap_or_else(PoisonError::into_inner) = symbols;
        Ok(())
    }
}

/// A fixed symbol list, e.g. `symbols = AAPL, TSLA` under `[universe]`.
#[derive(Debug, Clone, Default)]
pub struct StaticUniverseAdapter {
    symbols: Vec<String>,
}

impl StaticUniverseAdapter {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols: symbols.iter().map(|s| normalize_symbol(s)).collect(),
        }
    }

    pub fn parse(list: &str) -> Result<Self, ScanError> {
        Ok(Self {
            symbols: parse_symbols(list)?,
        })
    }
}

impl UniversePort for StaticUniverseAdapter {
    fn get_universe(&self) -> Vec<String> {
        self.symbols.clone()
    }

    fn refresh(&self) -> Result<(), ScanError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn csv_universe_uppercases_and_drops_blanks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("universe.csv");
        fs::write(&path, "symbol,name\naapl,Apple\n,Blank\n tsla ,Tesla\n").unwrap();

        let adapter = CsvUniverseAdapter::new(path).unwrap();
        assert_eq!(adapter.get_universe(), vec!["AAPL", "TSLA"]);
    }

    #[test]
    fn csv_universe_refresh_reloads() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("universe.csv");
        fs::write(&path, "symbol\nAAPL\n").unwrap();
        let adapter = CsvUniverseAdapter::new(path.clone()).unwrap();
        assert_eq!(adapter.get_universe(), vec!["AAPL"]);

        fs::write(&path, "symbol\nGME\nAMC\n").unwrap();
        adapter.refresh().unwrap();
        assert_eq!(adapter.get_universe(), vec!["GME", "AMC"]);
    }

    #[test]
    fn missing_file_is_empty_universe() {
        let adapter = CsvUniverseAdapter::new(PathBuf::from("/nonexistent/universe.csv")).unwrap();
        assert!(adapter.get_universe().is_empty());
    }

    #[test]
    fn missing_symbol_column_is_empty_universe() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("universe.csv");
        fs::write(&path, "ticker\nAAPL\n").unwrap();
        let adapter = CsvUniverseAdapter::new(path).unwrap();
        assert!(adapter.get_universe().is_empty());
    }

    #[test]
    fn static_universe_parses_list() {
        let adapter = StaticUniverseAdapter::parse("aapl, tsla").unwrap();
        assert_eq!(adapter.get_universe(), vec!["AAPL", "TSLA"]);
        assert!(StaticUniverseAdapter::parse("AAPL,,TSLA").is_err());
        assert!(matches!(
            StaticUniverseAdapter::parse("AAPL,aapl"),
            Err(ScanError::Universe(_))
        ));
    }
}
