//! Builds the provider bundle from the `[market_data]`, `[news]`,
//! `[fundamentals]` and `[universe]` config sections.

use crate::adapters::csv_fundamentals_adapter::CsvFundamentalsAdapter;
use crate::adapters::csv_market_data_adapter::CsvMarketDataAdapter;
use crate::adapters::csv_news_adapter::CsvNewsAdapter;
use crate::adapters::mock_market_data_adapter::MockMarketDataAdapter;
use crate::adapters::universe_adapter::{CsvUniverseAdapter, StaticUniverseAdapter};
use crate::domain::clock::Clock;
use crate::domain::error::ScanError;
use crate::ports::config_port::ConfigPort;
use crate::ports::fundamentals_port::FundamentalsPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::news_port::NewsPort;
use crate::ports::provider_bundle::ProviderBundle;
use crate::ports::universe_port::UniversePort;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

pub const DEFAULT_UNIVERSE_PROVIDER: &str = "csv";
pub const DEFAULT_UNIVERSE_PATH: &str = "data/universe.csv";

fn unknown_type(section: &str, key: &str, value: &str) -> ScanError {
    ScanError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("unknown {} provider type: {}", section, value),
    }
}

fn required(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, ScanError> {
    config
        .get_string(section, key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ScanError::ConfigMissing {
            section: section.to_string(),
            key: key.to_string(),
        })
}

pub fn create_market_data(config: &dyn ConfigPort) -> Result<Arc<dyn MarketDataPort>, ScanError> {
    let provider_type = required(config, "market_data", "type")?;
    match provider_type.to_lowercase().as_str() {
        "csv" => {
            let path = required(config, "market_data", "path")?;
            Ok(Arc::new(CsvMarketDataAdapter::new(PathBuf::from(path))?))
        }
        "mock" => {
            warn!("mock market data has no presets; every symbol will be skipped");
            Ok(Arc::new(MockMarketDataAdapter::new()))
        }
        other => Err(unknown_type("market_data", "type", other)),
    }
}

pub fn create_news(
    config: &dyn ConfigPort,
    clock: Arc<dyn Clock>,
) -> Result<Arc<dyn NewsPort>, ScanError> {
    let provider_type = required(config, "news", "type")?;
    match provider_type.to_lowercase().as_str() {
        "csv" => {
            let path = required(config, "news", "csv_path")?;
            Ok(Arc::new(CsvNewsAdapter::from_path(path, clock)?))
        }
        other => Err(unknown_type("news", "type", other)),
    }
}

pub fn create_fundamentals(
    config: &dyn ConfigPort,
) -> Result<Arc<dyn FundamentalsPort>, ScanError> {
    let provider_type = required(config, "fundamentals", "type")?;
    match provider_type.to_lowercase().as_str() {
        "csv" => {
            let path = required(config, "fundamentals", "csv_path")?;
            Ok(Arc::new(CsvFundamentalsAdapter::from_path(path)?))
        }
        other => Err(unknown_type("fundamentals", "type", other)),
    }
}

pub fn create_universe(config: &dyn ConfigPort) -> Result<Arc<dyn UniversePort>, ScanError> {
    let provider = config
        .get_string("universe", "provider")
        .map(|v| v.trim().to_lowercase())
        .unwrap_or_else(|| DEFAULT_UNIVERSE_PROVIDER.to_string());
    match provider.as_str() {
        "csv" => {
            let path = config
                .get_string("universe", "csv_path")
                .unwrap_or_else(|| DEFAULT_UNIVERSE_PATH.to_string());
            Ok(Arc::new(CsvUniverseAdapter::new(PathBuf::from(path))?))
        }
        "static" => {
            let symbols = required(config, "universe", "symbols")?;
            Ok(Arc::new(StaticUniverseAdapter::parse(&symbols)?))
        }
        other => Err(unknown_type("universe", "provider", other)),
    }
}

pub fn build_provider_bundle(
    config: &dyn ConfigPort,
    clock: Arc<dyn Clock>,
) -> Result<ProviderBundle, ScanError> {
    info!("creating provider bundle from config");
    Ok(ProviderBundle {
        market_data: create_market_data(config)?,
        news: create_news(config, clock)?,
        fundamentals: create_fundamentals(config)?,
        universe: create_universe(config)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;
    use crate::domain::clock::SystemClock;
    use std::fs;
    use tempfile::TempDir;

    fn clock() -> Arc<dyn Clock> {
        Arc::new(SystemClock)
    }

    fn config(content: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(content).unwrap()
    }

    #[test]
    fn builds_csv_bundle() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        fs::write(root.join("quotes.csv"), "symbol,last_price,intraday_volume\n").unwrap();
        fs::write(root.join("news.csv"), "symbol,headline,catalyst_type,timestamp\n").unwrap();
        fs::write(root.join("float.csv"), "symbol,float_shares\nABC,100\n").unwrap();
        fs::write(root.join("universe.csv"), "symbol\nabc\ndef\n").unwrap();

        let ini = format!(
            "[market_data]\ntype = csv\npath = {r}\n\
             [news]\ntype = csv\ncsv_path = {r}/news.csv\n\
             [fundamentals]\ntype = CSV\ncsv_path = {r}/float.csv\n\
             [universe]\nprovider = csv\ncsv_path = {r}/universe.csv\n",
            r = root.display()
        );
        let bundle = build_provider_bundle(&config(&ini), clock()).unwrap();
        assert_eq!(bundle.universe.get_universe(), vec!["ABC", "DEF"]);
        assert_eq!(bundle.fundamentals.get_float_shares("abc").unwrap(), Some(100));
        assert!(bundle.news.get_recent_catalyst("ABC", 24).unwrap().is_none());
    }

    #[test]
    fn static_universe_from_config() {
        let cfg = config("[universe]\nprovider = static\nsymbols = gme, amc\n");
        let universe = create_universe(&cfg).unwrap();
        assert_eq!(universe.get_universe(), vec!["GME", "AMC"]);
    }

    #[test]
    fn unknown_types_are_config_errors() {
        let err = create_market_data(&config("[market_data]\ntype = ibkr\n"))
            .err()
            .unwrap();
        assert!(err.is_config());
        assert!(err.to_string().contains("ibkr"));

        let err = create_news(&config("[news]\ntype = rss\n"), clock())
            .err()
            .unwrap();
        assert!(err.is_config());

        let err = create_universe(&config("[universe]\nprovider = ftp\n"))
            .err()
            .unwrap();
        assert!(err.is_config());
    }

    #[test]
    fn csv_market_data_requires_path() {
        let err = create_market_data(&config("[market_data]\ntype = csv\n"))
            .err()
            .unwrap();
        assert!(matches!(err, ScanError::ConfigMissing { key, .. } if key == "path"));
    }

    #[test]
    fn mock_market_data_is_accepted() {
        let md = create_market_data(&config("[market_data]\ntype = mock\n")).unwrap();
        assert!(md.get_last_price("ABC").is_err());
    }
}
