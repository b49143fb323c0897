//! Configuration validation.
//!
//! Runs before any provider is built; every failure here is fatal at startup.

use crate::domain::error::ScanError;
use crate::ports::config_port::ConfigPort;

pub const REQUIRED_PROVIDERS: [&str; 3] = ["market_data", "news", "fundamentals"];

/// One year.
pub const MAX_LOOKBACK_HOURS: i64 = 8_760;
/// One day.
pub const MAX_TTL_SECONDS: i64 = 86_400;

pub fn validate_scanner_config(config: &dyn ConfigPort) -> Result<(), ScanError> {
    validate_providers(config)?;
    validate_price(config)?;
    validate_non_negative(config, "momentum", "min_pct_move")?;
    validate_non_negative(config, "momentum", "min_early_session_rvol")?;
    validate_non_negative(config, "volume", "min_relative_volume")?;
    validate_positive_int(config, "volume", "lookback_days")?;
    validate_positive_int(config, "catalyst", "lookback_hours")?;
    validate_at_most(config, "catalyst", "lookback_hours", MAX_LOOKBACK_HOURS)?;
    validate_non_negative_int(config, "float", "max_shares")?;
    validate_non_negative_int(config, "cache", "ttl_seconds")?;
    validate_at_most(config, "cache", "ttl_seconds", MAX_TTL_SECONDS)?;
    validate_positive_int(config, "scan", "workers")?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: &str) -> ScanError {
    ScanError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.to_string(),
    }
}

fn validate_providers(config: &dyn ConfigPort) -> Result<(), ScanError> {
    for provider in REQUIRED_PROVIDERS {
        if !config.has_section(provider) {
            return Err(ScanError::ConfigMissing {
                section: provider.to_string(),
                key: "type".to_string(),
            });
        }
        match config.get_string(provider, "type") {
            Some(t) if !t.trim().is_empty() => {}
            _ => {
                return Err(ScanError::ConfigMissing {
                    section: provider.to_string(),
                    key: "type".to_string(),
                });
            }
        }
    }
    Ok(())
}

fn validate_price(config: &dyn ConfigPort) -> Result<(), ScanError> {
    validate_non_negative(config, "price", "min")?;
    validate_non_negative(config, "price", "max")?;
    let min = config.get_double("price", "min", 2.0);
    let max = config.get_double("price", "max", 20.0);
    if min > max {
        return Err(invalid("price", "min", "min must not exceed max"));
    }
    Ok(())
}

fn validate_non_negative(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), ScanError> {
    if let Some(raw) = config.get_string(section, key) {
        match raw.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => {}
            Ok(_) => return Err(invalid(section, key, &format!("{key} must be non-negative"))),
            Err(_) => return Err(invalid(section, key, &format!("{key} must be a number"))),
        }
    }
    Ok(())
}

fn parse_int(config: &dyn ConfigPort, section: &str, key: &str) -> Result<Option<i64>, ScanError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(section, key, &format!("{key} must be an integer"))),
    }
}

fn validate_non_negative_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<(), ScanError> {
    match parse_int(config, section, key)? {
        Some(v) if v < 0 => Err(invalid(section, key, &format!("{key} must be non-negative"))),
        _ => Ok(()),
    }
}

fn validate_positive_int(config: &dyn ConfigPort, section: &str, key: &str) -> Result<(), ScanError> {
    match parse_int(config, section, key)? {
        Some(v) if v < 1 => Err(invalid(section, key, &format!("{key} must be at least 1"))),
        _ => Ok(()),
    }
}

fn validate_at_most(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
    max: i64,
) -> Result<(), ScanError> {
    match parse_int(config, section, key)? {
        Some(v) if v > max => Err(invalid(section, key, &format!("{key} must be at most {max}"))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::file_config_adapter::FileConfigAdapter;

    const PROVIDERS: &str = r#"
[market_data]
type = mock

[news]
type = csv
csv_path = news.csv

[fundamentals]
type = csv
csv_path = float.csv
"#;

    fn adapter(extra: &str) -> FileConfigAdapter {
        FileConfigAdapter::from_string(&format!("{PROVIDERS}\n{extra}")).unwrap()
    }

    #[test]
    fn minimal_config_is_valid() {
        assert!(validate_scanner_config(&adapter("")).is_ok());
    }

    #[test]
    fn missing_provider_section() {
        let cfg = FileConfigAdapter::from_string("[market_data]\ntype = mock\n").unwrap();
        let err = validate_scanner_config(&cfg).unwrap_err();
        assert!(matches!(err, ScanError::ConfigMissing { section, .. } if section == "news"));
    }

    #[test]
    fn provider_without_type() {
        let cfg = FileConfigAdapter::from_string(
            "[market_data]\ntype = mock\n[news]\ncsv_path = x\n[fundamentals]\ntype = csv\n",
        )
        .unwrap();
        let err = validate_scanner_config(&cfg).unwrap_err();
        assert!(matches!(err, ScanError::ConfigMissing { section, key } if section == "news" && key == "type"));
    }

    #[test]
    fn inverted_price_range() {
        let err = validate_scanner_config(&adapter("[price]\nmin = 30\nmax = 5\n")).unwrap_err();
        assert!(matches!(err, ScanError::ConfigInvalid { key, .. } if key == "min"));
    }

    #[test]
    fn negative_threshold() {
        let err =
            validate_scanner_config(&adapter("[volume]\nmin_relative_volume = -1\n")).unwrap_err();
        assert!(matches!(err, ScanError::ConfigInvalid { section, .. } if section == "volume"));
    }

    #[test]
    fn non_numeric_threshold() {
        let err = validate_scanner_config(&adapter("[momentum]\nmin_pct_move = lots\n")).unwrap_err();
        assert!(err.to_string().contains("must be a number"));
    }

    #[test]
    fn negative_ttl() {
        let err = validate_scanner_config(&adapter("[cache]\nttl_seconds = -5\n")).unwrap_err();
        assert!(matches!(err, ScanError::ConfigInvalid { section, .. } if section == "cache"));
    }

    #[test]
    fn zero_workers() {
        let err = validate_scanner_config(&adapter("[scan]\nworkers = 0\n")).unwrap_err();
        assert!(matches!(err, ScanError::ConfigInvalid { key, .. } if key == "workers"));
    }

    #[test]
    fn oversized_lookback_hours() {
        let err = validate_scanner_config(&adapter("[catalyst]\nlookback_hours = 1000000000000\n"))
            .unwrap_err();
        assert!(matches!(err, ScanError::ConfigInvalid { key, .. } if key == "lookback_hours"));
        assert!(validate_scanner_config(&adapter("[catalyst]\nlookback_hours = 8760\n")).is_ok());
        assert!(validate_scanner_config(&adapter("[catalyst]\nlookback_hours = 8761\n")).is_err());
    }

    #[test]
    fn oversized_ttl() {
        let err = validate_scanner_config(&adapter("[cache]\nttl_seconds = 9223372036854775807\n"))
            .unwrap_err();
        assert!(matches!(err, ScanError::ConfigInvalid { ref section, .. } if section == "cache"));
        assert!(err.to_string().contains("at most 86400"));
        assert!(validate_scanner_config(&adapter("[cache]\nttl_seconds = 86400\n")).is_ok());
    }
}
