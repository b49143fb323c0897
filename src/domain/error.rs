//! Domain error types.

use crate::domain::universe::UniverseError;

/// Top-level error type for pillarscan.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("provider error for {symbol}: {reason}")]
    Provider { symbol: String, reason: String },

    #[error("no data for {symbol}")]
    NoData { symbol: String },

    #[error(transparent)]
    Universe(#[from] UniverseError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub fn provider(symbol: &str, reason: impl Into<String>) -> Self {
        ScanError::Provider {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_config(&self) -> bool {
        matches!(
            self,
            ScanError::ConfigParse { .. }
                | ScanError::ConfigMissing { .. }
                | ScanError::ConfigInvalid { .. }
        )
    }
}

impl From<&ScanError> for std::process::ExitCode {
    fn from(err: &ScanError) -> Self {
        let code: u8 = match err {
            ScanError::Io(_) => 1,
            ScanError::ConfigParse { .. }
            | ScanError::ConfigMissing { .. }
            | ScanError::ConfigInvalid { .. } => 2,
            ScanError::Provider { .. } | ScanError::NoData { .. } => 3,
            ScanError::Universe(_) => 4,
        };
        std::process::ExitCode::from(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_error_message_names_symbol() {
        let err = ScanError::provider("ABC", "timeout");
        assert_eq!(err.to_string(), "provider error for ABC: timeout");
    }

    #[test]
    fn config_errors_are_classified() {
        let err = ScanError::ConfigMissing {
            section: "news".into(),
            key: "type".into(),
        };
        assert!(err.is_config());
        assert_eq!(err.to_string(), "missing config key [news] type");
        assert!(!ScanError::NoData { symbol: "X".into() }.is_config());
    }

    #[test]
    fn universe_error_converts() {
        let err: ScanError = UniverseError::DuplicateSymbol("AAA".into()).into();
        assert!(matches!(err, ScanError::Universe(_)));
        assert_eq!(err.to_string(), "duplicate symbol: AAA");
    }
}
