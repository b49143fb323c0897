//! Universe port trait: which symbols a scan cycle considers.

use crate::domain::error::ScanError;

pub trait UniversePort: Send + Sync {
    /// Symbols in scan order, uppercased.
    fn get_universe(&self) -> Vec<String>;

    /// Reload the symbol list from its source.
    fn refresh(&self) -> Result<(), ScanError>;
}
