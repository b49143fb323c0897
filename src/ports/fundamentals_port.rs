//! Fundamentals port trait. Powers the float pillar.

use crate::domain::error::ScanError;

pub trait FundamentalsPort: Send + Sync {
    fn get_float_shares(&self, symbol: &str) -> Result<Option<u64>, ScanError>;
}
