//! News port trait. Powers the catalyst pillar.

use crate::domain::catalyst::Catalyst;
use crate::domain::error::ScanError;

pub trait NewsPort: Send + Sync {
    /// Most recent catalyst within the last `lookback_hours`, if any.
    fn get_recent_catalyst(
        &self,
        symbol: &str,
        lookback_hours: i64,
    ) -> Result<Option<Catalyst>, ScanError>;
}
