//! The set of providers a scanner is built from.

use crate::ports::fundamentals_port::FundamentalsPort;
use crate::ports::market_data_port::MarketDataPort;
use crate::ports::news_port::NewsPort;
use crate::ports::universe_port::UniversePort;
use std::sync::Arc;

#[derive(Clone)]
pub struct ProviderBundle {
    pub market_data: Arc<dyn MarketDataPort>,
    pub news: Arc<dyn NewsPort>,
    pub fundamentals: Arc<dyn FundamentalsPort>,
    pub universe: Arc<dyn UniversePort>,
}
