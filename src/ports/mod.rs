//! Port traits: the narrow interfaces the scanner core depends on.

pub mod config_port;
pub mod fundamentals_port;
pub mod market_data_port;
pub mod news_port;
pub mod provider_bundle;
pub mod universe_port;
