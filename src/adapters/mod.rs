//! Concrete adapter implementations for ports.

pub mod csv_fundamentals_adapter;
pub mod csv_market_data_adapter;
pub mod csv_news_adapter;
pub mod file_config_adapter;
pub mod mock_market_data_adapter;
pub mod provider_factory;
pub mod universe_adapter;
