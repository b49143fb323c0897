//! Core domain types and logic.

pub mod cache;
pub mod catalyst;
pub mod clock;
pub mod config_validation;
pub mod context;
pub mod error;
pub mod pillar;
pub mod scan_result;
pub mod scanner;
pub mod scanner_config;
pub mod session;
pub mod universe;
