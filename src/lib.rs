//! pillarscan — pillar-based momentum stock scanner.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. A symbol is evaluated against
//! independent screening pillars (price, momentum, volume, catalyst, float)
//! and reported with a per-pillar breakdown.

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod logging;
pub mod ports;
