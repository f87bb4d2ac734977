//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - dataset records (`CompanyRecord`, `NewsArticle`, `MarketIndex`)
//! - query inputs (`CompanyFilter`, `EngineConfig`)
//! - aggregate outputs (`SectorAggregate`, `RiskBuckets`, `Totals`, etc.)

pub mod types;

pub use types::*;
