//! Query engine: filters, aggregates, and the intent router.
//!
//! Everything here is a pure function over borrowed records; the dataset is
//! never mutated and nothing is memoised.

pub mod aggregate;
pub mod filter;
pub mod intent;

pub use aggregate::*;
pub use filter::*;
pub use intent::*;
