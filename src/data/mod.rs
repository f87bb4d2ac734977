//! Dataset store and the embedded MSME sample.

pub mod sample;
pub mod store;

pub use sample::*;
pub use store::*;
