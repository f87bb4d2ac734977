//! Input/output helpers.
//!
//! - CSV/JSON exports (`export`)
//! - chat transcripts (`transcript`)

pub mod export;
pub mod transcript;

pub use export::*;
pub use transcript::*;
