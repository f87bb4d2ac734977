//! Response payloads and their plain-text rendering.

pub mod format;
pub mod response;

pub use format::*;
pub use response::*;
