//! Output formatting for the `hm` binary.

pub mod format;

pub use format::*;
