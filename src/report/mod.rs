//! Reporting utilities: formatted terminal output for a merged bundle.

pub mod format;

pub use format::*;
