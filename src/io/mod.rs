//! Input/output helpers.
//!
//! - bundle exports (CSV/JSON) (`export`)

pub mod export;

pub use export::*;
