//! `fred-overlay` library crate.
//!
//! The binary (`fo`) is a thin wrapper around this library so that:
//!
//! - the alignment/clipping/shading core is testable without spawning processes
//! - the same pipeline serves the line-mode commands and the TUI
//! - code stays easy to navigate as the project grows

pub mod align;
pub mod app;
pub mod axis;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod logging;
pub mod plot;
pub mod report;
pub mod transform;
pub mod tui;
