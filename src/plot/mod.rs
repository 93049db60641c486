//! Terminal plotting helpers.

pub mod ascii;

pub use ascii::render_overlay_plot;
