//! Alignment of independently-sampled series onto one date axis, and clipping
//! of the merged result to a display window.

pub mod clip;
pub mod merge;

pub use clip::{clip, visible_range};
pub use merge::align;
