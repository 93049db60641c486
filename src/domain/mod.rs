//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - provider-facing observations (`RawObservation`, `Observation`, `NormalizedSeries`)
//! - the merged chart payload (`MergedBundle`, `BundleSeries`)
//! - display geometry inputs/outputs (`DateWindow`, `RecessionInterval`, `AxisSpan`, `PixelSpan`)
//! - series selection and run configuration (`SeriesSpec`, `DashboardConfig`)

pub mod series;
pub mod types;

pub use series::*;
pub use types::*;
