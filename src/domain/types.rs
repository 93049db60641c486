//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - produced by the fetch stage and consumed by the aligner
//! - exported to JSON/CSV
//! - handed to the chart front-ends without copying into new shapes
//!
//! Dates are kept as zero-padded ISO `YYYY-MM-DD` strings. Lexicographic order on
//! those strings is calendar order, which is all the alignment and clipping code
//! needs.

use serde::{Deserialize, Serialize};

/// One observation exactly as the provider returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawObservation {
    pub date: String,
    pub value: String,
}

impl RawObservation {
    pub fn new(date: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            value: value.into(),
        }
    }
}

/// A single (date, value) point with the provider's missing-data sentinel resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: String,
    pub value: Option<f64>,
}

/// Descriptive metadata attached to a series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SeriesMeta {
    pub title: String,
    pub units: Option<String>,
    pub frequency: Option<String>,
}

/// An observation sequence plus metadata, ready for alignment.
///
/// Immutable once produced by the fetch stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedSeries {
    pub id: String,
    pub title: String,
    pub units: Option<String>,
    pub frequency: Option<String>,
    pub observations: Vec<Observation>,
}

/// One series re-expressed over the bundle's shared date axis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSeries {
    pub id: String,
    pub title: String,
    pub units: Option<String>,
    pub frequency: Option<String>,
    /// Aligned 1:1 with `MergedBundle::dates`.
    pub values: Vec<Option<f64>>,
}

impl BundleSeries {
    /// Number of non-missing values.
    pub fn known_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// `(min, max)` over the known values, or `None` when every value is missing.
    pub fn value_range(&self) -> Option<(f64, f64)> {
        self.values.iter().flatten().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }
}

/// Several series over one shared, gap-filled date axis.
///
/// Invariant: every `series[k].values.len() == dates.len()`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MergedBundle {
    pub dates: Vec<String>,
    pub series: Vec<BundleSeries>,
}

impl MergedBundle {
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn first_date(&self) -> Option<&str> {
        self.dates.first().map(String::as_str)
    }

    pub fn last_date(&self) -> Option<&str> {
        self.dates.last().map(String::as_str)
    }
}

/// Inclusive display window; either bound may be open.
///
/// The core does not check `min_date <= max_date`. Front-ends enforce it before
/// clipping.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DateWindow {
    pub min_date: Option<String>,
    pub max_date: Option<String>,
}

impl DateWindow {
    pub fn new(min_date: Option<String>, max_date: Option<String>) -> Self {
        Self { min_date, max_date }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, date: &str) -> bool {
        self.min_date.as_deref().is_none_or(|min| date >= min)
            && self.max_date.as_deref().is_none_or(|max| date <= max)
    }

    pub fn is_unbounded(&self) -> bool {
        self.min_date.is_none() && self.max_date.is_none()
    }
}

impl std::fmt::Display for DateWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} .. {}",
            self.min_date.as_deref().unwrap_or("start"),
            self.max_date.as_deref().unwrap_or("end")
        )
    }
}

/// A fixed historical date range shaded on charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecessionInterval {
    pub start: &'static str,
    pub end: &'static str,
}

/// Inclusive index range into a `dates` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisSpan {
    pub start_index: usize,
    pub end_index: usize,
}

/// Horizontal extent of a shaded band on the drawing surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelSpan {
    pub x_start: f64,
    pub x_end: f64,
}

impl PixelSpan {
    pub fn width(&self) -> f64 {
        self.x_end - self.x_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_bounds_are_inclusive() {
        let w = DateWindow::new(Some("2000-01-01".into()), Some("2000-12-01".into()));
        assert!(w.contains("2000-01-01"));
        assert!(w.contains("2000-12-01"));
        assert!(!w.contains("1999-12-31"));
        assert!(!w.contains("2000-12-02"));
        assert!(DateWindow::unbounded().contains("1900-01-01"));
    }

    #[test]
    fn value_range_skips_missing() {
        let s = BundleSeries {
            id: "X".into(),
            title: "X".into(),
            units: None,
            frequency: None,
            values: vec![None, Some(3.0), Some(-1.0), None],
        };
        assert_eq!(s.value_range(), Some((-1.0, 3.0)));
        assert_eq!(s.known_count(), 2);
    }
}
