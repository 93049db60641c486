//! Interval-to-axis mapping for recession shading.
//!
//! A category axis places each date label at a discrete position, so a calendar
//! interval has to be snapped to labels first (`axis_span`) and then widened to
//! half a label step on each side (`pixel_span`) so the band does not start or
//! end on a data point's centerline.
//!
//! Pixel positions depend on the drawing surface's current size and on which
//! labels are visible, so callers recompute spans on every draw.

use crate::domain::{AxisSpan, PixelSpan, RecessionInterval};

/// Maps a label index to a horizontal drawing-surface coordinate.
pub trait AxisScale {
    fn pixel_for_index(&self, index: usize) -> f64;
}

/// Evenly spaced category axis: the first label sits on `start`, the last on `end`.
///
/// With a single label, that label is centered between `start` and `end`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryScale {
    pub start: f64,
    pub end: f64,
    pub len: usize,
}

impl CategoryScale {
    pub fn new(start: f64, end: f64, len: usize) -> Self {
        Self { start, end, len }
    }
}

impl AxisScale for CategoryScale {
    fn pixel_for_index(&self, index: usize) -> f64 {
        if self.len <= 1 {
            return (self.start + self.end) / 2.0;
        }
        let step = (self.end - self.start) / (self.len - 1) as f64;
        self.start + step * index as f64
    }
}

impl<F: Fn(usize) -> f64> AxisScale for F {
    fn pixel_for_index(&self, index: usize) -> f64 {
        self(index)
    }
}

/// Snap `interval` to the label indices it covers.
///
/// `dates` must be ascending and unique. Returns `None` when no label falls
/// inside the interval, which is the normal case for intervals outside the
/// visible window.
pub fn axis_span<S: AsRef<str>>(dates: &[S], interval: &RecessionInterval) -> Option<AxisSpan> {
    let start_index = dates.partition_point(|d| d.as_ref() < interval.start);
    let end_excl = dates.partition_point(|d| d.as_ref() <= interval.end);
    if start_index >= dates.len() || end_excl == 0 {
        return None;
    }
    let end_index = end_excl - 1;
    (end_index >= start_index).then_some(AxisSpan { start_index, end_index })
}

/// Widen an index span by half a label step on each side.
///
/// At the array ends, where there is no outer neighbour, the spacing to the
/// inner neighbour is mirrored. A single-label axis has no spacing and yields a
/// zero-width span on that label.
pub fn pixel_span<A: AxisScale + ?Sized>(span: AxisSpan, len: usize, scale: &A) -> PixelSpan {
    let AxisSpan { start_index: i, end_index: j } = span;
    debug_assert!(i <= j && j < len, "span {i}..={j} outside axis of {len} labels");
    let p = |k: usize| scale.pixel_for_index(k);

    let left_gap = if i > 0 {
        p(i) - p(i - 1)
    } else if len > 1 {
        p(1) - p(0)
    } else {
        0.0
    };
    let right_gap = if j + 1 < len {
        p(j + 1) - p(j)
    } else if len > 1 {
        p(j) - p(j - 1)
    } else {
        0.0
    };

    PixelSpan {
        x_start: p(i) - left_gap / 2.0,
        x_end: p(j) + right_gap / 2.0,
    }
}

/// Pixel spans for every interval that overlaps the visible axis, in catalog order.
pub fn shade_spans<S: AsRef<str>, A: AxisScale + ?Sized>(
    dates: &[S],
    intervals: &[RecessionInterval],
    scale: &A,
) -> Vec<PixelSpan> {
    intervals
        .iter()
        .filter_map(|interval| axis_span(dates, interval))
        .map(|span| pixel_span(span, dates.len(), scale))
        .collect()
}

/// Convert a pixel span into the inclusive cell columns it covers, clamped to `[lo, hi]`.
///
/// Used by the text-cell renderers (terminal chart, ASCII plot). Returns `None`
/// when the span lies entirely outside the range.
pub fn span_columns(span: PixelSpan, lo: usize, hi: usize) -> Option<(usize, usize)> {
    let (lo_f, hi_f) = (lo as f64, hi as f64);
    if span.x_end < lo_f - 0.5 || span.x_start > hi_f + 0.5 {
        return None;
    }
    let first = span.x_start.round().clamp(lo_f, hi_f) as usize;
    let last = span.x_end.round().clamp(lo_f, hi_f) as usize;
    // A half-step boundary rounds into the neighbouring cell; keep that cell unshaded
    // unless the span genuinely reaches into it.
    let first = if (span.x_start - span.x_start.floor() - 0.5).abs() < 1e-9 && first < last {
        first.max(span.x_start.ceil() as usize)
    } else {
        first
    };
    let last = if (span.x_end - span.x_end.floor() - 0.5).abs() < 1e-9 && last > first {
        last.min(span.x_end.floor() as usize)
    } else {
        last
    };
    Some((first.min(last), last))
}
