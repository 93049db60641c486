//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - series lines: `*`, `o`, `+` (first, second, third series)
//! - recession bands: `░` columns behind the lines
//!
//! The x axis is a category axis: every date in the bundle gets an evenly spaced
//! column, regardless of the calendar distance between dates.

use crate::axis::{AxisScale, CategoryScale, shade_spans, span_columns};
use crate::domain::{MergedBundle, RecessionInterval};

const GLYPHS: [char; 3] = ['*', 'o', '+'];
const SHADE: char = '░';

/// Render the visible bundle as an overlay plot.
///
/// With `dual_axis`, the second series is scaled against its own y range.
pub fn render_overlay_plot(
    visible: &MergedBundle,
    recessions: &[RecessionInterval],
    width: usize,
    height: usize,
    dual_axis: bool,
) -> String {
    let width = width.max(10);
    let height = height.max(5);

    if visible.is_empty() || visible.series.is_empty() {
        return "Plot: nothing to render\n".to_string();
    }

    let n = visible.dates.len();
    let scale = CategoryScale::new(0.0, (width - 1) as f64, n);
    let mut grid = vec![vec![' '; width]; height];

    // Shade first so lines draw over the bands.
    for span in shade_spans(&visible.dates, recessions, &scale) {
        if let Some((c0, c1)) = span_columns(span, 0, width - 1) {
            for row in grid.iter_mut() {
                for cell in &mut row[c0..=c1] {
                    *cell = SHADE;
                }
            }
        }
    }

    let secondary = |k: usize| dual_axis && k == 1 && visible.series.len() > 1;
    let primary_range = y_range(visible, |k| !secondary(k));
    let secondary_range = y_range(visible, secondary);

    for (k, series) in visible.series.iter().enumerate() {
        let Some((y_min, y_max)) = (if secondary(k) { secondary_range } else { primary_range }) else {
            continue;
        };
        let glyph = GLYPHS[k % GLYPHS.len()];
        let mut prev: Option<(usize, usize)> = None;
        // Missing values are skipped and the line spans the gap.
        for (i, v) in series.values.iter().enumerate() {
            let Some(v) = *v else { continue };
            let x = scale.pixel_for_index(i).round() as usize;
            let y = map_y(v, y_min, y_max, height);
            match prev {
                Some((x0, y0)) => draw_line(&mut grid, x0, y0, x, y, glyph),
                None => plot(&mut grid, x, y, glyph),
            }
            prev = Some((x, y));
        }
    }

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {} .. {}",
        visible.first_date().unwrap_or("-"),
        visible.last_date().unwrap_or("-")
    ));
    if let Some((lo, hi)) = primary_range {
        out.push_str(&format!(" | y=[{lo:.2}, {hi:.2}]"));
    }
    if let Some((lo, hi)) = secondary_range {
        out.push_str(&format!(" | y2=[{lo:.2}, {hi:.2}]"));
    }
    out.push('\n');

    out.push_str("Legend:");
    for (k, series) in visible.series.iter().enumerate() {
        let side = if secondary(k) { " (right axis)" } else { "" };
        out.push_str(&format!(" {} {}{side} ", GLYPHS[k % GLYPHS.len()], series.id));
    }
    out.push_str(&format!(" {SHADE} recession\n"));

    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }

    out
}

fn y_range(bundle: &MergedBundle, include: impl Fn(usize) -> bool) -> Option<(f64, f64)> {
    let (lo, hi) = bundle
        .series
        .iter()
        .enumerate()
        .filter(|(k, _)| include(*k))
        .filter_map(|(_, s)| s.value_range())
        .reduce(|(a0, a1), (b0, b1)| (a0.min(b0), a1.max(b1)))?;
    Some(pad_range(lo, hi, 0.05))
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = if span > 0.0 { span * frac } else { min.abs().max(1.0) * frac };
    (min - pad, max + pad)
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn is_background(c: char) -> bool {
    c == ' ' || c == SHADE
}

fn plot(grid: &mut [Vec<char>], x: usize, y: usize, ch: char) {
    if let Some(cell) = grid.get_mut(y).and_then(|row| row.get_mut(x)) {
        if is_background(*cell) {
            *cell = ch;
        }
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if x0 >= 0 && y0 >= 0 {
            plot(grid, x0 as usize, y0 as usize, ch);
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::BundleSeries;

    fn series(id: &str, values: Vec<Option<f64>>) -> BundleSeries {
        BundleSeries {
            id: id.into(),
            title: id.into(),
            units: None,
            frequency: None,
            values,
        }
    }

    fn dates() -> Vec<String> {
        ["2020-01-01", "2020-02-01", "2020-03-01", "2020-04-01"]
            .iter()
            .map(|d| d.to_string())
            .collect()
    }

    #[test]
    fn plot_golden_snapshot_small() {
        let visible = MergedBundle {
            dates: dates(),
            series: vec![series("UNRATE", vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)])],
        };
        let recessions = [RecessionInterval { start: "2020-02-01", end: "2020-04-01" }];

        let txt = render_overlay_plot(&visible, &recessions, 10, 5, false);
        let expected = concat!(
            "Plot: 2020-01-01 .. 2020-04-01 | y=[0.85, 4.15]\n",
            "Legend: * UNRATE  ░ recession\n",
            "  ░░░░░░**\n",
            "  ░░░░**░░\n",
            "  ░░**░░░░\n",
            "  **░░░░░░\n",
            "**░░░░░░░░\n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn gaps_are_spanned_and_outside_recessions_ignored() {
        let visible = MergedBundle {
            dates: dates(),
            series: vec![series("GDP", vec![Some(1.0), None, None, Some(1.0)])],
        };
        let recessions = [RecessionInterval { start: "2021-01-01", end: "2021-06-01" }];

        let txt = render_overlay_plot(&visible, &recessions, 10, 5, false);
        assert!(!txt.lines().skip(2).any(|l| l.contains(SHADE)));
        // Flat line across the whole width.
        assert!(txt.lines().skip(2).any(|l| l == "**********"));
    }

    #[test]
    fn dual_axis_reports_both_ranges() {
        let visible = MergedBundle {
            dates: dates(),
            series: vec![
                series("UNRATE", vec![Some(3.0), Some(4.0), Some(5.0), Some(6.0)]),
                series("GDP", vec![Some(21000.0), None, None, Some(20000.0)]),
            ],
        };
        let txt = render_overlay_plot(&visible, &[], 20, 8, true);
        let header = txt.lines().next().unwrap();
        assert!(header.contains("y=[2.85, 6.15]"), "{header}");
        assert!(header.contains("y2=[19950.00, 21050.00]"), "{header}");
        assert!(txt.contains("o GDP (right axis)"));
        // UNRATE ends at the top right, GDP starts at the top left, each on its own scale.
        let top = txt.lines().nth(2).unwrap();
        assert!(top.contains('*') && top.contains('o'), "{top}");
    }

    #[test]
    fn empty_bundle_renders_placeholder() {
        let txt = render_overlay_plot(&MergedBundle::default(), &[], 20, 8, false);
        assert_eq!(txt, "Plot: nothing to render\n");
    }
}
