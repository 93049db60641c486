//! Plotters-powered overlay chart widget for Ratatui.
//!
//! Lines are drawn by Plotters into the Ratatui buffer (via
//! `plotters-ratatui-backend`). Recession bands are painted afterwards as cell
//! backgrounds, so they sit behind the line glyphs without hiding them.
//!
//! The plotting area fills the widget's `Rect` exactly (no margins, no label
//! areas), so label index `i` lands on the same terminal column that the
//! `CategoryScale` built from that `Rect` predicts. Axis labels are drawn by
//! the caller around the widget.

use plotters::prelude::*;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

use crate::axis::{CategoryScale, shade_spans, span_columns};
use crate::domain::RecessionInterval;

/// One polyline; missing values are already dropped, so gaps are spanned.
#[derive(Debug, Clone)]
pub struct ChartLine {
    pub points: Vec<(f64, f64)>,
    pub color: RGBColor,
    /// Plot against the right-hand axis.
    pub secondary: bool,
}

/// A lightweight, render-only chart description.
///
/// All series and bounds are computed outside the render call. Only the
/// recession geometry is derived here, because it depends on the area the
/// chart is rendered into.
pub struct OverlayPlottersChart<'a> {
    /// Category labels (visible dates), one per x index.
    pub dates: &'a [String],
    pub lines: &'a [ChartLine],
    pub recessions: &'a [RecessionInterval],
    /// X bounds in label-index units.
    pub x_bounds: [f64; 2],
    pub y_bounds: [f64; 2],
    /// Present when a series is plotted against the secondary axis.
    pub y2_bounds: Option<[f64; 2]>,
    pub shade: Color,
}

impl<'a> Widget for OverlayPlottersChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !bounds_ok(self.x_bounds) || !bounds_ok(self.y_bounds) || !self.y2_bounds.is_none_or(bounds_ok) {
            return;
        }

        let lines = self.lines;
        let y2 = self.y2_bounds;
        let widget = widget_fn(move |root| {
            let chart = ChartBuilder::on(&root).margin(0).build_cartesian_2d(x0..x1, y0..y1)?;

            match y2 {
                Some([s0, s1]) => {
                    let mut chart = chart.set_secondary_coord(x0..x1, s0..s1);
                    for line in lines {
                        let series = LineSeries::new(line.points.iter().copied(), &line.color);
                        if line.secondary {
                            chart.draw_secondary_series(series)?;
                        } else {
                            chart.draw_series(series)?;
                        }
                    }
                }
                None => {
                    let mut chart = chart;
                    for line in lines {
                        chart.draw_series(LineSeries::new(line.points.iter().copied(), &line.color))?;
                    }
                }
            }

            Ok(())
        });

        widget.render(area, buf);

        // Recomputed on every draw: the column of each label depends on the
        // current terminal size and on which dates are visible.
        let left = area.x as usize;
        let right = area.right().saturating_sub(1) as usize;
        let scale = CategoryScale::new(left as f64, right as f64, self.dates.len());
        for span in shade_spans(self.dates, self.recessions, &scale) {
            let Some((c0, c1)) = span_columns(span, left, right) else {
                continue;
            };
            for x in c0..=c1 {
                for y in area.top()..area.bottom() {
                    if let Some(cell) = buf.cell_mut((x as u16, y)) {
                        cell.set_bg(self.shade);
                    }
                }
            }
        }
    }
}

fn bounds_ok([lo, hi]: [f64; 2]) -> bool {
    lo.is_finite() && hi.is_finite() && hi > lo
}
