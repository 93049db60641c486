//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the alignment code stays clean and testable
//! - output changes are localized (important for snapshot tests)

use crate::axis::axis_span;
use crate::data::NBER_RECESSIONS;
use crate::domain::{BundleSeries, DateWindow, MergedBundle, PRESETS};

/// Summary of the visible bundle: range, per-series stats, and shaded recessions.
pub fn format_summary(visible: &MergedBundle, window: &DateWindow) -> String {
    let mut out = String::new();

    out.push_str("=== fo - FRED series overlay ===\n");
    out.push_str(&format!("Window: {window}\n"));

    if visible.series.is_empty() {
        out.push_str("Choose at least one series (-s ID).\n");
        return out;
    }
    if visible.is_empty() {
        out.push_str("No observations fall inside the selected window.\n");
        return out;
    }

    out.push_str(&format!(
        "Dates: {} .. {} (n={})\n",
        visible.first_date().unwrap_or("-"),
        visible.last_date().unwrap_or("-"),
        visible.dates.len()
    ));

    out.push_str("\nSeries:\n");
    out.push_str(&format!(
        "{:<22} {:<10} {:>6} {:>14} {:>14}  {}\n",
        "id", "freq", "n", "first", "last", "units"
    ));
    for s in &visible.series {
        out.push_str(&format_series_row(s));
    }

    let shaded: Vec<_> = NBER_RECESSIONS
        .iter()
        .filter(|r| axis_span(&visible.dates, r).is_some())
        .collect();
    out.push_str(&format!("\nRecessions shaded: {}\n", shaded.len()));
    for r in shaded {
        out.push_str(&format!("  {} .. {}\n", r.start, r.end));
    }

    out
}

fn format_series_row(s: &BundleSeries) -> String {
    let first = s.values.iter().flatten().next().copied();
    let last = s.values.iter().rev().flatten().next().copied();
    format!(
        "{:<22} {:<10} {:>6} {:>14} {:>14}  {}\n",
        truncate(&s.id, 22),
        truncate(s.frequency.as_deref().unwrap_or("-"), 10),
        s.known_count(),
        fmt_opt(first),
        fmt_opt(last),
        s.units.as_deref().unwrap_or("-"),
    )
}

/// Preset catalog and recession list for `fo list`.
pub fn format_catalog() -> String {
    let mut out = String::new();
    out.push_str("Preset series:\n");
    for p in PRESETS {
        out.push_str(&format!("  {:<22} {}\n", p.spec, p.label));
    }
    out.push_str("\nRecession periods (NBER, approximate):\n");
    for r in NBER_RECESSIONS {
        out.push_str(&format!("  {} .. {}\n", r.start, r.end));
    }
    out
}

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".to_string())
}

fn truncate(s: &str, n: usize) -> String {
    if s.chars().count() <= n {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(n.saturating_sub(1)).collect();
        t.push('~');
        t
    }
}
