//! Observation normalizer.
//!
//! FRED returns every observation value as a string and marks missing data with
//! `"."`. This stage resolves those strings into `Option<f64>` without dropping,
//! reordering, or merging anything: one output per input, in input order.
//!
//! Bad values never fail the series. A partially usable series is worth more to
//! a chart than an error.

use crate::domain::{NormalizedSeries, Observation, RawObservation, SeriesMeta};

/// FRED's missing-data sentinel.
pub const MISSING_SENTINEL: &str = ".";

/// Parse one raw value; missing, unparsable, and non-finite values become `None`.
pub fn parse_value(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed == MISSING_SENTINEL || trimmed.is_empty() {
        return None;
    }
    let v = trimmed.parse::<f64>().ok()?;
    if v.is_finite() { Some(v) } else { None }
}

/// Normalize a raw observation sequence, preserving order and count.
pub fn normalize_observations(raw: &[RawObservation]) -> Vec<Observation> {
    raw.iter()
        .map(|obs| Observation {
            date: obs.date.clone(),
            value: parse_value(&obs.value),
        })
        .collect()
}

/// Build a `NormalizedSeries` from raw observations and resolved metadata.
pub fn normalize_series(id: impl Into<String>, meta: SeriesMeta, raw: &[RawObservation]) -> NormalizedSeries {
    NormalizedSeries {
        id: id.into(),
        title: meta.title,
        units: meta.units,
        frequency: meta.frequency,
        observations: normalize_observations(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_and_blank_are_missing() {
        assert_eq!(parse_value("."), None);
        assert_eq!(parse_value("  .  "), None);
        assert_eq!(parse_value(""), None);
        assert_eq!(parse_value("   "), None);
    }

    #[test]
    fn garbage_and_non_finite_are_missing() {
        assert_eq!(parse_value("n/a"), None);
        assert_eq!(parse_value("12abc"), None);
        assert_eq!(parse_value("NaN"), None);
        assert_eq!(parse_value("inf"), None);
        assert_eq!(parse_value("1e400"), None);
    }

    #[test]
    fn decimals_parse() {
        assert_eq!(parse_value(" 3.5 "), Some(3.5));
        assert_eq!(parse_value("-0.25"), Some(-0.25));
        assert_eq!(parse_value("21000"), Some(21000.0));
    }

    #[test]
    fn preserves_order_count_and_duplicates() {
        let raw = vec![
            RawObservation::new("2020-01-01", "1.0"),
            RawObservation::new("2020-02-01", "."),
            RawObservation::new("2020-02-01", "2.0"),
            RawObservation::new("2020-03-01", "bogus"),
        ];
        let out = normalize_observations(&raw);
        assert_eq!(out.len(), 4);
        let dates: Vec<&str> = out.iter().map(|o| o.date.as_str()).collect();
        assert_eq!(dates, ["2020-01-01", "2020-02-01", "2020-02-01", "2020-03-01"]);
        let values: Vec<Option<f64>> = out.iter().map(|o| o.value).collect();
        assert_eq!(values, [Some(1.0), None, Some(2.0), None]);
    }

    #[test]
    fn series_carries_metadata() {
        let meta = SeriesMeta {
            title: "Unemployment Rate".into(),
            units: Some("Percent".into()),
            frequency: Some("Monthly".into()),
        };
        let s = normalize_series("UNRATE", meta, &[RawObservation::new("2020-01-01", "3.5")]);
        assert_eq!(s.id, "UNRATE");
        assert_eq!(s.units.as_deref(), Some("Percent"));
        assert_eq!(s.observations[0].value, Some(3.5));
    }
}
