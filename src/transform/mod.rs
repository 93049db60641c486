//! Derived transforms applied to a normalized series before alignment.
//!
//! Only one transform exists: annualized month-over-month change. Each value is
//! compared against the most recent *known* value, so isolated missing months do
//! not break the chain. A gap of several months is still treated as a single
//! period, which mis-annualizes across the gap; this is a known approximation.

use crate::domain::{NormalizedSeries, Observation, Transform};

/// Fold state for the annualization: the last non-missing input value.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LastKnown {
    pub value: Option<f64>,
}

/// Advance the annualization by one observation.
///
/// Returns the new state and the emitted value.
pub fn annualize_step(state: LastKnown, current: Option<f64>) -> (LastKnown, Option<f64>) {
    let Some(cur) = current else {
        return (state, None);
    };
    let next = LastKnown { value: Some(cur) };
    let Some(last) = state.value else {
        return (next, None);
    };

    let ratio = cur / last;
    if !ratio.is_finite() || ratio <= 0.0 {
        return (next, None);
    }
    let annualized = (ratio.powi(12) - 1.0) * 100.0;
    (next, annualized.is_finite().then_some(annualized))
}

/// Annualized month-over-month percent change of a value sequence.
pub fn annualized_mom(values: &[Option<f64>]) -> Vec<Option<f64>> {
    let (_, out) = values.iter().fold(
        (LastKnown::default(), Vec::with_capacity(values.len())),
        |(state, mut out), &v| {
            let (state, y) = annualize_step(state, v);
            out.push(y);
            (state, out)
        },
    );
    out
}

/// Apply `transform` to a series, rewriting values, id, title, and units.
pub fn apply(transform: Transform, series: NormalizedSeries) -> NormalizedSeries {
    let values: Vec<Option<f64>> = series.observations.iter().map(|o| o.value).collect();
    let transformed = match transform {
        Transform::Annualized => annualized_mom(&values),
    };

    let observations = series
        .observations
        .into_iter()
        .zip(transformed)
        .map(|(obs, value)| Observation { date: obs.date, value })
        .collect();

    NormalizedSeries {
        id: format!("{}:{}", series.id, transform.suffix()),
        title: format!("{}{}", series.title, transform.title_suffix()),
        units: Some(transform.units_label().to_string()),
        frequency: series.frequency,
        observations,
    }
}
