//! Multi-series aligner.
//!
//! Series arrive at different frequencies (daily, monthly, quarterly) and with
//! gaps. The merged axis is the sorted union of every observation date, and each
//! series is re-indexed onto it with `None` wherever it has no observation.

use std::collections::{BTreeSet, HashMap};

use crate::domain::{BundleSeries, MergedBundle, NormalizedSeries};

/// Merge series onto one shared, sorted date axis.
///
/// Output series keep the input order. If a series repeats a date, the later
/// observation wins.
pub fn align(series: &[NormalizedSeries]) -> MergedBundle {
    let dates: Vec<String> = series
        .iter()
        .flat_map(|s| s.observations.iter().map(|o| o.date.as_str()))
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(str::to_string)
        .collect();

    let series = series
        .iter()
        .map(|s| {
            let by_date: HashMap<&str, Option<f64>> = s
                .observations
                .iter()
                .map(|o| (o.date.as_str(), o.value))
                .collect();
            let values = dates
                .iter()
                .map(|d| by_date.get(d.as_str()).copied().flatten())
                .collect();
            BundleSeries {
                id: s.id.clone(),
                title: s.title.clone(),
                units: s.units.clone(),
                frequency: s.frequency.clone(),
                values,
            }
        })
        .collect();

    MergedBundle { dates, series }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Observation;
    use proptest::prelude::*;

    fn series(id: &str, points: &[(&str, Option<f64>)]) -> NormalizedSeries {
        NormalizedSeries {
            id: id.to_string(),
            title: id.to_string(),
            units: None,
            frequency: None,
            observations: points
                .iter()
                .map(|&(d, v)| Observation { date: d.to_string(), value: v })
                .collect(),
        }
    }

    #[test]
    fn empty_input_yields_empty_bundle() {
        let bundle = align(&[]);
        assert!(bundle.dates.is_empty());
        assert!(bundle.series.is_empty());
    }

    #[test]
    fn quarterly_and_monthly_merge_with_gaps() {
        let gdp = series("GDP", &[("2020-01-01", Some(21.0)), ("2020-04-01", Some(19.5))]);
        let unrate = series(
            "UNRATE",
            &[
                ("2020-01-01", Some(3.5)),
                ("2020-02-01", Some(3.5)),
                ("2020-03-01", None),
                ("2020-04-01", Some(14.8)),
            ],
        );

        let bundle = align(&[gdp, unrate]);
        assert_eq!(bundle.dates, ["2020-01-01", "2020-02-01", "2020-03-01", "2020-04-01"]);
        assert_eq!(bundle.series[0].id, "GDP");
        assert_eq!(bundle.series[0].values, [Some(21.0), None, None, Some(19.5)]);
        assert_eq!(bundle.series[1].values, [Some(3.5), Some(3.5), None, Some(14.8)]);
    }

    #[test]
    fn series_with_no_observations_is_all_missing() {
        let a = series("A", &[("2021-01-01", Some(1.0))]);
        let b = series("B", &[]);
        let bundle = align(&[a, b]);
        assert_eq!(bundle.dates.len(), 1);
        assert_eq!(bundle.series[1].values, [None]);
    }

    #[test]
    fn repeated_date_keeps_last_observation() {
        let a = series("A", &[("2021-01-01", Some(1.0)), ("2021-01-01", Some(2.0))]);
        let bundle = align(&[a]);
        assert_eq!(bundle.dates, ["2021-01-01"]);
        assert_eq!(bundle.series[0].values, [Some(2.0)]);
    }

    fn arb_series(id: &'static str) -> impl Strategy<Value = NormalizedSeries> {
        // Small date alphabet so series overlap often.
        prop::collection::btree_map(
            (2000u32..2004, 1u32..13).prop_map(|(y, m)| format!("{y:04}-{m:02}-01")),
            prop::option::of(-1000.0f64..1000.0),
            0..20,
        )
        .prop_map(move |points| NormalizedSeries {
            id: id.to_string(),
            title: id.to_string(),
            units: None,
            frequency: None,
            observations: points
                .into_iter()
                .map(|(date, value)| Observation { date, value })
                .collect(),
        })
    }

    proptest! {
        #[test]
        fn dates_are_sorted_union_and_values_align(
            a in arb_series("A"),
            b in arb_series("B"),
            c in arb_series("C"),
        ) {
            let input = vec![a, b, c];
            let bundle = align(&input);

            prop_assert!(bundle.dates.windows(2).all(|w| w[0] < w[1]));

            let union: BTreeSet<&str> = input
                .iter()
                .flat_map(|s| s.observations.iter().map(|o| o.date.as_str()))
                .collect();
            prop_assert_eq!(bundle.dates.iter().map(String::as_str).collect::<Vec<_>>(), union.into_iter().collect::<Vec<_>>());

            for (src, out) in input.iter().zip(&bundle.series) {
                prop_assert_eq!(out.values.len(), bundle.dates.len());
                for (date, value) in bundle.dates.iter().zip(&out.values) {
                    let expected = src.observations.iter().find(|o| &o.date == date).and_then(|o| o.value);
                    prop_assert_eq!(*value, expected);
                }
            }
        }

        #[test]
        fn axis_is_independent_of_input_order(
            a in arb_series("A"),
            b in arb_series("B"),
        ) {
            let forward = align(&[a.clone(), b.clone()]);
            let reverse = align(&[b, a]);
            prop_assert_eq!(&forward.dates, &reverse.dates);
            prop_assert_eq!(&forward.series[0], &reverse.series[1]);
            prop_assert_eq!(&forward.series[1], &reverse.series[0]);
        }

        #[test]
        fn repeated_runs_serialize_identically(a in arb_series("A"), b in arb_series("B")) {
            let input = vec![a, b];
            let first = serde_json::to_string(&align(&input)).unwrap();
            let second = serde_json::to_string(&align(&input)).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
