//! Range clipper: restrict a merged bundle to an inclusive date window.

use std::ops::Range;

use crate::domain::{BundleSeries, DateWindow, MergedBundle};

/// Index range of `dates` that falls inside `window`.
///
/// `dates` must be sorted ascending, which makes the matching indices contiguous.
/// An inverted window yields an empty range.
pub fn visible_range(dates: &[String], window: &DateWindow) -> Range<usize> {
    let lo = window
        .min_date
        .as_deref()
        .map_or(0, |min| dates.partition_point(|d| d.as_str() < min));
    let hi = window
        .max_date
        .as_deref()
        .map_or(dates.len(), |max| dates.partition_point(|d| d.as_str() <= max));
    lo..hi.max(lo)
}

/// Clip every series of `bundle` to `window`.
///
/// An empty result is a valid "nothing to render" bundle: empty `dates` and an
/// empty `values` vector per series, with series metadata kept.
pub fn clip(bundle: &MergedBundle, window: &DateWindow) -> MergedBundle {
    if window.is_unbounded() {
        return bundle.clone();
    }
    let range = visible_range(&bundle.dates, window);
    MergedBundle {
        dates: bundle.dates[range.clone()].to_vec(),
        series: bundle
            .series
            .iter()
            .map(|s| BundleSeries {
                values: s.values[range.clone()].to_vec(),
                ..s.clone()
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::align;
    use crate::domain::{NormalizedSeries, Observation};
    use proptest::prelude::*;

    fn bundle() -> MergedBundle {
        let dates = ["2020-01-01", "2020-02-01", "2020-03-01", "2020-04-01"];
        MergedBundle {
            dates: dates.iter().map(|d| d.to_string()).collect(),
            series: vec![BundleSeries {
                id: "UNRATE".into(),
                title: "Unemployment Rate".into(),
                units: Some("Percent".into()),
                frequency: Some("Monthly".into()),
                values: vec![Some(3.5), None, Some(4.4), Some(14.8)],
            }],
        }
    }

    fn window(min: Option<&str>, max: Option<&str>) -> DateWindow {
        DateWindow::new(min.map(str::to_string), max.map(str::to_string))
    }

    #[test]
    fn inclusive_bounds() {
        let out = clip(&bundle(), &window(Some("2020-02-01"), Some("2020-03-01")));
        assert_eq!(out.dates, ["2020-02-01", "2020-03-01"]);
        assert_eq!(out.series[0].values, [None, Some(4.4)]);
    }

    #[test]
    fn bounds_between_labels() {
        let out = clip(&bundle(), &window(Some("2020-01-15"), None));
        assert_eq!(out.dates, ["2020-02-01", "2020-03-01", "2020-04-01"]);

        let out = clip(&bundle(), &window(None, Some("2020-02-28")));
        assert_eq!(out.dates, ["2020-01-01", "2020-02-01"]);
    }

    #[test]
    fn empty_result_keeps_series_metadata() {
        let out = clip(&bundle(), &window(Some("2021-01-01"), None));
        assert!(out.dates.is_empty());
        assert_eq!(out.series.len(), 1);
        assert_eq!(out.series[0].id, "UNRATE");
        assert!(out.series[0].values.is_empty());
    }

    #[test]
    fn inverted_window_is_empty_not_a_panic() {
        let out = clip(&bundle(), &window(Some("2020-04-01"), Some("2020-01-01")));
        assert!(out.dates.is_empty());
    }

    #[test]
    fn clipping_empty_bundle() {
        let out = clip(&MergedBundle::default(), &window(Some("2020-01-01"), Some("2020-12-01")));
        assert_eq!(out, MergedBundle::default());
    }

    fn arb_bundle() -> impl Strategy<Value = MergedBundle> {
        prop::collection::vec(
            prop::collection::btree_map(
                (1990u32..2000, 1u32..13).prop_map(|(y, m)| format!("{y:04}-{m:02}-01")),
                prop::option::of(0.0f64..100.0),
                0..30,
            ),
            0..4,
        )
        .prop_map(|all| {
            let series: Vec<NormalizedSeries> = all
                .into_iter()
                .enumerate()
                .map(|(i, points)| NormalizedSeries {
                    id: format!("S{i}"),
                    title: format!("S{i}"),
                    units: None,
                    frequency: None,
                    observations: points
                        .into_iter()
                        .map(|(date, value)| Observation { date, value })
                        .collect(),
                })
                .collect();
            align(&series)
        })
    }

    fn arb_window() -> impl Strategy<Value = DateWindow> {
        let date = (1989u32..2001, 1u32..13, 1u32..29).prop_map(|(y, m, d)| format!("{y:04}-{m:02}-{d:02}"));
        (prop::option::of(date.clone()), prop::option::of(date)).prop_map(|(a, b)| DateWindow::new(a, b))
    }

    proptest! {
        #[test]
        fn clip_is_idempotent(b in arb_bundle(), w in arb_window()) {
            let once = clip(&b, &w);
            let twice = clip(&once, &w);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn clip_matches_filter_definition(b in arb_bundle(), w in arb_window()) {
            let out = clip(&b, &w);
            let expected: Vec<usize> = (0..b.dates.len()).filter(|&i| w.contains(&b.dates[i])).collect();
            prop_assert_eq!(out.dates.len(), expected.len());
            for (k, &i) in expected.iter().enumerate() {
                prop_assert_eq!(&out.dates[k], &b.dates[i]);
                for (src, dst) in b.series.iter().zip(&out.series) {
                    prop_assert_eq!(dst.values.len(), out.dates.len());
                    prop_assert_eq!(dst.values[k], src.values[i]);
                }
            }
        }
    }
}
