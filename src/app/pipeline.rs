//! Shared "bundle pipeline" logic used by the CLI commands, the export path, and
//! the TUI fetch worker.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> normalize -> per-series transform -> align -> clip
//!
//! The front-ends can then focus on presentation (printing vs widgets).

use rayon::prelude::*;

use crate::align::{align, clip};
use crate::data::{ObservationSource, normalize_series};
use crate::domain::{DashboardConfig, DateWindow, MAX_SERIES, MergedBundle, NormalizedSeries, SeriesMeta, SeriesSpec};
use crate::error::AppError;

/// What to fetch for one chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleRequest {
    pub series: Vec<SeriesSpec>,
    pub observation_start: String,
}

impl BundleRequest {
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            series: config.series.clone(),
            observation_start: config.observation_start.clone(),
        }
    }
}

/// All computed outputs of a single `fo show`/`fo export` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Full merged bundle, before clipping.
    pub bundle: MergedBundle,
    /// Bundle clipped to the configured window.
    pub visible: MergedBundle,
    pub window: DateWindow,
}

/// Drop repeated specs (first occurrence wins) and enforce the series limit.
pub fn resolve_specs(specs: &[SeriesSpec]) -> Result<Vec<SeriesSpec>, AppError> {
    let mut out: Vec<SeriesSpec> = Vec::with_capacity(specs.len());
    for spec in specs {
        if !out.contains(spec) {
            out.push(spec.clone());
        }
    }
    if out.len() > MAX_SERIES {
        return Err(AppError::config(format!(
            "At most {MAX_SERIES} series can be overlaid (got {}).",
            out.len()
        )));
    }
    Ok(out)
}

/// Fetch, normalize, transform, and align the requested series.
///
/// An empty request returns an empty bundle without touching the source.
pub fn build_bundle<S: ObservationSource + Sync>(source: &S, request: &BundleRequest) -> Result<MergedBundle, AppError> {
    let specs = resolve_specs(&request.series)?;
    if specs.is_empty() {
        return Ok(MergedBundle::default());
    }

    let series = specs
        .par_iter()
        .map(|spec| fetch_normalized(source, spec, &request.observation_start))
        .collect::<Result<Vec<_>, AppError>>()?;

    let bundle = align(&series);
    tracing::debug!(series = bundle.series.len(), dates = bundle.dates.len(), "aligned bundle");
    Ok(bundle)
}

fn fetch_normalized<S: ObservationSource + Sync>(
    source: &S,
    spec: &SeriesSpec,
    observation_start: &str,
) -> Result<NormalizedSeries, AppError> {
    let raw = source.fetch_series(&spec.id, observation_start)?;
    let meta = raw.meta.unwrap_or_else(|| SeriesMeta {
        title: fallback_title(spec),
        units: None,
        frequency: None,
    });
    let series = normalize_series(spec.id.clone(), meta, &raw.observations);
    Ok(match spec.transform {
        Some(t) => crate::transform::apply(t, series),
        None => series,
    })
}

fn fallback_title(spec: &SeriesSpec) -> String {
    // Transformed presets carry their own label, but `transform::apply` appends
    // the suffix again, so look up the untransformed label.
    SeriesSpec::plain(spec.id.clone())
        .preset_label()
        .map(str::to_string)
        .unwrap_or_else(|| spec.id.clone())
}

/// Execute the full pipeline for a line-mode command.
pub fn run<S: ObservationSource + Sync>(source: &S, config: &DashboardConfig) -> Result<RunOutput, AppError> {
    let bundle = build_bundle(source, &BundleRequest::from_config(config))?;
    let visible = clip(&bundle, &config.window);
    Ok(RunOutput {
        bundle,
        visible,
        window: config.window.clone(),
    })
}
