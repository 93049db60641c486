//! Seam between the pipeline and wherever raw observations come from.

use crate::domain::{RawObservation, SeriesMeta};
use crate::error::AppError;

/// Raw provider output for one series.
#[derive(Debug, Clone, Default)]
pub struct RawSeries {
    /// `None` when metadata could not be retrieved; callers fall back to labels they know.
    pub meta: Option<SeriesMeta>,
    pub observations: Vec<RawObservation>,
}

/// Something that can produce raw observations for a FRED series id.
///
/// Implementations must be `Sync`: the pipeline fetches the requested series in
/// parallel from a shared reference.
pub trait ObservationSource {
    fn fetch_series(&self, id: &str, observation_start: &str) -> Result<RawSeries, AppError>;
}

impl<T: ObservationSource + ?Sized> ObservationSource for &T {
    fn fetch_series(&self, id: &str, observation_start: &str) -> Result<RawSeries, AppError> {
        (**self).fetch_series(id, observation_start)
    }
}

impl<T: ObservationSource + ?Sized> ObservationSource for std::sync::Arc<T> {
    fn fetch_series(&self, id: &str, observation_start: &str) -> Result<RawSeries, AppError> {
        (**self).fetch_series(id, observation_start)
    }
}
