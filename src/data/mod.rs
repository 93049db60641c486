//! Provider access and the observation normalizer.
//!
//! - FRED HTTP client (`fred`)
//! - raw value parsing (`normalize`)
//! - recession reference data (`recessions`)
//! - the fetch seam used by the pipeline (`source`)

pub mod fred;
pub mod normalize;
pub mod recessions;
pub mod source;

pub use fred::FredClient;
pub use normalize::{normalize_observations, normalize_series, parse_value};
pub use recessions::NBER_RECESSIONS;
pub use source::{ObservationSource, RawSeries};
