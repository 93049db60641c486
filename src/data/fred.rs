//! FRED API integration: observations and series metadata.

use reqwest::blocking::{Client, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::data::source::{ObservationSource, RawSeries};
use crate::domain::{RawObservation, SeriesMeta};
use crate::error::AppError;

const BASE_URL: &str = "https://api.stlouisfed.org/fred";

pub struct FredClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FredClient {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("FRED_API_KEY")
            .map_err(|_| AppError::config("Missing FRED_API_KEY in environment (.env)."))?;
        Ok(Self::new(api_key))
    }

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Fetch the raw observation list for one series, oldest first.
    pub fn fetch_raw(&self, series_id: &str, observation_start: &str) -> Result<Vec<RawObservation>, AppError> {
        tracing::info!(series_id, observation_start, "fetching FRED observations");
        let resp = self
            .client
            .get(format!("{}/series/observations", self.base_url))
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "asc"),
                ("observation_start", observation_start),
            ])
            .send()
            .map_err(|e| AppError::provider(format!("FRED request failed for {series_id}: {e}")))?;

        let body: ObservationsResponse = read_json(resp, series_id)?;
        tracing::debug!(series_id, count = body.observations.len(), "received observations");
        Ok(body.observations)
    }

    /// Fetch title/units/frequency for one series.
    pub fn fetch_meta(&self, series_id: &str) -> Result<SeriesMeta, AppError> {
        let resp = self
            .client
            .get(format!("{}/series", self.base_url))
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ])
            .send()
            .map_err(|e| AppError::provider(format!("FRED metadata request failed for {series_id}: {e}")))?;

        let body: SeriesResponse = read_json(resp, series_id)?;
        let info = body
            .seriess
            .into_iter()
            .next()
            .ok_or_else(|| AppError::provider(format!("FRED returned no metadata for {series_id}.")))?;

        Ok(SeriesMeta {
            title: info.title,
            units: non_blank(info.units),
            frequency: non_blank(info.frequency),
        })
    }
}

impl ObservationSource for FredClient {
    fn fetch_series(&self, id: &str, observation_start: &str) -> Result<RawSeries, AppError> {
        let observations = self.fetch_raw(id, observation_start)?;
        let meta = match self.fetch_meta(id) {
            Ok(meta) => Some(meta),
            Err(err) => {
                tracing::warn!(series_id = id, error = %err, "falling back to catalog metadata");
                None
            }
        };
        Ok(RawSeries { meta, observations })
    }
}

fn read_json<T: DeserializeOwned>(resp: Response, series_id: &str) -> Result<T, AppError> {
    let status = resp.status();
    if !status.is_success() {
        // FRED reports bad ids/keys as a JSON body alongside the 4xx status.
        let detail = resp
            .json::<ErrorResponse>()
            .ok()
            .map(|e| format!(": {}", e.error_message))
            .unwrap_or_default();
        return Err(AppError::provider(format!(
            "FRED request for {series_id} failed with status {status}{detail}"
        )));
    }
    resp.json()
        .map_err(|e| AppError::provider(format!("Failed to parse FRED response for {series_id}: {e}")))
}

fn non_blank(s: String) -> Option<String> {
    let t = s.trim();
    if t.is_empty() { None } else { Some(t.to_string()) }
}

#[derive(Debug, Deserialize)]
struct ObservationsResponse {
    observations: Vec<RawObservation>,
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    seriess: Vec<SeriesInfo>,
}

#[derive(Debug, Deserialize)]
struct SeriesInfo {
    title: String,
    #[serde(default)]
    units: String,
    #[serde(default)]
    frequency: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error_message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn observation_payload_deserializes_with_extra_fields() {
        let json = r#"{
            "realtime_start": "2024-01-01",
            "units": "lin",
            "count": 2,
            "observations": [
                {"realtime_start": "2024-01-01", "realtime_end": "2024-01-01", "date": "2023-01-01", "value": "3.4"},
                {"realtime_start": "2024-01-01", "realtime_end": "2024-01-01", "date": "2023-02-01", "value": "."}
            ]
        }"#;
        let body: ObservationsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.observations.len(), 2);
        assert_eq!(body.observations[1], RawObservation::new("2023-02-01", "."));
    }

    #[test]
    fn series_payload_deserializes() {
        let json = r#"{"seriess": [{"id": "UNRATE", "title": "Unemployment Rate", "units": "Percent", "frequency": "Monthly"}]}"#;
        let body: SeriesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.seriess[0].title, "Unemployment Rate");
        assert_eq!(non_blank(body.seriess[0].units.clone()).as_deref(), Some("Percent"));
        assert_eq!(non_blank("  ".to_string()), None);
    }
}
