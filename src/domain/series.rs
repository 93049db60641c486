//! Series selection and run configuration.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use super::types::DateWindow;

/// Maximum number of series overlaid on one chart.
pub const MAX_SERIES: usize = 3;

/// Default `observation_start` passed to FRED.
pub const DEFAULT_OBSERVATION_START: &str = "1950-01-01";

/// Derived transforms a series can opt into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Transform {
    /// Month-over-month change compounded to an annual rate, in percent.
    Annualized,
}

impl Transform {
    pub const ALL: [Transform; 1] = [Transform::Annualized];

    pub fn suffix(self) -> &'static str {
        match self {
            Transform::Annualized => "annualized",
        }
    }

    /// Units label that replaces the source series' units.
    pub fn units_label(self) -> &'static str {
        match self {
            Transform::Annualized => "Percent change at annual rate (m/m)",
        }
    }

    pub fn title_suffix(self) -> &'static str {
        match self {
            Transform::Annualized => " (annualized m/m %)",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        Transform::ALL
            .into_iter()
            .find(|t| t.suffix().eq_ignore_ascii_case(raw))
    }
}

/// A requested series: a FRED id plus an optional transform.
///
/// Written as `ID` or `ID:annualized` on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesSpec {
    pub id: String,
    pub transform: Option<Transform>,
}

impl SeriesSpec {
    pub fn plain(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transform: None,
        }
    }

    pub fn transformed(id: impl Into<String>, transform: Transform) -> Self {
        Self {
            id: id.into(),
            transform: Some(transform),
        }
    }

    /// Identifier used for the series inside a merged bundle.
    pub fn key(&self) -> String {
        self.to_string()
    }

    /// Human-readable label from the preset catalog, if this spec is a preset.
    pub fn preset_label(&self) -> Option<&'static str> {
        let key = self.key();
        PRESETS.iter().find(|p| p.spec == key).map(|p| p.label)
    }
}

impl fmt::Display for SeriesSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.transform {
            Some(t) => write!(f, "{}:{}", self.id, t.suffix()),
            None => write!(f, "{}", self.id),
        }
    }
}

impl FromStr for SeriesSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (id, transform) = match s.split_once(':') {
            Some((id, suffix)) => {
                let t = Transform::parse(suffix.trim())
                    .ok_or_else(|| format!("unknown transform '{suffix}' (expected: annualized)"))?;
                (id.trim(), Some(t))
            }
            None => (s, None),
        };
        if id.is_empty() {
            return Err("series id must not be empty".to_string());
        }
        if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(format!("invalid FRED series id '{id}'"));
        }
        Ok(Self {
            id: id.to_ascii_uppercase(),
            transform,
        })
    }
}

/// A curated series shown in `fo list` and cycled through in the TUI.
#[derive(Debug, Clone, Copy)]
pub struct SeriesPreset {
    pub spec: &'static str,
    pub label: &'static str,
}

pub const PRESETS: &[SeriesPreset] = &[
    SeriesPreset { spec: "GDP", label: "Gross Domestic Product" },
    SeriesPreset { spec: "UNRATE", label: "Unemployment Rate" },
    SeriesPreset { spec: "CPIAUCSL", label: "Consumer Price Index (CPI-U, All Items)" },
    SeriesPreset { spec: "CPIAUCSL:annualized", label: "CPI inflation (annualized m/m)" },
    SeriesPreset { spec: "FEDFUNDS", label: "Federal Funds Effective Rate" },
    SeriesPreset { spec: "PCE", label: "Personal Consumption Expenditures" },
    SeriesPreset { spec: "PAYEMS", label: "All Employees: Total Nonfarm Payrolls" },
    SeriesPreset { spec: "DGS10", label: "10-Year Treasury Constant Maturity Rate" },
];

/// Everything a front-end needs to build and display one chart.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub series: Vec<SeriesSpec>,
    pub window: DateWindow,
    pub dual_axis: bool,
    pub observation_start: String,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            series: vec![SeriesSpec::plain("UNRATE")],
            window: DateWindow::unbounded(),
            dual_axis: false,
            observation_start: DEFAULT_OBSERVATION_START.to_string(),
            plot_width: 100,
            plot_height: 25,
            export: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_and_transformed_specs() {
        let plain: SeriesSpec = "unrate".parse().unwrap();
        assert_eq!(plain, SeriesSpec::plain("UNRATE"));

        let ann: SeriesSpec = "CPIAUCSL:Annualized".parse().unwrap();
        assert_eq!(ann, SeriesSpec::transformed("CPIAUCSL", Transform::Annualized));
        assert_eq!(ann.key(), "CPIAUCSL:annualized");
    }

    #[test]
    fn rejects_bad_specs() {
        assert!("".parse::<SeriesSpec>().is_err());
        assert!("GDP:yoy".parse::<SeriesSpec>().is_err());
        assert!("GDP/X".parse::<SeriesSpec>().is_err());
    }

    #[test]
    fn every_preset_parses_back_to_itself() {
        for preset in PRESETS {
            let spec: SeriesSpec = preset.spec.parse().unwrap();
            assert_eq!(spec.key(), preset.spec);
            assert_eq!(spec.preset_label(), Some(preset.label));
        }
    }
}
