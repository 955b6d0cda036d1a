use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three climate metrics compared on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Average daily maximum temperature
    Tmax,
    /// Average precipitation
    Prcp,
    /// Median air quality index, averaged over counties
    MedianAqi,
}

impl Metric {
    pub const ALL: [Metric; 3] = [Metric::Tmax, Metric::Prcp, Metric::MedianAqi];

    /// Column name in the processed CSV.
    pub fn column(&self) -> &'static str {
        match self {
            Metric::Tmax => "tmax",
            Metric::Prcp => "prcp",
            Metric::MedianAqi => "Median AQI",
        }
    }

    /// Short key used to build display column names (`tmax_left`, `aqi_cmp`, ...).
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Tmax => "tmax",
            Metric::Prcp => "prcp",
            Metric::MedianAqi => "aqi",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Metric::Tmax => "Average Max Temperature",
            Metric::Prcp => "Precipitation",
            Metric::MedianAqi => "Air Quality Index",
        }
    }

    pub fn units(&self) -> &'static str {
        match self {
            Metric::Tmax => "F",
            Metric::Prcp => "inches",
            Metric::MedianAqi => "AQI",
        }
    }

    /// D3 color scheme for the left/right value panels.
    pub fn palette(&self) -> &'static str {
        match self {
            Metric::Tmax => "RdBu",
            Metric::Prcp => "Blues",
            Metric::MedianAqi => "BrBG",
        }
    }

    /// GHCN element code for station metrics; AQI has no discriminator.
    pub fn element(&self) -> Option<&'static str> {
        match self {
            Metric::Tmax => Some("TMAX"),
            Metric::Prcp => Some("PRCP"),
            Metric::MedianAqi => None,
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tmax" => Ok(Metric::Tmax),
            "prcp" => Ok(Metric::Prcp),
            "aqi" | "median aqi" | "median_aqi" => Ok(Metric::MedianAqi),
            other => Err(format!("unknown metric: {}", other)),
        }
    }
}
