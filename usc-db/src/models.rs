//! Query result model structs.
//!
//! All structs derive `Serialize` so they can be passed to D3.js as JSON
//! from the Dioxus WASM frontend, or printed by the CLI.

use serde::Serialize;
use usc_core::processed::ProcessedRow;
use usc_core::Metric;

/// One row of the combined table: a state's metrics for one year.
///
/// Missing measurements stay `None`; a state with no row for a year is
/// simply absent from that year's query results.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StateYearMetrics {
    pub year: i32,
    /// Two-letter state abbreviation.
    pub state: String,
    pub median_aqi: Option<f64>,
    pub prcp: Option<f64>,
    pub tmax: Option<f64>,
    /// True for rows extrapolated from the observed trend.
    pub synthetic: bool,
}

impl StateYearMetrics {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Tmax => self.tmax,
            Metric::Prcp => self.prcp,
            Metric::MedianAqi => self.median_aqi,
        }
    }
}

impl From<StateYearMetrics> for ProcessedRow {
    fn from(row: StateYearMetrics) -> Self {
        ProcessedRow {
            state: row.state,
            median_aqi: row.median_aqi,
            prcp: row.prcp,
            tmax: row.tmax,
        }
    }
}

/// Row counts for one raw input year, used for preprocessor logging.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct IngestCounts {
    /// Rows stored.
    pub loaded: u32,
    /// Rows skipped as malformed or out of scope.
    pub skipped: u32,
}
