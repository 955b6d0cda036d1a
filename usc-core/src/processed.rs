//! The per-state, per-year summary CSV written by the preprocessor and
//! read by the dashboard.
//!
//! Header: `State,Median AQI,prcp,tmax`. Column names are a compatibility
//! contract; readers match them by name, so extra columns and a different
//! column order are tolerated. Empty cells mean "no data".

use crate::error::Result;
use crate::metric::Metric;
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// One row of a `<year>_processed.csv` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedRow {
    #[serde(rename = "State")]
    pub state: String,
    #[serde(rename = "Median AQI")]
    pub median_aqi: Option<f64>,
    pub prcp: Option<f64>,
    pub tmax: Option<f64>,
}

impl ProcessedRow {
    pub fn value(&self, metric: Metric) -> Option<f64> {
        match metric {
            Metric::Tmax => self.tmax,
            Metric::Prcp => self.prcp,
            Metric::MedianAqi => self.median_aqi,
        }
    }
}

/// Parse a processed CSV string.
pub fn parse_processed_csv(csv_object: &str) -> Result<Vec<ProcessedRow>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(csv_object.as_bytes());
    let mut rows = Vec::new();
    for row in rdr.deserialize() {
        let row: ProcessedRow = row?;
        rows.push(row);
    }
    Ok(rows)
}

/// Write rows with the canonical header. Floats use the shortest
/// representation that parses back to the same value.
pub fn write_processed_csv<W: Write>(rows: &[ProcessedRow], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(true).from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    if rows.is_empty() {
        wtr.write_record(["State", "Median AQI", "prcp", "tmax"])?;
    }
    wtr.flush()?;
    Ok(())
}
