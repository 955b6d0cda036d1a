//! Shared utility functions for USC crates.

/// File naming conventions for raw and processed data
pub mod paths {
    use std::path::{Path, PathBuf};

    /// State name to abbreviation lookup
    pub const STATES_FILE: &str = "states.csv";

    /// GHCN station inventory
    pub const STATIONS_FILE: &str = "ghcnd-stations.txt";

    /// Directory the dashboard reads processed files from
    pub const PROCESSED_DIR: &str = "data";

    /// EPA annual AQI by county, e.g. `annual_aqi_by_county_2013.csv`
    pub fn aqi_file(year: i32) -> String {
        format!("annual_aqi_by_county_{}.csv", year)
    }

    /// GHCN temperature/precipitation extract, e.g. `2013_tp.csv`
    pub fn climate_file(year: i32) -> String {
        format!("{}_tp.csv", year)
    }

    /// Preprocessor output, e.g. `2013_processed.csv`
    pub fn processed_file(year: i32) -> String {
        format!("{}_processed.csv", year)
    }

    /// Location of a processed file under `data_dir`
    pub fn processed_path(data_dir: &Path, year: i32) -> PathBuf {
        data_dir.join(processed_file(year))
    }

}

/// Formatting of optional metric values for tables and tooltips
pub mod format {
    /// Placeholder for a missing value
    pub const MISSING: &str = "n/a";

    /// Format a value with a fixed number of decimals, or `n/a`
    pub fn format_value(value: Option<f64>, decimals: usize) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{:.*}", decimals, v),
            _ => MISSING.to_string(),
        }
    }

    /// Format a signed change, always showing the sign
    pub fn format_change(value: Option<f64>, decimals: usize, suffix: &str) -> String {
        match value {
            Some(v) if v.is_finite() => format!("{:+.*}{}", decimals, v, suffix),
            _ => MISSING.to_string(),
        }
    }

}
