//! Loading functions for populating the in-memory SQLite database.
//!
//! Raw inputs are parsed from string slices and inserted into the
//! corresponding tables. Lines that cannot be parsed are skipped and counted;
//! rows whose keys cannot be resolved to a state are kept here and fall out
//! of the inner joins in the aggregation queries.
//!
//! # CSV Formats
//!
//! - **County AQI** (has headers, EPA export): columns `State`, `County`,
//!   `Median AQI` located by name
//! - **Station observations** (no headers, GHCN-Daily): `station,date,element,value,...`
//! - **Processed year** (has headers): `State,Median AQI,prcp,tmax`

use crate::models::IngestCounts;
use crate::Database;
use anyhow::Context;
use rusqlite::params;
use usc_core::processed::parse_processed_csv;
use usc_core::{ClimateError, Metric, StateNames, StationTable};

/// Whether a GHCN element code is one of the metrics' elements.
fn is_metric_element(element: &str) -> bool {
    Metric::ALL
        .iter()
        .filter_map(Metric::element)
        .any(|code| code == element)
}

impl Database {
    /// Load the state name to abbreviation lookup.
    pub fn load_state_names(&self, names: &StateNames) -> anyhow::Result<()> {
        let conn = self.conn.borrow();
        let mut count = 0u32;
        for (name, abbreviation) in names.iter() {
            conn.execute(
                "INSERT OR REPLACE INTO state_names (name, abbreviation) VALUES (?1, ?2)",
                params![name, abbreviation],
            )?;
            count += 1;
        }
        log::info!("loader: Loaded {} state names", count);
        Ok(())
    }

    /// Load the station to state lookup.
    pub fn load_stations(&self, stations: &StationTable) -> anyhow::Result<()> {
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt =
                tx.prepare("INSERT OR REPLACE INTO stations (station_id, state) VALUES (?1, ?2)")?;
            for (station_id, state) in stations.iter() {
                stmt.execute(params![station_id, state])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} stations", stations.len());
        Ok(())
    }

    /// Load one year of the EPA annual AQI by county export.
    ///
    /// The `State` and `Median AQI` columns are required and located by
    /// header name; `County` is optional. Rows with a non-numeric median are
    /// skipped.
    ///
    /// # Example CSV
    /// ```text
    /// "State","County","Year","Days with AQI","Median AQI"
    /// "Alabama","Baldwin",2013,273,37
    /// ```
    pub fn load_county_aqi(&self, year: i32, csv_data: &str) -> anyhow::Result<IngestCounts> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let headers = rdr.headers()?.clone();
        let position = |name: &str| headers.iter().position(|h| h.trim() == name);
        let state_idx = position("State").ok_or_else(|| {
            ClimateError::InvalidFormat(format!("AQI file for {} has no State column", year))
        })?;
        let median_idx = position(Metric::MedianAqi.column()).ok_or_else(|| {
            ClimateError::InvalidFormat(format!("AQI file for {} has no Median AQI column", year))
        })?;
        let county_idx = position("County");

        let mut counts = IngestCounts::default();
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO county_aqi (year, state_name, county, median_aqi)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let r = match result {
                    Ok(r) => r,
                    Err(_) => {
                        counts.skipped += 1;
                        continue;
                    }
                };
                let state_name = r.get(state_idx).unwrap_or("").trim();
                let county = county_idx.and_then(|i| r.get(i)).unwrap_or("").trim();
                let median: f64 = match r.get(median_idx).and_then(|s| s.trim().parse().ok()) {
                    Some(v) => v,
                    None => {
                        counts.skipped += 1;
                        continue;
                    }
                };
                if state_name.is_empty() {
                    counts.skipped += 1;
                    continue;
                }
                stmt.execute(params![year, state_name, county, median])?;
                counts.loaded += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "loader: Loaded {} county AQI rows for {}, skipped {} malformed",
            counts.loaded,
            year,
            counts.skipped
        );
        Ok(counts)
    }

    /// Load one year of GHCN-Daily station readings.
    ///
    /// Expected format (no headers): `station,date,element,value[,...]`.
    /// Only `TMAX` and `PRCP` readings are stored; lines with fewer than four
    /// fields or a non-numeric value are skipped.
    ///
    /// # Example CSV
    /// ```text
    /// USC00040693,20130101,TMAX,156,,,7,
    /// USC00040693,20130101,PRCP,0,,,7,
    /// ```
    pub fn load_station_observations(
        &self,
        year: i32,
        csv_data: &str,
    ) -> anyhow::Result<IngestCounts> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(csv_data.as_bytes());

        let mut counts = IngestCounts::default();
        let mut other_elements = 0u32;
        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO station_observations (year, station_id, element, value)
                 VALUES (?1, ?2, ?3, ?4)",
            )?;
            for result in rdr.records() {
                let r = match result {
                    Ok(r) if r.len() >= 4 => r,
                    _ => {
                        counts.skipped += 1;
                        continue;
                    }
                };
                let station_id = r.get(0).unwrap_or("").trim();
                // field 1 is the observation date -- the year is implied by the file
                let element = r.get(2).unwrap_or("").trim();
                let value: f64 = match r.get(3).unwrap_or("").trim().parse() {
                    Ok(v) => v,
                    Err(_) => {
                        counts.skipped += 1;
                        continue;
                    }
                };
                if station_id.is_empty() {
                    counts.skipped += 1;
                    continue;
                }
                if !is_metric_element(element) {
                    other_elements += 1;
                    continue;
                }
                stmt.execute(params![year, station_id, element, value])?;
                counts.loaded += 1;
            }
        }
        tx.commit()?;
        log::info!(
            "loader: Loaded {} station readings for {}, skipped {} malformed and {} other elements",
            counts.loaded,
            year,
            counts.skipped,
            other_elements
        );
        Ok(counts)
    }

    /// Load one processed per-state summary into the combined table.
    ///
    /// Expected format (with headers): `State,Median AQI,prcp,tmax`. A state
    /// already present for `year` is replaced, so the table never holds more
    /// than one row per (year, state).
    pub fn load_processed_year(&self, year: i32, csv_data: &str) -> anyhow::Result<usize> {
        let rows = parse_processed_csv(csv_data)
            .with_context(|| format!("parsing processed data for {}", year))?;

        let mut conn = self.conn.borrow_mut();
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO state_metrics (year, state, median_aqi, prcp, tmax, synthetic)
                 VALUES (?1, ?2, ?3, ?4, ?5, 0)",
            )?;
            for row in &rows {
                stmt.execute(params![
                    year,
                    row.state.trim(),
                    row.median_aqi,
                    row.prcp,
                    row.tmax
                ])?;
            }
        }
        tx.commit()?;
        log::info!("loader: Loaded {} state rows for {}", rows.len(), year);
        Ok(rows.len())
    }
}
