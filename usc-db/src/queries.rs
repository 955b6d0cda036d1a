//! Typed query methods for the preprocessor aggregation and the combined table.
//!
//! # Join policy
//!
//! County rows whose state name is not in `state_names`, and readings whose
//! station is not in `stations`, never reach an aggregate: both are joined
//! with `INNER JOIN`. The climate aggregate is then `LEFT JOIN`ed onto the
//! AQI aggregate, so a state with AQI data but no station readings keeps
//! NULL climate fields, and a state with station readings but no AQI rows
//! produces no row at all.

use crate::models::StateYearMetrics;
use crate::Database;
use rusqlite::params;
use std::collections::{BTreeMap, HashMap};
use usc_core::processed::ProcessedRow;
use usc_core::Metric;
use usc_data::regression::extrapolate;

impl Database {
    // ───────────────────── Preprocessor Queries ─────────────────────

    /// Aggregate one raw year into per-state means, ordered by state.
    pub fn aggregate_year(&self, year: i32) -> anyhow::Result<Vec<ProcessedRow>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "WITH aqi AS (
                 SELECT n.abbreviation AS state, AVG(a.median_aqi) AS median_aqi
                 FROM county_aqi a
                 INNER JOIN state_names n ON a.state_name = n.name
                 WHERE a.year = ?1
                 GROUP BY n.abbreviation
             ),
             climate AS (
                 SELECT s.state AS state,
                        AVG(CASE WHEN o.element = 'PRCP' THEN o.value END) AS prcp,
                        AVG(CASE WHEN o.element = 'TMAX' THEN o.value END) AS tmax
                 FROM station_observations o
                 INNER JOIN stations s ON o.station_id = s.station_id
                 WHERE o.year = ?1
                 GROUP BY s.state
             )
             SELECT aqi.state, aqi.median_aqi, climate.prcp, climate.tmax
             FROM aqi
             LEFT JOIN climate ON aqi.state = climate.state
             ORDER BY aqi.state",
        )?;
        let rows = stmt
            .query_map(params![year], |row| {
                Ok(ProcessedRow {
                    state: row.get(0)?,
                    median_aqi: row.get(1)?,
                    prcp: row.get(2)?,
                    tmax: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::info!(
            "query: aggregate_year({}) returned {} states",
            year,
            rows.len()
        );
        Ok(rows)
    }

    /// Count raw county rows for `year` whose state name has no abbreviation.
    pub fn count_unmapped_counties(&self, year: i32) -> anyhow::Result<u32> {
        let conn = self.conn.borrow();
        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM county_aqi a
             LEFT JOIN state_names n ON a.state_name = n.name
             WHERE a.year = ?1 AND n.abbreviation IS NULL",
            params![year],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    /// Count raw station readings for `year` whose station is not in the station table.
    pub fn count_unmapped_readings(&self, year: i32) -> anyhow::Result<u32> {
        let conn = self.conn.borrow();
        let count: u32 = conn.query_row(
            "SELECT COUNT(*) FROM station_observations o
             LEFT JOIN stations s ON o.station_id = s.station_id
             WHERE o.year = ?1 AND s.state IS NULL",
            params![year],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ───────────────────── Combined Table Queries ─────────────────────

    /// Years present in the combined table, ascending.
    pub fn query_years(&self) -> anyhow::Result<Vec<i32>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare("SELECT DISTINCT year FROM state_metrics ORDER BY year")?;
        let years = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<i32>, _>>()?;
        Ok(years)
    }

    /// All state rows for one year, ordered by state.
    pub fn query_year_metrics(&self, year: i32) -> anyhow::Result<Vec<StateYearMetrics>> {
        let conn = self.conn.borrow();
        let mut stmt = conn.prepare(
            "SELECT year, state, median_aqi, prcp, tmax, synthetic
             FROM state_metrics
             WHERE year = ?1
             ORDER BY state",
        )?;
        let rows = stmt
            .query_map(params![year], |row| {
                Ok(StateYearMetrics {
                    year: row.get(0)?,
                    state: row.get(1)?,
                    median_aqi: row.get(2)?,
                    prcp: row.get(3)?,
                    tmax: row.get(4)?,
                    synthetic: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        log::debug!(
            "query: query_year_metrics({}) returned {} records",
            year,
            rows.len()
        );
        Ok(rows)
    }

    /// One metric for one year, index-aligned to `states`.
    ///
    /// States without a row for `year`, or without a value for the metric,
    /// give `None`.
    pub fn query_metric_column(
        &self,
        year: i32,
        metric: Metric,
        states: &[String],
    ) -> anyhow::Result<Vec<Option<f64>>> {
        let by_state: HashMap<String, StateYearMetrics> = self
            .query_year_metrics(year)?
            .into_iter()
            .map(|row| (row.state.clone(), row))
            .collect();
        Ok(states
            .iter()
            .map(|state| by_state.get(state).and_then(|row| row.value(metric)))
            .collect())
    }

    /// Extend the combined table with an extrapolated year.
    ///
    /// For every state, each metric is fitted independently with a
    /// least-squares line over that state's observed (non-synthetic) years
    /// and evaluated at `target_year`. States whose metrics all lack enough
    /// points get no row. Observed rows for `target_year` are never
    /// overwritten, and repeated calls add nothing new.
    ///
    /// Returns the number of synthetic rows inserted.
    pub fn append_synthetic_year(&self, target_year: i32) -> anyhow::Result<usize> {
        let mut series: BTreeMap<String, Vec<StateYearMetrics>> = BTreeMap::new();
        {
            let conn = self.conn.borrow();
            let mut stmt = conn.prepare(
                "SELECT year, state, median_aqi, prcp, tmax, synthetic
                 FROM state_metrics
                 WHERE synthetic = 0 AND year <> ?1
                 ORDER BY state, year",
            )?;
            let rows = stmt
                .query_map(params![target_year], |row| {
                    Ok(StateYearMetrics {
                        year: row.get(0)?,
                        state: row.get(1)?,
                        median_aqi: row.get(2)?,
                        prcp: row.get(3)?,
                        tmax: row.get(4)?,
                        synthetic: row.get(5)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;
            for row in rows {
                series.entry(row.state.clone()).or_default().push(row);
            }
        }

        let fit = |rows: &[StateYearMetrics], metric: Metric| {
            let points: Vec<(i32, Option<f64>)> =
                rows.iter().map(|r| (r.year, r.value(metric))).collect();
            extrapolate(&points, target_year)
        };

        let conn = self.conn.borrow();
        let mut inserted = 0usize;
        for (state, rows) in &series {
            let median_aqi = fit(rows.as_slice(), Metric::MedianAqi);
            let prcp = fit(rows.as_slice(), Metric::Prcp);
            let tmax = fit(rows.as_slice(), Metric::Tmax);
            if median_aqi.is_none() && prcp.is_none() && tmax.is_none() {
                continue;
            }
            inserted += conn.execute(
                "INSERT OR IGNORE INTO state_metrics (year, state, median_aqi, prcp, tmax, synthetic)
                 VALUES (?1, ?2, ?3, ?4, ?5, 1)",
                params![target_year, state, median_aqi, prcp, tmax],
            )?;
        }
        log::info!(
            "query: append_synthetic_year({}) inserted {} rows",
            target_year,
            inserted
        );
        Ok(inserted)
    }
}
