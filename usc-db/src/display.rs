//! The display buffer and the metric comparator that fills it.
//!
//! A [`DisplayBuffer`] is everything the map panels draw for one pair of
//! years: state outlines and names, plus for each metric the left-year
//! value, the right-year value and their comparison. Every column is
//! index-aligned to the same state order. Buffers are immutable once built;
//! a selection change produces a new buffer rather than editing the old one.

use crate::Database;
use serde::Serialize;
use serde_json::{Map, Value};
use std::rc::Rc;
use usc_core::{Metric, StateRecord};
use usc_data::comparison::ComparisonMode;

/// Outline and label columns for the drawn states, built once per process.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateShapes {
    pub abbreviation: Vec<String>,
    pub name: Vec<String>,
    /// Longitudes per state, one vector per ring
    pub x: Vec<Vec<Vec<f64>>>,
    /// Latitudes per state, one vector per ring
    pub y: Vec<Vec<Vec<f64>>>,
}

impl StateShapes {
    pub fn from_records(records: &[StateRecord]) -> Self {
        Self {
            abbreviation: records.iter().map(|s| s.abbreviation.clone()).collect(),
            name: records.iter().map(|s| s.name.clone()).collect(),
            x: records.iter().map(StateRecord::lons).collect(),
            y: records.iter().map(StateRecord::lats).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.abbreviation.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abbreviation.is_empty()
    }
}

/// Left, right and comparison values of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricColumns {
    pub metric: Metric,
    pub left: Vec<Option<f64>>,
    pub right: Vec<Option<f64>>,
    pub comparison: Vec<Option<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayBuffer {
    pub left_year: i32,
    pub right_year: i32,
    pub mode: ComparisonMode,
    pub shapes: Rc<StateShapes>,
    pub metrics: Vec<MetricColumns>,
}

impl DisplayBuffer {
    /// Number of states drawn.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// True when every column has one entry per state.
    pub fn is_aligned(&self) -> bool {
        let n = self.len();
        self.shapes.name.len() == n
            && self.shapes.x.len() == n
            && self.shapes.y.len() == n
            && self.metrics.iter().all(|m| {
                m.left.len() == n && m.right.len() == n && m.comparison.len() == n
            })
    }

    pub fn columns(&self, metric: Metric) -> Option<&MetricColumns> {
        self.metrics.iter().find(|m| m.metric == metric)
    }

    /// Flat column map for the chart layer: `x`, `y`, `name`, `abbreviation`
    /// and `<key>_left`, `<key>_right`, `<key>_cmp` per metric. Missing values
    /// become `null`.
    pub fn column_data(&self) -> Map<String, Value> {
        let mut data = Map::new();
        data.insert("x".to_string(), serde_json::json!(self.shapes.x));
        data.insert("y".to_string(), serde_json::json!(self.shapes.y));
        data.insert("name".to_string(), serde_json::json!(self.shapes.name));
        data.insert(
            "abbreviation".to_string(),
            serde_json::json!(self.shapes.abbreviation),
        );
        for columns in &self.metrics {
            let key = columns.metric.key();
            data.insert(format!("{}_left", key), serde_json::json!(columns.left));
            data.insert(format!("{}_right", key), serde_json::json!(columns.right));
            data.insert(format!("{}_cmp", key), serde_json::json!(columns.comparison));
        }
        data
    }
}

impl Database {
    /// Build the display buffer for a pair of years.
    ///
    /// Pure with respect to the combined table: the same arguments always
    /// yield an identical buffer. Years or states absent from the table give
    /// `None` cells rather than errors.
    pub fn compare(
        &self,
        shapes: &Rc<StateShapes>,
        metrics: &[Metric],
        left_year: i32,
        right_year: i32,
        mode: ComparisonMode,
    ) -> anyhow::Result<DisplayBuffer> {
        let mut columns = Vec::with_capacity(metrics.len());
        for &metric in metrics {
            let left = self.query_metric_column(left_year, metric, &shapes.abbreviation)?;
            let right = self.query_metric_column(right_year, metric, &shapes.abbreviation)?;
            let comparison = mode.compare_columns(&left, &right);
            columns.push(MetricColumns {
                metric,
                left,
                right,
                comparison,
            });
        }
        Ok(DisplayBuffer {
            left_year,
            right_year,
            mode,
            shapes: Rc::clone(shapes),
            metrics: columns,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{shapes, table};

    fn bits(buffer: &DisplayBuffer) -> Vec<Option<u64>> {
        buffer
            .metrics
            .iter()
            .flat_map(|m| m.left.iter().chain(&m.right).chain(&m.comparison))
            .map(|v| v.map(f64::to_bits))
            .collect()
    }

    #[test]
    fn columns_are_aligned_to_state_order() {
        let db = table();
        let shapes = shapes();
        let buffer = db
            .compare(&shapes, &Metric::ALL, 2013, 2014, ComparisonMode::Absolute)
            .unwrap();
        assert_eq!(buffer.len(), 4);
        assert!(buffer.is_aligned());
        assert_eq!(buffer.shapes.abbreviation, vec!["AL", "CA", "NV", "WY"]);

        let aqi = buffer.columns(Metric::MedianAqi).unwrap();
        assert_eq!(aqi.left, vec![Some(38.0), Some(48.0), Some(40.0), None]);
        assert_eq!(aqi.comparison, vec![Some(-2.0), Some(2.5), Some(2.0), None]);
    }

    #[test]
    fn missing_values_propagate_as_none() {
        let db = table();
        let buffer = db
            .compare(&shapes(), &Metric::ALL, 2013, 2014, ComparisonMode::Absolute)
            .unwrap();
        let tmax = buffer.columns(Metric::Tmax).unwrap();
        assert_eq!(tmax.right[2], None, "NV has no 2014 tmax");
        assert_eq!(tmax.comparison[2], None);
        assert_eq!(tmax.comparison[3], None, "WY has no data at all");
    }

    #[test]
    fn percent_of_zero_left_is_undefined() {
        let db = table();
        let buffer = db
            .compare(&shapes(), &[Metric::Prcp], 2013, 2014, ComparisonMode::Percent)
            .unwrap();
        let prcp = buffer.columns(Metric::Prcp).unwrap();
        assert_eq!(prcp.left[2], Some(0.0));
        assert_eq!(prcp.comparison[2], None);
        assert!((prcp.comparison[0].unwrap() - 100.0 * 0.5 / 4.5).abs() < 1e-9);
    }

    #[test]
    fn same_year_comparison_is_zero() {
        let db = table();
        let shapes = shapes();
        for year in 2013..=2018 {
            for mode in [ComparisonMode::Absolute, ComparisonMode::Percent] {
                let buffer = db.compare(&shapes, &Metric::ALL, year, year, mode).unwrap();
                for columns in &buffer.metrics {
                    for (left, cmp) in columns.left.iter().zip(&columns.comparison) {
                        match (left, mode) {
                            (None, _) => assert_eq!(*cmp, None),
                            (Some(l), ComparisonMode::Percent) if l.abs() < f64::EPSILON => {
                                assert_eq!(*cmp, None)
                            }
                            _ => assert_eq!(*cmp, Some(0.0)),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn absolute_comparison_is_antisymmetric() {
        let db = table();
        let shapes = shapes();
        for left in 2013..=2018 {
            for right in 2013..=2018 {
                let forward = db
                    .compare(&shapes, &Metric::ALL, left, right, ComparisonMode::Absolute)
                    .unwrap();
                let backward = db
                    .compare(&shapes, &Metric::ALL, right, left, ComparisonMode::Absolute)
                    .unwrap();
                for (f, b) in forward.metrics.iter().zip(&backward.metrics) {
                    for (fv, bv) in f.comparison.iter().zip(&b.comparison) {
                        match (fv, bv) {
                            (Some(fv), Some(bv)) => assert_eq!(*fv, -*bv),
                            (None, None) => {}
                            other => panic!("presence should match both ways: {:?}", other),
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn compare_is_idempotent() {
        let db = table();
        let shapes = shapes();
        let first = db
            .compare(&shapes, &Metric::ALL, 2015, 2018, ComparisonMode::Percent)
            .unwrap();
        let second = db
            .compare(&shapes, &Metric::ALL, 2015, 2018, ComparisonMode::Percent)
            .unwrap();
        assert_eq!(bits(&first), bits(&second));
        assert_eq!(first, second);
    }

    #[test]
    fn synthetic_year_is_comparable() {
        let db = table();
        let buffer = db
            .compare(&shapes(), &[Metric::Tmax], 2017, 2018, ComparisonMode::Absolute)
            .unwrap();
        let tmax = buffer.columns(Metric::Tmax).unwrap();
        assert!(tmax.right[0].is_some());
        assert!(tmax.right[1].is_some());
        assert_eq!(tmax.right[3], None);
    }

    #[test]
    fn column_data_has_expected_keys() {
        let db = table();
        let buffer = db
            .compare(&shapes(), &Metric::ALL, 2013, 2014, ComparisonMode::Percent)
            .unwrap();
        let data = buffer.column_data();
        for key in [
            "x", "y", "name", "abbreviation", "tmax_left", "tmax_right", "tmax_cmp",
            "prcp_left", "prcp_right", "prcp_cmp", "aqi_left", "aqi_right", "aqi_cmp",
        ] {
            assert!(data.contains_key(key), "missing column {}", key);
        }
        assert_eq!(data["aqi_left"][3], Value::Null);
        assert_eq!(data["name"][1], Value::from("California"));
    }

    #[test]
    fn buffers_share_geometry() {
        let db = table();
        let shapes = shapes();
        let a = db
            .compare(&shapes, &Metric::ALL, 2013, 2014, ComparisonMode::Percent)
            .unwrap();
        let b = db
            .compare(&shapes, &Metric::ALL, 2014, 2015, ComparisonMode::Percent)
            .unwrap();
        assert!(Rc::ptr_eq(&a.shapes, &b.shapes));
    }
}
