//! In-memory SQLite database layer for US state climate data.
//!
//! The same [`Database`] serves both halves of the project:
//!
//! - the offline preprocessor loads the raw county AQI and station
//!   observation files plus the two lookup tables, and derives one
//!   per-state summary per year with SQL `AVG ... GROUP BY` joins;
//! - the dashboard loads those per-year summaries into the combined
//!   `state_metrics` table, extends it with an extrapolated year, and reads
//!   per-state columns back out for comparison.
//!
//! # Architecture
//!
//! - `Rc<RefCell<Connection>>` wrapper for interior mutability in single-threaded WASM
//! - In-memory SQLite via `rusqlite` (compiles to WASM via `wasm32-unknown-unknown`)
//! - CSV data passed in as string slices, so consumers can embed it with `include_str!`
//!
//! # Usage
//!
//! ```rust
//! use usc_db::Database;
//! use usc_core::Metric;
//!
//! let db = Database::new().unwrap();
//! db.load_processed_year(2013, "State,Median AQI,prcp,tmax\nCA,48.0,3.5,250.0\n").unwrap();
//! db.load_processed_year(2014, "State,Median AQI,prcp,tmax\nCA,50.0,2.5,255.0\n").unwrap();
//!
//! let states = vec!["CA".to_string()];
//! let column = db.query_metric_column(2014, Metric::Tmax, &states).unwrap();
//! assert_eq!(column, vec![Some(255.0)]);
//! ```
//!
//! # Tables
//!
//! See [`schema::create_schema`] for the full SQL schema.

pub mod config;
pub mod controller;
pub mod display;
mod loader;
pub mod models;
mod queries;
pub mod schema;
#[cfg(test)]
mod test_fixtures;

pub use config::DashboardConfig;
pub use controller::SelectionController;
pub use display::{DisplayBuffer, MetricColumns, StateShapes};

use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

/// In-memory SQLite database holding raw inputs and the combined table.
///
/// Cheaply cloneable (via `Rc`) and suitable for sharing across Dioxus
/// components in a single-threaded WASM environment.
#[derive(Clone)]
pub struct Database {
    conn: Rc<RefCell<Connection>>,
}

impl Database {
    /// Create a new in-memory database with the full schema applied.
    pub fn new() -> anyhow::Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(schema::create_schema())?;
        Ok(Self {
            conn: Rc::new(RefCell::new(conn)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn database_creates_successfully() {
        let db = Database::new();
        assert!(db.is_ok(), "Database should create without errors");
    }

    #[test]
    fn database_is_cloneable() {
        let db = Database::new().unwrap();
        let db2 = db.clone();
        db.load_processed_year(2013, "State,Median AQI,prcp,tmax\nCA,48.0,3.5,250.0\n")
            .unwrap();
        let years = db2.query_years().unwrap();
        assert_eq!(years, vec![2013], "Clone should see same data via shared Rc");
    }

    #[test]
    fn database_starts_empty() {
        let db = Database::new().unwrap();
        assert!(db.query_years().unwrap().is_empty());
    }
}
