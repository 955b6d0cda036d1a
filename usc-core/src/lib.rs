//! Core types for US state climate comparisons.
//!
//! Parsing of the static lookup tables (`states.csv`, `ghcnd-stations.txt`),
//! the state geometry asset and the processed per-year CSV lives here, along
//! with the shared error type.

pub mod error;
pub mod metric;
pub mod processed;
pub mod source;
pub mod state;
pub mod station;
pub mod year;

pub use error::{ClimateError, Result};
pub use metric::Metric;
pub use state::{StateNames, StateRecord};
pub use station::StationTable;
pub use year::YearRange;
