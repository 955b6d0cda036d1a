/// Error types for the climate data library
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for climate data operations
#[derive(Error, Debug)]
pub enum ClimateError {
    /// A required input file is absent
    #[error("Required input file not found: {}", path.display())]
    MissingFile { path: PathBuf },

    /// Failed to read an input file
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Failed to parse state geometry
    #[error("Failed to parse geometry JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Input is readable but not in the expected shape
    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    /// A selected year lies outside the supported range
    #[error("Year {year} is outside the supported range {min}-{max}")]
    YearOutOfRange { year: i32, min: i32, max: i32 },
}

/// Type alias for Results using ClimateError
pub type Result<T> = std::result::Result<T, ClimateError>;
