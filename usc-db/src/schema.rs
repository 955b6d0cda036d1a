//! SQL schema definitions for the in-memory SQLite database.
//!
//! The schema is applied as a single batch when the database is initialized.

/// Returns the full SQL schema as a single batch string.
///
/// **Lookup tables:**
/// - `state_names` - full state name to two-letter abbreviation
/// - `stations` - GHCN station id to state abbreviation
///
/// **Raw tables (preprocessor):**
/// - `county_aqi` - one row per county and year from the EPA annual AQI files
/// - `station_observations` - TMAX/PRCP readings per station and year
///
/// **Combined table (dashboard):**
/// - `state_metrics` - one row per (year, state); `synthetic` marks
///   extrapolated rows
pub fn create_schema() -> &'static str {
    r#"
    CREATE TABLE IF NOT EXISTS state_names (
        name TEXT PRIMARY KEY,
        abbreviation TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS stations (
        station_id TEXT PRIMARY KEY,
        state TEXT NOT NULL
    );

    CREATE TABLE IF NOT EXISTS county_aqi (
        year INTEGER NOT NULL,
        state_name TEXT NOT NULL,
        county TEXT NOT NULL,
        median_aqi REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_aqi_year ON county_aqi(year);

    CREATE TABLE IF NOT EXISTS station_observations (
        year INTEGER NOT NULL,
        station_id TEXT NOT NULL,
        element TEXT NOT NULL,
        value REAL NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_station_obs_year ON station_observations(year, element);

    CREATE TABLE IF NOT EXISTS state_metrics (
        year INTEGER NOT NULL,
        state TEXT NOT NULL,
        median_aqi REAL,
        prcp REAL,
        tmax REAL,
        synthetic INTEGER NOT NULL DEFAULT 0,
        PRIMARY KEY (year, state)
    );
    CREATE INDEX IF NOT EXISTS idx_metrics_state ON state_metrics(state);
    "#
}
