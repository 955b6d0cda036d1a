//! Offline aggregation of raw inputs into per-state, per-year summaries.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use usc_core::processed::write_processed_csv;
use usc_core::source::{read_required, read_required_or_gzip};
use usc_core::{StateNames, StationTable, YearRange};
use usc_db::Database;
use usc_utils::paths;

pub struct PreprocessOptions {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub years: YearRange,
}

/// Run the preprocessor, returning the paths written.
///
/// Every input for every requested year is read before anything is
/// written, so a missing file aborts without leaving partial output.
pub fn run_preprocess(options: &PreprocessOptions) -> anyhow::Result<Vec<PathBuf>> {
    let data_dir = &options.data_dir;

    let names = StateNames::parse_states_csv(&read_required(&data_dir.join(paths::STATES_FILE))?)?;
    let inventory = read_required(&data_dir.join(paths::STATIONS_FILE))?;
    let stations = StationTable::parse_station_inventory(&inventory, &names);
    log::info!(
        "preprocess: {} state names, {} stations mapped to states",
        names.len(),
        stations.len()
    );

    let mut inputs = Vec::with_capacity(options.years.len());
    for year in options.years.years() {
        let aqi = read_required(&data_dir.join(paths::aqi_file(year)))?;
        let climate = read_required_or_gzip(&data_dir.join(paths::climate_file(year)))?;
        inputs.push((year, aqi, climate));
    }

    let db = Database::new()?;
    db.load_state_names(&names)?;
    db.load_stations(&stations)?;

    fs::create_dir_all(&options.output_dir)?;
    let mut written = Vec::with_capacity(inputs.len());
    for (year, aqi, climate) in inputs {
        db.load_county_aqi(year, &aqi)?;
        db.load_station_observations(year, &climate)?;

        let unmapped_counties = db.count_unmapped_counties(year)?;
        let unmapped_readings = db.count_unmapped_readings(year)?;
        if unmapped_counties > 0 || unmapped_readings > 0 {
            log::info!(
                "preprocess: {} dropped {} county rows with unknown state names and {} readings from unknown stations",
                year,
                unmapped_counties,
                unmapped_readings
            );
        }

        let rows = db.aggregate_year(year)?;
        let path = options.output_dir.join(paths::processed_file(year));
        write_processed_csv(&rows, BufWriter::new(File::create(&path)?))?;
        log::info!("preprocess: wrote {} states to {}", rows.len(), path.display());
        written.push(path);
    }
    Ok(written)
}
