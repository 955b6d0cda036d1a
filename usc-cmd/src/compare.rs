//! Headless rendition of the dashboard comparison.

use crate::OutputFormat;
use serde_json::{Map, Value};
use std::path::PathBuf;
use std::rc::Rc;
use usc_core::source::read_required;
use usc_core::{StateRecord, YearRange};
use usc_data::comparison::ComparisonMode;
use usc_db::{DashboardConfig, Database, DisplayBuffer, SelectionController, StateShapes};
use usc_utils::format::{format_change, format_value};
use usc_utils::paths;

pub struct CompareOptions {
    pub left: i32,
    pub right: i32,
    pub mode: Option<ComparisonMode>,
    pub data_dir: PathBuf,
    pub geometry: PathBuf,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
}

/// Load the combined table, compare the two years and render the result.
pub fn run_compare(options: &CompareOptions) -> anyhow::Result<String> {
    let mut config = match &options.config {
        Some(path) => DashboardConfig::from_json(&read_required(path)?)?,
        None => DashboardConfig::default(),
    };
    if let Some(mode) = options.mode {
        config.mode = mode;
    }
    config.initial_left = options.left;
    config.initial_right = options.right;

    let records = StateRecord::parse_geometry_json(
        &read_required(&options.geometry)?,
        &config.excluded_states,
    )?;
    let shapes = Rc::new(StateShapes::from_records(&records));

    let mut sources = Vec::new();
    for year in YearRange::observed().years() {
        let path = paths::processed_path(&options.data_dir, year);
        if path.exists() {
            sources.push((year, read_required(&path)?));
        } else {
            log::warn!("compare: {} not found, {} will be empty", path.display(), year);
        }
    }
    let db = Database::new()?;
    db.load_combined_table(
        sources.iter().map(|(year, text)| (*year, text.as_str())),
        config.synthetic_year,
    )?;

    let controller = SelectionController::new(db, shapes, &config)?;
    let buffer = controller.buffer();
    Ok(match options.format {
        OutputFormat::Table => render_table(&buffer),
        OutputFormat::Json => serde_json::to_string_pretty(&state_rows(&buffer))?,
    })
}

/// One JSON object per state with the left, right and comparison value of
/// each metric.
pub fn state_rows(buffer: &DisplayBuffer) -> Vec<Value> {
    (0..buffer.len())
        .map(|i| {
            let mut row = Map::new();
            row.insert("state".to_string(), Value::from(buffer.shapes.abbreviation[i].clone()));
            row.insert("name".to_string(), Value::from(buffer.shapes.name[i].clone()));
            for columns in &buffer.metrics {
                let key = columns.metric.key();
                row.insert(format!("{}_left", key), Value::from(columns.left[i]));
                row.insert(format!("{}_right", key), Value::from(columns.right[i]));
                row.insert(format!("{}_cmp", key), Value::from(columns.comparison[i]));
            }
            Value::Object(row)
        })
        .collect()
}

/// Aligned text table: one row per state, three columns per metric.
pub fn render_table(buffer: &DisplayBuffer) -> String {
    let suffix = match buffer.mode {
        ComparisonMode::Percent => "%",
        ComparisonMode::Absolute => "",
    };

    let mut header = vec!["State".to_string()];
    for columns in &buffer.metrics {
        let key = columns.metric.key();
        header.push(format!("{} {}", key, buffer.left_year));
        header.push(format!("{} {}", key, buffer.right_year));
        header.push(format!("{} {}", key, buffer.mode.label()));
    }

    let mut rows = vec![header];
    for i in 0..buffer.len() {
        let mut row = vec![buffer.shapes.abbreviation[i].clone()];
        for columns in &buffer.metrics {
            row.push(format_value(columns.left[i], 2));
            row.push(format_value(columns.right[i], 2));
            row.push(format_change(columns.comparison[i], 2, suffix));
        }
        rows.push(row);
    }

    let widths: Vec<usize> = (0..rows[0].len())
        .map(|c| rows.iter().map(|r| r[c].len()).max().unwrap_or(0))
        .collect();

    let mut out = String::new();
    for row in &rows {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(c, (cell, width))| {
                if c == 0 {
                    format!("{:<width$}", cell, width = *width)
                } else {
                    format!("{:>width$}", cell, width = *width)
                }
            })
            .collect();
        out.push_str(line.join("  ").trim_end());
        out.push('\n');
    }
    out
}
