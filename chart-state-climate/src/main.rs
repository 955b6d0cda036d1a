//! US State Climate Comparison
//!
//! A 3×3 grid of choropleth maps: for each of max temperature,
//! precipitation and air quality, the left-year values, the right-year
//! values and their comparison.
//!
//! Data flow:
//! 1. `build.rs` copies `fixtures/us_states.json` and every
//!    `data/<year>_processed.csv` into OUT_DIR.
//! 2. `include_str!` embeds them into the WASM binary.
//! 3. On mount: load all years into the combined table, extrapolate the
//!    trend year and create the selection controller.
//! 4. On every accepted selection: publish the new buffer's columns and
//!    re-render the nine panels via D3.js.

use dioxus::prelude::*;
use std::rc::Rc;
use usc_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, LoadingSpinner, ModeSelector, YearSelector,
};
use usc_chart_ui::js_bridge;
use usc_chart_ui::panels::{container_id, panel_views, PanelKind};
use usc_chart_ui::state::{AppState, Side};
use usc_core::StateRecord;
use usc_db::{DashboardConfig, Database, SelectionController, StateShapes};

const GEOMETRY_JSON: &str = include_str!(concat!(env!("OUT_DIR"), "/us_states.json"));

const PROCESSED_CSV: [(i32, &str); 5] = [
    (2013, include_str!(concat!(env!("OUT_DIR"), "/2013_processed.csv"))),
    (2014, include_str!(concat!(env!("OUT_DIR"), "/2014_processed.csv"))),
    (2015, include_str!(concat!(env!("OUT_DIR"), "/2015_processed.csv"))),
    (2016, include_str!(concat!(env!("OUT_DIR"), "/2016_processed.csv"))),
    (2017, include_str!(concat!(env!("OUT_DIR"), "/2017_processed.csv"))),
];

const TITLE: &str = "US State Climate Comparison";

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("state-climate-root"))
        .launch(App);
}

/// Build the combined table from the embedded files.
fn build_controller(config: &DashboardConfig) -> anyhow::Result<SelectionController> {
    if GEOMETRY_JSON.trim().is_empty() {
        anyhow::bail!("No state geometry was embedded. Add fixtures/us_states.json and rebuild.");
    }
    let records = StateRecord::parse_geometry_json(GEOMETRY_JSON, &config.excluded_states)?;
    let shapes = Rc::new(StateShapes::from_records(&records));

    let db = Database::new()?;
    let rows = db.load_combined_table(PROCESSED_CSV, config.synthetic_year)?;
    if rows == 0 {
        anyhow::bail!("No processed data was embedded. Run `usc-cli preprocess` and rebuild.");
    }
    log::info!("Loaded {} state-year rows for {} states", rows, shapes.len());

    SelectionController::new(db, shapes, config)
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(|| AppState::new(DashboardConfig::default()));

    // ─── Effect 1: Build the combined table once on mount ───
    use_effect(move || {
        let config = state.config.peek().clone();
        match build_controller(&config) {
            Ok(controller) => {
                state.install(controller);
                js_bridge::init_charts();
            }
            Err(err) => {
                log::error!("Failed to load dashboard data: {}", err);
                state.error_msg.set(Some(err.to_string()));
                state.loading.set(false);
            }
        }
    });

    // ─── Effect 2: Re-render every panel when the buffer is replaced ───
    use_effect(move || {
        let Some(buffer) = (state.buffer)() else {
            return;
        };
        let panel = state.config.peek().panel.clone();

        let columns = serde_json::Value::Object(buffer.column_data()).to_string();
        js_bridge::publish_columns(&columns);
        for view in panel_views(&buffer, &panel) {
            match serde_json::to_string(&view) {
                Ok(config_json) => js_bridge::render_choropleth(&view.container_id, &config_json),
                Err(err) => log::warn!("Skipping panel {}: {}", view.container_id, err),
            }
        }
    });

    let config = state.config.read().clone();

    rsx! {
        div {
            style: "margin: 0 auto; padding: 8px; font-family: system-ui, -apple-system, sans-serif;",

            ChartHeader { title: TITLE.to_string() }

            if let Some(err) = state.error_msg.read().as_ref() {
                ErrorDisplay { message: err.clone() }
            }

            if *state.loading.read() {
                LoadingSpinner {}
            } else if state.controller.read().is_some() {
                div {
                    style: "display: flex; align-items: center; margin: 8px 0 12px 0;",
                    YearSelector { side: Side::Left }
                    YearSelector { side: Side::Right }
                    ModeSelector {}
                }

                for metric in config.metrics.iter().copied() {
                    div {
                        key: "{metric}",
                        style: "display: flex; gap: 8px; margin-bottom: 8px;",
                        for kind in PanelKind::ALL {
                            ChartContainer {
                                id: container_id(metric, kind),
                                width: config.panel.width,
                                height: config.panel.height,
                            }
                        }
                    }
                }
            }
        }
    }
}
