//! Layout of the 3×3 panel grid.
//!
//! Each metric gets one row: the left-year values, the right-year values
//! and their comparison. Value panels in a row share one color domain (the
//! extent over both years) so the two maps are directly comparable;
//! comparison panels use a domain symmetric around zero.

use serde::Serialize;
use usc_core::Metric;
use usc_data::scale::{extent, symmetric_extent};
use usc_db::config::PanelConfig;
use usc_db::DisplayBuffer;

/// Diverging scheme for comparison panels: decreases red, increases blue.
pub const COMPARISON_PALETTE: &str = "RdBu";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelKind {
    Left,
    Right,
    Comparison,
}

impl PanelKind {
    pub const ALL: [PanelKind; 3] = [PanelKind::Left, PanelKind::Right, PanelKind::Comparison];

    /// Suffix of the display column this panel colors by.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            PanelKind::Left => "left",
            PanelKind::Right => "right",
            PanelKind::Comparison => "cmp",
        }
    }
}

/// DOM id of a panel's container div.
pub fn container_id(metric: Metric, kind: PanelKind) -> String {
    format!("panel-{}-{}", metric.key(), kind.column_suffix())
}

/// Everything the choropleth script needs to draw one panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelView {
    pub container_id: String,
    pub title: String,
    /// Display column used for fill color, e.g. `tmax_left`
    pub value_key: String,
    pub units: String,
    /// d3-scale-chromatic scheme name
    pub palette: &'static str,
    /// Flip the scheme so high values take its first color
    pub reverse: bool,
    /// `None` when the column has no values at all
    pub domain: Option<(f64, f64)>,
    pub color_bar: bool,
    pub width: u32,
    pub height: u32,
    pub lon_range: (f64, f64),
}

/// Scheme and direction for value panels: hot is red, clean air is green.
fn value_palette(metric: Metric) -> (&'static str, bool) {
    match metric {
        Metric::Tmax => (metric.palette(), true),
        Metric::Prcp => (metric.palette(), false),
        Metric::MedianAqi => (metric.palette(), true),
    }
}

/// Panel views for a buffer in row-major order (metric rows, then
/// left/right/comparison).
pub fn panel_views(buffer: &DisplayBuffer, panel: &PanelConfig) -> Vec<PanelView> {
    let mut views = Vec::with_capacity(buffer.metrics.len() * 3);
    for columns in &buffer.metrics {
        let metric = columns.metric;
        let both: Vec<Option<f64>> = columns.left.iter().chain(&columns.right).copied().collect();
        let value_domain = extent(&both);
        let (palette, reverse) = value_palette(metric);

        for kind in PanelKind::ALL {
            let (title, units, palette, reverse, domain) = match kind {
                PanelKind::Left => (
                    format!("{} {}", metric.title(), buffer.left_year),
                    metric.units(),
                    palette,
                    reverse,
                    value_domain,
                ),
                PanelKind::Right => (
                    format!("{} {}", metric.title(), buffer.right_year),
                    metric.units(),
                    palette,
                    reverse,
                    value_domain,
                ),
                PanelKind::Comparison => (
                    format!(
                        "{} {} {}-{}",
                        metric.title(),
                        buffer.mode.label(),
                        buffer.left_year,
                        buffer.right_year
                    ),
                    buffer.mode.units(metric.units()),
                    COMPARISON_PALETTE,
                    false,
                    symmetric_extent(&columns.comparison),
                ),
            };
            views.push(PanelView {
                container_id: container_id(metric, kind),
                title,
                value_key: format!("{}_{}", metric.key(), kind.column_suffix()),
                units: units.to_string(),
                palette,
                reverse,
                domain,
                color_bar: kind != PanelKind::Right,
                width: panel.width,
                height: panel.height,
                lon_range: panel.lon_range,
            });
        }
    }
    views
}
