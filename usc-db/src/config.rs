//! Dashboard configuration.
//!
//! The dashboard went through several layouts that differ only in settings:
//! which comparison is shown, which states are drawn, whether a trend year
//! is added, and how the panels are sized. [`DashboardConfig`] captures those
//! settings; its `Default` is the most complete layout.

use serde::{Deserialize, Serialize};
use usc_core::year::{SYNTHETIC_YEAR, YearRange};
use usc_core::Metric;
use usc_data::comparison::ComparisonMode;

/// How the two year inputs are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectorKind {
    #[default]
    Dropdown,
    Slider,
}

/// Size and map extent of one choropleth panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub width: u32,
    pub height: u32,
    /// Visible longitude range (west, east)
    pub lon_range: (f64, f64),
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            width: 550,
            height: 350,
            lon_range: (-130.0, -65.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// One panel row per metric, in this order
    pub metrics: Vec<Metric>,
    pub mode: ComparisonMode,
    /// State abbreviations left off the map (DC is always left off)
    pub excluded_states: Vec<String>,
    /// Year extrapolated from the observed trend, if any
    pub synthetic_year: Option<i32>,
    pub initial_left: i32,
    pub initial_right: i32,
    pub panel: PanelConfig,
    pub selector: SelectorKind,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            metrics: Metric::ALL.to_vec(),
            mode: ComparisonMode::Percent,
            excluded_states: vec!["DC".to_string(), "AK".to_string(), "HI".to_string()],
            synthetic_year: Some(SYNTHETIC_YEAR),
            initial_left: 2013,
            initial_right: 2014,
            panel: PanelConfig::default(),
            selector: SelectorKind::Dropdown,
        }
    }
}

impl DashboardConfig {
    /// The first layout: absolute differences over all states but DC, observed years only.
    pub fn original() -> Self {
        Self {
            mode: ComparisonMode::Absolute,
            excluded_states: vec!["DC".to_string()],
            synthetic_year: None,
            panel: PanelConfig {
                lon_range: (-180.0, -50.0),
                ..PanelConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parse a JSON config; missing fields take their defaults.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Years a user may select.
    pub fn year_range(&self) -> YearRange {
        YearRange::with_synthetic(self.synthetic_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_latest_layout() {
        let config = DashboardConfig::default();
        assert_eq!(config.mode, ComparisonMode::Percent);
        assert_eq!(config.metrics.len(), 3);
        assert_eq!(config.year_range(), YearRange::new(2013, 2018));
        assert!(config.excluded_states.contains(&"HI".to_string()));
    }

    #[test]
    fn original_layout_has_observed_years_only() {
        let config = DashboardConfig::original();
        assert_eq!(config.mode, ComparisonMode::Absolute);
        assert_eq!(config.year_range(), YearRange::new(2013, 2017));
        assert_eq!(config.panel.lon_range, (-180.0, -50.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(
            r#"{"mode": "absolute", "metrics": ["tmax", "median_aqi"], "panel": {"width": 400}}"#,
        )
        .unwrap();
        assert_eq!(config.mode, ComparisonMode::Absolute);
        assert_eq!(config.metrics, vec![Metric::Tmax, Metric::MedianAqi]);
        assert_eq!(config.panel.width, 400);
        assert_eq!(config.panel.height, 350);
        assert_eq!(config.synthetic_year, Some(2018));
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(DashboardConfig::from_json(r#"{"mode": "ratio"}"#).is_err());
    }
}
