//! Reusable Dioxus RSX components for the state climate dashboard.

mod chart_container;
mod chart_header;
mod error_display;
mod loading_spinner;
mod mode_selector;
mod year_selector;

pub use chart_container::ChartContainer;
pub use chart_header::ChartHeader;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use mode_selector::ModeSelector;
pub use year_selector::YearSelector;
