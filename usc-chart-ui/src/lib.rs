//! Shared Dioxus components and D3.js bridge for the state climate dashboard.
//!
//! This crate provides:
//! - `js_bridge`: Rust wrappers for the D3.js choropleth via `js_sys::eval()`
//! - `panels`: per-panel titles, color schemes and domains for a display buffer
//! - `state`: Reactive AppState with Dioxus Signals
//! - `components`: Reusable RSX components (year/mode selectors, containers, etc.)

pub mod components;
pub mod js_bridge;
pub mod panels;
pub mod state;
