//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals into a single struct provided via
//! `use_context_provider`. Child components retrieve it with
//! `use_context::<AppState>()`. Year and mode changes go through the
//! [`SelectionController`]; the signals mirror what it accepted.

use dioxus::prelude::*;
use std::rc::Rc;
use usc_data::comparison::ComparisonMode;
use usc_db::{DashboardConfig, DisplayBuffer, SelectionController};

/// Which year input a selector drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

#[derive(Clone, Copy)]
pub struct AppState {
    pub config: Signal<DashboardConfig>,
    /// Selection controller (None until the combined table is loaded)
    pub controller: Signal<Option<SelectionController>>,
    /// Buffer the panels are drawn from
    pub buffer: Signal<Option<Rc<DisplayBuffer>>>,
    pub left_year: Signal<i32>,
    pub right_year: Signal<i32>,
    pub mode: Signal<ComparisonMode>,
    /// Whether the app is still loading
    pub loading: Signal<bool>,
    /// Error message if something went wrong
    pub error_msg: Signal<Option<String>>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        Self {
            left_year: Signal::new(config.initial_left),
            right_year: Signal::new(config.initial_right),
            mode: Signal::new(config.mode),
            config: Signal::new(config),
            controller: Signal::new(None),
            buffer: Signal::new(None),
            loading: Signal::new(true),
            error_msg: Signal::new(None),
        }
    }

    /// Install a freshly built controller and publish its first buffer.
    pub fn install(&mut self, controller: SelectionController) {
        self.left_year.set(controller.left_year());
        self.right_year.set(controller.right_year());
        self.mode.set(controller.mode());
        self.buffer.set(Some(controller.buffer()));
        self.controller.set(Some(controller));
        self.loading.set(false);
    }

    pub fn select_year(&mut self, side: Side, year: i32) {
        self.apply(|controller| match side {
            Side::Left => controller.select_left(year),
            Side::Right => controller.select_right(year),
        });
    }

    pub fn set_mode(&mut self, mode: ComparisonMode) {
        self.apply(|controller| controller.set_mode(mode));
    }

    fn apply<F>(&mut self, change: F)
    where
        F: FnOnce(&mut SelectionController) -> anyhow::Result<Rc<DisplayBuffer>>,
    {
        let outcome = {
            let mut guard = self.controller.write();
            let Some(controller) = guard.as_mut() else {
                return;
            };
            change(controller).map(|buffer| {
                (
                    buffer,
                    controller.left_year(),
                    controller.right_year(),
                    controller.mode(),
                )
            })
        };
        match outcome {
            Ok((buffer, left, right, mode)) => {
                self.left_year.set(left);
                self.right_year.set(right);
                self.mode.set(mode);
                self.buffer.set(Some(buffer));
                self.error_msg.set(None);
            }
            Err(err) => {
                log::warn!("selection rejected: {}", err);
                self.error_msg.set(Some(err.to_string()));
            }
        }
    }
}
