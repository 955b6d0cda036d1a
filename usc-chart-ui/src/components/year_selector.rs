//! Year input for one side of the comparison.

use crate::state::{AppState, Side};
use dioxus::prelude::*;
use usc_db::config::SelectorKind;

#[derive(Props, Clone, PartialEq)]
pub struct YearSelectorProps {
    pub side: Side,
}

/// Dropdown or slider over the configured year range.
#[component]
pub fn YearSelector(props: YearSelectorProps) -> Element {
    let mut state = use_context::<AppState>();
    let side = props.side;
    let kind = state.config.read().selector;
    let range = state
        .controller
        .read()
        .as_ref()
        .map(|controller| controller.range())
        .unwrap_or_else(|| state.config.read().year_range());
    let current = match side {
        Side::Left => (state.left_year)(),
        Side::Right => (state.right_year)(),
    };
    let label = match side {
        Side::Left => "Left year",
        Side::Right => "Right year",
    };

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<i32>() {
        Ok(year) => state.select_year(side, year),
        Err(_) => log::warn!("year selector: ignoring {:?}", evt.value()),
    };

    rsx! {
        label {
            style: "font-weight: bold; margin-right: 16px;",
            "{label}: "
            {match kind {
                SelectorKind::Dropdown => rsx! {
                    select {
                        onchange: on_change,
                        for year in range.years() {
                            option {
                                value: "{year}",
                                selected: year == current,
                                "{year}"
                            }
                        }
                    }
                },
                SelectorKind::Slider => rsx! {
                    input {
                        r#type: "range",
                        min: "{range.first}",
                        max: "{range.last}",
                        step: "1",
                        value: "{current}",
                        onchange: on_change,
                    }
                    span { " {current}" }
                },
            }}
        }
    }
}
