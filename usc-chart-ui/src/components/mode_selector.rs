//! Absolute / percent comparison toggle.

use crate::state::AppState;
use dioxus::prelude::*;
use usc_data::comparison::ComparisonMode;

#[component]
pub fn ModeSelector() -> Element {
    let mut state = use_context::<AppState>();
    let current = (state.mode)();

    let on_change = move |evt: Event<FormData>| match evt.value().parse::<ComparisonMode>() {
        Ok(mode) => state.set_mode(mode),
        Err(err) => log::warn!("mode selector: {}", err),
    };

    rsx! {
        label {
            style: "font-weight: bold;",
            "Compare by: "
            select {
                onchange: on_change,
                for mode in [ComparisonMode::Percent, ComparisonMode::Absolute] {
                    option {
                        value: "{mode}",
                        selected: mode == current,
                        {mode.label()}
                    }
                }
            }
        }
    }
}
