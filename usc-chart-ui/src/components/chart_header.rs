//! Dashboard header naming the compared years.

use crate::state::AppState;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartHeaderProps {
    pub title: String,
}

/// Title plus a subtitle describing the current comparison.
#[component]
pub fn ChartHeader(props: ChartHeaderProps) -> Element {
    let state = use_context::<AppState>();
    let left = (state.left_year)();
    let right = (state.right_year)();
    let label = (state.mode)().label();
    let synthetic = state.config.read().synthetic_year;

    rsx! {
        div {
            style: "margin-bottom: 8px;",
            h2 {
                style: "margin: 0 0 4px 0; font-size: 18px;",
                "{props.title}"
            }
            p {
                style: "margin: 0; font-size: 12px; color: #666;",
                "{label}: {left} to {right}"
            }
            if let Some(year) = synthetic {
                p {
                    style: "margin: 0; font-size: 11px; color: #888;",
                    "{year} values are extrapolated from the linear trend of the observed years."
                }
            }
        }
    }
}
