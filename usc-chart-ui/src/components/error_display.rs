//! Error banner.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
}

#[component]
pub fn ErrorDisplay(props: ErrorDisplayProps) -> Element {
    rsx! {
        div {
            role: "alert",
            style: "padding: 8px 12px; margin: 8px 0; background: #FFEBEE; color: #C62828; border-left: 4px solid #C62828;",
            "{props.message}"
        }
    }
}
