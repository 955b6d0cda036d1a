//! Fixed-size container for one choropleth panel.

use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// The DOM id D3 renders into
    pub id: String,
    pub width: u32,
    pub height: u32,
}

#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let style = format!(
        "width: {}px; height: {}px; position: relative;",
        props.width, props.height
    );

    rsx! {
        div {
            id: "{props.id}",
            style: "{style}",
        }
    }
}
