//! Chart container bound to a [`ChartSlot`].

use crate::bindings::ChartSlot;
use crate::components::ChartHeader;
use dioxus::prelude::*;

#[derive(Props, Clone, PartialEq)]
pub struct ChartContainerProps {
    /// Which container this is; Plotly renders into `slot.id()`
    pub slot: ChartSlot,
    #[props(default = false)]
    pub loading: bool,
    /// Hidden containers stay mounted so their chart survives a toggle
    #[props(default = true)]
    pub visible: bool,
    #[props(default = String::new())]
    pub subtitle: String,
    #[props(default = 400)]
    pub min_height: u32,
}

#[component]
pub fn ChartContainer(props: ChartContainerProps) -> Element {
    let display = if props.visible { "block" } else { "none" };
    let style = format!(
        "display: {}; min-height: {}px; position: relative; width: 100%; margin-bottom: 24px;",
        display, props.min_height
    );
    let id = props.slot.id();

    rsx! {
        section {
            class: "chart-card",
            style: "{style}",
            ChartHeader {
                title: props.slot.title().to_string(),
                subtitle: props.subtitle.clone(),
            }
            if props.loading {
                div {
                    style: "position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); color: #666;",
                    "Loading chart..."
                }
            }
            div {
                id: "{id}",
                style: "width: 100%;",
            }
        }
    }
}
