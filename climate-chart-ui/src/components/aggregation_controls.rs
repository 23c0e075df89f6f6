//! Group-by granularity and aggregation function selectors.

use crate::bindings::FormControl;
use crate::state::AppState;
use climate_core::filter::{AggFunc, FilterChange, GroupBy};
use dioxus::prelude::*;

#[component]
pub fn AggregationControls() -> Element {
    let mut state = use_context::<AppState>();
    let filter = (state.filter)();

    let on_group_change = move |evt: Event<FormData>| match evt.value().parse::<GroupBy>() {
        Ok(group_by) => state.apply_filter(FilterChange::GroupBy(group_by)),
        Err(e) => log::warn!("{}", e),
    };

    let on_agg_change = move |evt: Event<FormData>| match evt.value().parse::<AggFunc>() {
        Ok(agg_func) => state.apply_filter(FilterChange::AggFunc(agg_func)),
        Err(e) => log::warn!("{}", e),
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                style: "font-weight: bold;",
                "Group by: "
                select {
                    id: FormControl::GroupBy.id(),
                    onchange: on_group_change,
                    for group_by in GroupBy::ALL {
                        option {
                            value: group_by.as_str(),
                            selected: group_by == filter.group_by,
                            "{group_by.display_name()}"
                        }
                    }
                }
            }
            label {
                style: "font-weight: bold;",
                "Aggregation: "
                select {
                    id: FormControl::AggFunc.id(),
                    onchange: on_agg_change,
                    for agg_func in AggFunc::ALL {
                        option {
                            value: agg_func.as_str(),
                            selected: agg_func == filter.agg_func,
                            "{agg_func.label()}"
                        }
                    }
                }
            }
        }
    }
}
