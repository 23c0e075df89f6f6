//! Temperature / precipitation visibility checkboxes.

use crate::bindings::FormControl;
use crate::state::AppState;
use climate_core::filter::{FilterChange, Series};
use dioxus::prelude::*;

#[component]
pub fn SeriesToggles() -> Element {
    let mut state = use_context::<AppState>();
    let series = (state.filter)().series;
    let show_temp = series.temperature;
    let show_precip = series.precipitation;

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 16px; align-items: center;",
            label {
                input {
                    id: FormControl::ShowTemperature.id(),
                    r#type: "checkbox",
                    checked: show_temp,
                    onchange: move |_| {
                        state.apply_filter(FilterChange::Series(Series::Temperature, !show_temp));
                    },
                }
                " Temperature"
            }
            label {
                input {
                    id: FormControl::ShowPrecipitation.id(),
                    r#type: "checkbox",
                    checked: show_precip,
                    onchange: move |_| {
                        state.apply_filter(FilterChange::Series(Series::Precipitation, !show_precip));
                    },
                }
                " Precipitation"
            }
        }
    }
}
