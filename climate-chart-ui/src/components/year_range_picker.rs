//! Start and end year inputs.

use crate::bindings::FormControl;
use crate::state::AppState;
use dioxus::prelude::*;

/// Year range inputs. Typing only updates the draft; on change both inputs
/// are committed as a pair. A reversed range is rejected with an alert and
/// both inputs fall back to the range still in effect.
#[component]
pub fn YearRangePicker() -> Element {
    let mut state = use_context::<AppState>();
    let inputs = (state.year_inputs)();

    let on_start_input = move |evt: Event<FormData>| {
        state.year_inputs.write().start = evt.value();
    };

    let on_end_input = move |evt: Event<FormData>| {
        state.year_inputs.write().end = evt.value();
    };

    let on_commit = move |_: Event<FormData>| {
        state.commit_years();
    };

    rsx! {
        div {
            style: "margin: 8px 0; display: flex; gap: 12px; align-items: center;",
            label {
                r#for: FormControl::StartYear.id(),
                style: "font-weight: bold;",
                "From: "
            }
            input {
                id: FormControl::StartYear.id(),
                r#type: "number",
                value: "{inputs.start}",
                style: "width: 80px;",
                oninput: on_start_input,
                onchange: on_commit,
            }
            label {
                r#for: FormControl::EndYear.id(),
                style: "font-weight: bold;",
                "To: "
            }
            input {
                id: FormControl::EndYear.id(),
                r#type: "number",
                value: "{inputs.end}",
                style: "width: 80px;",
                oninput: on_end_input,
                onchange: on_commit,
            }
        }
    }
}
