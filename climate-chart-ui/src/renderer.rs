//! Puts a panel's state into its container.
//!
//! Each call touches only the container of `slot` and fully replaces what
//! was there.

use crate::bindings::ChartSlot;
use crate::js_bridge;
use climate_core::panel::PanelState;
use climate_core::view_model::ChartSpec;

pub fn present(slot: ChartSlot, state: &PanelState<ChartSpec>) {
    match state {
        PanelState::Ready(spec) => js_bridge::render_chart(slot.id(), spec),
        PanelState::NotReady(msg) | PanelState::Failed(msg) => {
            js_bridge::show_message(slot.id(), msg)
        }
        // Hidden containers keep their last chart until re-enabled.
        PanelState::Loading | PanelState::Hidden => {}
    }
}
