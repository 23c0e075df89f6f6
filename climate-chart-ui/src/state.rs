//! Application state managed via Dioxus context.
//!
//! `AppState` bundles all reactive signals for one page session into a
//! single struct provided via `use_context_provider`. Child components
//! retrieve it with `use_context::<AppState>()`. Pages call
//! [`AppState::teardown`] from `use_drop` so in-flight requests die with the
//! page.

use crate::bindings::{ChartSlot, FormControl};
use crate::js_bridge;
use crate::renderer;
use climate_api::{ApiClient, ApiConfig, RequestSlot};
use climate_core::filter::{FilterChange, FilterState, YearInputs};
use climate_core::kpi::KpiTile;
use climate_core::panel::PanelState;
use climate_core::payload::Prescriptive;
use climate_core::view_model::ChartSpec;
use dioxus::prelude::*;
use std::collections::HashMap;

/// Shared application state for all climate dashboard pages.
#[derive(Clone, Copy)]
pub struct AppState {
    /// Base URL and refresh period
    pub config: Signal<ApiConfig>,
    /// Backend client (None until the page has mounted)
    pub client: Signal<Option<ApiClient>>,
    /// Current, always valid, filter form values
    pub filter: Signal<FilterState>,
    /// Year inputs as typed, committed together on change
    pub year_inputs: Signal<YearInputs>,
    /// Load state of every chart container on the page
    pub charts: Signal<HashMap<ChartSlot, PanelState<ChartSpec>>>,
    /// Headline KPI tiles
    pub kpi: Signal<PanelState<Vec<KpiTile>>>,
    /// Filtered summary tiles (drill-down page)
    pub summary: Signal<PanelState<Vec<KpiTile>>>,
    /// Forecast summary and recommendation cards
    pub prescriptive: Signal<PanelState<Prescriptive>>,
    /// Page-level error (missing DOM bindings, client setup)
    pub error_msg: Signal<Option<String>>,
    /// One cancellable request slot per chart container
    requests: Signal<HashMap<ChartSlot, RequestSlot>>,
}

impl AppState {
    /// Create a new AppState with default signal values.
    pub fn new() -> Self {
        let requests = ChartSlot::ALL
            .iter()
            .map(|slot| (*slot, RequestSlot::new()))
            .collect();
        Self {
            config: Signal::new(ApiConfig::default()),
            client: Signal::new(None),
            filter: Signal::new(FilterState::default()),
            year_inputs: Signal::new(YearInputs::from_filter(&FilterState::default())),
            charts: Signal::new(HashMap::new()),
            kpi: Signal::new(PanelState::Loading),
            summary: Signal::new(PanelState::Loading),
            prescriptive: Signal::new(PanelState::Loading),
            error_msg: Signal::new(None),
            requests: Signal::new(requests),
        }
    }

    /// Build the API client against the page's own origin.
    pub fn connect(&mut self) {
        let config = match js_bridge::page_origin() {
            Some(origin) => ApiConfig::new(origin),
            None => {
                log::warn!("no page origin; using default API address");
                ApiConfig::default()
            }
        };
        match ApiClient::new(&config) {
            Ok(client) => {
                log::info!("API client ready at {}", client.base_url());
                self.client.set(Some(client));
            }
            Err(e) => {
                log::error!("Failed to build API client: {}", e);
                self.error_msg
                    .set(Some(format!("Failed to initialise the API client: {}", e)));
            }
        }
        self.config.set(config);
    }

    /// Apply a selector or toggle edit. A rejected edit raises a blocking
    /// alert and leaves the filter untouched, so no request is issued.
    pub fn apply_filter(&mut self, change: FilterChange) {
        let current = *self.filter.peek();
        match current.apply(change) {
            Ok(next) => {
                if next != current {
                    self.filter.set(next);
                }
            }
            Err(e) => {
                log::warn!("rejected filter change: {}", e);
                js_bridge::alert(&e.to_string());
            }
        }
    }

    /// Commit both year inputs. On rejection the inputs are written back to
    /// the years still in effect, so the form never shows a range that was
    /// not applied.
    pub fn commit_years(&mut self) {
        let current = *self.filter.peek();
        let mut inputs = self.year_inputs.peek().clone();
        let result = inputs.commit(&current);
        match result {
            Ok(next) => {
                if next != current {
                    self.filter.set(next);
                }
            }
            Err(e) => {
                log::warn!("rejected year range: {}", e);
                js_bridge::set_input_value(FormControl::StartYear.id(), &inputs.start);
                js_bridge::set_input_value(FormControl::EndYear.id(), &inputs.end);
                js_bridge::alert(&e.to_string());
            }
        }
        self.year_inputs.set(inputs);
    }

    /// The cancellable request slot for a container.
    pub fn request_slot(&self, slot: ChartSlot) -> RequestSlot {
        self.requests.peek().get(&slot).cloned().unwrap_or_default()
    }

    /// Record a chart's new state and draw it into its container.
    pub fn set_chart(&mut self, slot: ChartSlot, state: PanelState<ChartSpec>) {
        renderer::present(slot, &state);
        self.charts.write().insert(slot, state);
    }

    /// Whether the container is still waiting on its first answer.
    pub fn is_loading(&self, slot: ChartSlot) -> bool {
        matches!(
            self.charts.read().get(&slot),
            None | Some(PanelState::Loading)
        )
    }

    /// Abort every in-flight request and purge drawn charts. Called when
    /// the page unmounts.
    pub fn teardown(&self) {
        for slot in self.requests.peek().values() {
            slot.cancel();
        }
        for slot in self.charts.peek().keys() {
            js_bridge::destroy_chart(slot.id());
        }
        log::info!("page state torn down");
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
