//! Climate Analytics
//!
//! Four views over the same data:
//! - descriptive: temperature trend line and histogram
//! - diagnostic: correlation of temperature with the other indicators
//! - predictive: the backend's temperature forecast figure
//! - prescriptive: forecast summary and sector recommendation cards
//!
//! The KPI row adds the temperature anomaly and extreme-day count with
//! badges against the historical average. Every panel is fetched on its own;
//! an error in one leaves the others untouched.

use climate_api::ApiClient;
use climate_chart_ui::bindings::{validate_bindings, ChartSlot, KpiSlot};
use climate_chart_ui::components::{
    ChartContainer, ChartHeader, ErrorDisplay, KpiTiles, RecommendationCards,
};
use climate_chart_ui::js_bridge;
use climate_chart_ui::state::AppState;
use climate_core::endpoint::Endpoint;
use climate_core::error::ApiError;
use climate_core::kpi::{analytics_tiles, KpiField};
use climate_core::panel::{
    PanelState, FORECAST_LOAD_ERROR, FORECAST_NOT_READY, LOAD_ERROR, NO_DATA,
};
use climate_core::payload::{PlotlyFigure, Prescriptive};
use climate_core::view_model::{
    correlation_chart, descriptive_trend_chart, figure_chart, histogram_chart, ChartSpec,
};
use dioxus::prelude::*;
use std::future::Future;

const TILE_FIELDS: [KpiField; 3] = [
    KpiField::AvgTemp,
    KpiField::TempAnomaly,
    KpiField::ExtremeDays,
];

const CHART_SLOTS: [ChartSlot; 4] = [
    ChartSlot::DescriptiveTrend,
    ChartSlot::Histogram,
    ChartSlot::Correlations,
    ChartSlot::Predictive,
];

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("climate-analytics-root"))
        .launch(App);
}

/// Maps a fetch to a chart panel; an empty payload shows [`NO_DATA`].
fn chart_panel<T>(
    result: Result<T, ApiError>,
    is_empty: impl Fn(&T) -> bool,
    build: impl FnOnce(&T) -> ChartSpec,
) -> PanelState<ChartSpec> {
    PanelState::from_result_or_empty(result, is_empty, LOAD_ERROR, NO_DATA).map(|value| build(&value))
}

fn forecast_panel(result: Result<PlotlyFigure, ApiError>) -> PanelState<ChartSpec> {
    PanelState::from_result_or_empty(
        result,
        PlotlyFigure::is_empty,
        FORECAST_LOAD_ERROR,
        FORECAST_NOT_READY,
    )
    .map(|figure| figure_chart(&figure))
}

/// Recommendations are derived from the forecast, so they share its texts.
fn prescriptive_panel(result: Result<Prescriptive, ApiError>) -> PanelState<Prescriptive> {
    PanelState::from_result_or_empty(
        result,
        |p| p.recs.is_empty() && p.forecast_summary.is_empty(),
        FORECAST_LOAD_ERROR,
        FORECAST_NOT_READY,
    )
}

/// Runs `fetch` through the slot's request and draws the outcome.
fn load_chart(
    mut state: AppState,
    slot: ChartSlot,
    fetch: impl Future<Output = PanelState<ChartSpec>> + 'static,
) {
    let request = state.request_slot(slot);
    spawn(async move {
        if let Some(panel) = request.run(fetch).await {
            state.set_chart(slot, panel);
        }
    });
}

fn load_all(mut state: AppState, client: ApiClient) {
    let c = client.clone();
    load_chart(state, ChartSlot::DescriptiveTrend, async move {
        chart_panel(
            c.descriptive_trend().await,
            |t| t.years.is_empty(),
            descriptive_trend_chart,
        )
    });

    let c = client.clone();
    load_chart(state, ChartSlot::Histogram, async move {
        chart_panel(c.histogram().await, |h| h.bins.is_empty(), histogram_chart)
    });

    let c = client.clone();
    load_chart(state, ChartSlot::Correlations, async move {
        chart_panel(c.correlations().await, |r| r.names.is_empty(), correlation_chart)
    });

    let c = client.clone();
    load_chart(state, ChartSlot::Predictive, async move {
        forecast_panel(c.figure(Endpoint::PredictiveTemp).await)
    });

    let c = client.clone();
    spawn(async move {
        let tiles = PanelState::from_result(c.kpi().await, LOAD_ERROR)
            .map(|snapshot| analytics_tiles(&snapshot));
        state.kpi.set(tiles);
    });

    spawn(async move {
        state
            .prescriptive
            .set(prescriptive_panel(client.prescriptive().await));
    });
}

fn bound_ids() -> Vec<&'static str> {
    CHART_SLOTS
        .iter()
        .map(|slot| slot.id())
        .chain(TILE_FIELDS.iter().map(|f| KpiSlot(*f).id()))
        .collect()
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_hook(move || {
        state.connect();
        js_bridge::init_charts();
    });

    use_drop(move || state.teardown());

    use_effect(move || {
        if let Err(e) = validate_bindings(&bound_ids()) {
            state.error_msg.set(Some(e));
        }
    });

    use_effect(move || {
        if let Some(client) = (state.client)() {
            load_all(state, client);
        }
    });

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Climate Analytics".to_string(),
                subtitle: "Descriptive, diagnostic, predictive and prescriptive views".to_string(),
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            }

            KpiTiles {
                tiles: (state.kpi)(),
                fields: TILE_FIELDS.to_vec(),
            }

            div {
                style: "display: grid; grid-template-columns: repeat(auto-fit, minmax(480px, 1fr)); gap: 16px;",
                for slot in CHART_SLOTS {
                    ChartContainer {
                        key: "{slot.id()}",
                        slot: slot,
                        loading: state.is_loading(slot),
                    }
                }
            }

            RecommendationCards { prescriptive: (state.prescriptive)() }
        }
    }
}
