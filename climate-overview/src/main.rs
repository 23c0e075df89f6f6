//! Climate Overview
//!
//! Headline KPI tiles for the latest year plus the seven figures the backend
//! builds itself (trends, extreme events, distribution, map, forecast and the
//! temperature/CO2 scatter).
//!
//! Data flow:
//! 1. On mount the page builds an API client against its own origin and
//!    loads Plotly.
//! 2. Every figure endpoint is fetched independently; each answer (or
//!    failure) lands only in its own container.
//! 3. A page-owned task refreshes `/api/kpi` every five minutes until the
//!    page unmounts.

use climate_api::ApiClient;
use climate_chart_ui::bindings::{validate_bindings, ChartSlot, KpiSlot};
use climate_chart_ui::components::{ChartContainer, ChartHeader, ErrorDisplay, KpiTiles};
use climate_chart_ui::js_bridge;
use climate_chart_ui::state::AppState;
use climate_chart_ui::timer;
use climate_core::endpoint::Endpoint;
use climate_core::error::ApiError;
use climate_core::kpi::{overview_tiles, KpiField};
use climate_core::panel::{PanelState, FORECAST_LOAD_ERROR, FORECAST_NOT_READY, LOAD_ERROR, NO_DATA};
use climate_core::payload::PlotlyFigure;
use climate_core::view_model::{figure_chart, ChartSpec};
use dioxus::prelude::*;

const TILE_FIELDS: [KpiField; 4] = [
    KpiField::AvgTemp,
    KpiField::TotalPrecipitation,
    KpiField::ExtremeEvents,
    KpiField::Co2Level,
];

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("climate-overview-root"))
        .launch(App);
}

/// Maps a figure fetch to its panel. The forecast gets its own texts since
/// it stays empty (or errors) until the model has been trained.
fn figure_panel(endpoint: Endpoint, result: Result<PlotlyFigure, ApiError>) -> PanelState<ChartSpec> {
    let (error_text, empty_text) = match endpoint {
        Endpoint::PredictiveTemp => (FORECAST_LOAD_ERROR, FORECAST_NOT_READY),
        _ => (LOAD_ERROR, NO_DATA),
    };
    PanelState::from_result_or_empty(result, PlotlyFigure::is_empty, error_text, empty_text)
        .map(|figure| figure_chart(&figure))
}

fn figure_slots() -> Vec<ChartSlot> {
    Endpoint::FIGURES
        .iter()
        .filter_map(|e| ChartSlot::for_figure(*e))
        .collect()
}

fn bound_ids() -> Vec<&'static str> {
    figure_slots()
        .iter()
        .map(|slot| slot.id())
        .chain(TILE_FIELDS.iter().map(|f| KpiSlot(*f).id()))
        .collect()
}

async fn refresh_kpi(mut state: AppState, client: &ApiClient) {
    match client.kpi().await {
        Ok(snapshot) => state.kpi.set(PanelState::Ready(overview_tiles(&snapshot))),
        Err(e) => {
            log::error!("Error loading {}: {}", e.path(), e);
            // Keep the last good values on a failed refresh.
            if !state.kpi.peek().is_ready() {
                state.kpi.set(PanelState::Failed(LOAD_ERROR.to_string()));
            }
        }
    }
}

#[component]
fn App() -> Element {
    let mut state = use_context_provider(AppState::new);

    use_hook(move || {
        state.connect();
        js_bridge::init_charts();
    });

    use_drop(move || state.teardown());

    // Containers exist after the first render
    use_effect(move || {
        if let Err(e) = validate_bindings(&bound_ids()) {
            state.error_msg.set(Some(e));
        }
    });

    // Server-built figures, one independent fetch per container
    use_effect(move || {
        let Some(client) = (state.client)() else {
            return;
        };
        for endpoint in Endpoint::FIGURES {
            let Some(slot) = ChartSlot::for_figure(endpoint) else {
                continue;
            };
            let client = client.clone();
            let request = state.request_slot(slot);
            spawn(async move {
                if let Some(result) = request.run(client.figure(endpoint)).await {
                    state.set_chart(slot, figure_panel(endpoint, result));
                }
            });
        }
    });

    // KPI tiles now and every `kpi_refresh` after; dropped with the page
    use_future(move || async move {
        loop {
            let client = state.client.peek().clone();
            if let Some(client) = client {
                refresh_kpi(state, &client).await;
            }
            let every = state.config.peek().kpi_refresh;
            timer::sleep(every).await;
        }
    });

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Climate Overview".to_string(),
                subtitle: "Latest observed year, refreshed every five minutes".to_string(),
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
                for slot in figure_slots() {
                    ChartContainer {
                        key: "{slot.id()}",
                        slot: slot,
                        loading: state.is_loading(slot),
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn failure(path: &str) -> ApiError {
        ApiError::Status {
            path: path.to_string(),
            status: 404,
            message: "Not found".to_string(),
        }
    }

    #[test]
    fn test_forecast_failure_mentions_training() {
        let panel = figure_panel(Endpoint::PredictiveTemp, Err(failure("/api/predictive-temp")));
        assert_eq!(panel.message(), Some(FORECAST_LOAD_ERROR));

        let panel = figure_panel(Endpoint::TemperatureTrend, Err(failure("/api/temperature-trend")));
        assert_eq!(panel.message(), Some(LOAD_ERROR));
    }

    #[test]
    fn test_empty_forecast_is_not_ready() {
        let panel = figure_panel(Endpoint::PredictiveTemp, Ok(PlotlyFigure::default()));
        assert_eq!(panel.message(), Some(FORECAST_NOT_READY));
    }

    #[test]
    fn test_figure_passes_through() {
        let figure = PlotlyFigure {
            data: vec![json!({"type": "bar", "x": ["A"], "y": [3]})],
            layout: json!({"title": "Extreme events"}),
        };
        let panel = figure_panel(Endpoint::ExtremeEventsBar, Ok(figure.clone()));
        let spec = panel.ready().cloned().unwrap();
        assert_eq!(spec.data, figure.data);
        assert_eq!(spec.layout, figure.layout);
    }

    #[test]
    fn test_bound_ids_cover_figures_and_tiles() {
        let ids = bound_ids();
        assert_eq!(ids.len(), 11);
        assert!(ids.contains(&"predictive-chart"));
        assert!(ids.contains(&"kpi-co2"));
    }
}
