//! Climate Drill-down
//!
//! Temperature and precipitation over a chosen year range, grouped by year,
//! month or day and aggregated with avg/max/min/sum. Below the series charts
//! the page shows summary tiles for the same years, the indicators chart and
//! a per-year roll-up of mean temperature.
//!
//! Data flow:
//! 1. Filter edits go through `AppState::apply_filter`; a reversed year
//!    range is rejected before anything is fetched.
//! 2. Any filter change refetches `/api/dashboard-drilldown`. The request
//!    runs through a `RequestSlot`, so a newer filter aborts the older fetch.
//! 3. Year range changes also refetch `/api/dashboard-data` for the summary
//!    tiles, indicators chart and roll-up.
//! 4. Series toggled off are hidden and not redrawn; with both off nothing
//!    is fetched.

use climate_chart_ui::bindings::{validate_bindings, ChartSlot, FormControl, KpiSlot};
use climate_chart_ui::components::{
    AggregationControls, ChartContainer, ChartHeader, ErrorDisplay, KpiTiles, SeriesToggles,
    YearRangePicker,
};
use climate_chart_ui::js_bridge;
use climate_chart_ui::state::AppState;
use climate_core::error::ApiError;
use climate_core::filter::FilterState;
use climate_core::kpi::{summary_tiles, KpiField, KpiTile};
use climate_core::panel::{PanelState, LOAD_ERROR, NO_DATA};
use climate_core::payload::{DashboardData, DrilldownPayload};
use climate_core::rollup::RollUp;
use climate_core::view_model::{drilldown_charts, rollup_chart, summary_chart, ChartSpec};
use dioxus::prelude::*;

const SUMMARY_FIELDS: [KpiField; 3] = [
    KpiField::SummaryAvgTemp,
    KpiField::SummaryTotalPrecip,
    KpiField::SummaryAvgCo2,
];

fn main() {
    dioxus_logger::init(dioxus_logger::tracing::Level::INFO).expect("failed to init logger");
    dioxus::LaunchBuilder::new()
        .with_cfg(dioxus::web::Config::new().rootname("climate-drilldown-root"))
        .launch(App);
}

/// Panels for the two series charts, in (temperature, precipitation) order.
fn drilldown_panels(
    result: Result<DrilldownPayload, ApiError>,
    filter: &FilterState,
) -> (PanelState<ChartSpec>, PanelState<ChartSpec>) {
    let hidden_or = |visible: bool, state: PanelState<ChartSpec>| {
        if visible {
            state
        } else {
            PanelState::Hidden
        }
    };
    match result {
        Ok(payload) if payload.is_empty() => (
            hidden_or(filter.series.temperature, PanelState::NotReady(NO_DATA.to_string())),
            hidden_or(filter.series.precipitation, PanelState::NotReady(NO_DATA.to_string())),
        ),
        Ok(payload) => {
            let charts = drilldown_charts(&payload, filter);
            let panel = |spec: Option<ChartSpec>| spec.map_or(PanelState::Hidden, PanelState::Ready);
            (panel(charts.temperature), panel(charts.precipitation))
        }
        Err(e) => {
            log::error!("Error loading {}: {}", e.path(), e);
            (
                hidden_or(filter.series.temperature, PanelState::Failed(LOAD_ERROR.to_string())),
                hidden_or(filter.series.precipitation, PanelState::Failed(LOAD_ERROR.to_string())),
            )
        }
    }
}

struct SummaryPanels {
    tiles: PanelState<Vec<KpiTile>>,
    indicators: PanelState<ChartSpec>,
    rollup: PanelState<ChartSpec>,
}

fn summary_panels(result: Result<DashboardData, ApiError>) -> SummaryPanels {
    match result {
        Ok(data) => {
            let rollup = RollUp::from_dashboard_data(&data);
            let rollup = if rollup.is_empty() {
                PanelState::NotReady(NO_DATA.to_string())
            } else {
                PanelState::Ready(rollup_chart(&rollup))
            };
            let indicators = if data.years.is_empty() {
                PanelState::NotReady(NO_DATA.to_string())
            } else {
                PanelState::Ready(summary_chart(&data))
            };
            SummaryPanels {
                tiles: PanelState::Ready(summary_tiles(&data.summary)),
                indicators,
                rollup,
            }
        }
        Err(e) => {
            log::error!("Error loading {}: {}", e.path(), e);
            SummaryPanels {
                tiles: PanelState::Failed(LOAD_ERROR.to_string()),
                indicators: PanelState::Failed(LOAD_ERROR.to_string()),
                rollup: PanelState::Failed(LOAD_ERROR.to_string()),
            }
        }
    }
}

fn bound_ids() -> Vec<&'static str> {
    [
        ChartSlot::DrilldownTemperature,
        ChartSlot::DrilldownPrecipitation,
        ChartSlot::Summary,
        ChartSlot::RollUp,
    ]
    .iter()
    .map(|slot| slot.id())
    .chain(FormControl::ALL.iter().map(|c| c.id()))
    .chain(SUMMARY_FIELDS.iter().map(|f| KpiSlot(*f).id()))
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

    // Series charts follow every filter change
    use_effect(move || {
        let filter = (state.filter)();
        let Some(client) = (state.client)() else {
            return;
        };
        let request = state.request_slot(ChartSlot::DrilldownTemperature);

        if !filter.should_fetch() {
            request.cancel();
            state.set_chart(ChartSlot::DrilldownTemperature, PanelState::Hidden);
            state.set_chart(ChartSlot::DrilldownPrecipitation, PanelState::Hidden);
            return;
        }

        let query = match filter.drilldown_query() {
            Ok(query) => query,
            Err(e) => {
                log::warn!("skipping drill-down fetch: {}", e);
                return;
            }
        };

        spawn(async move {
            log::info!("fetching drill-down for {}", query.to_query_string());
            if let Some(result) = request.run(client.drilldown(&query)).await {
                let (temperature, precipitation) = drilldown_panels(result, &filter);
                state.set_chart(ChartSlot::DrilldownTemperature, temperature);
                state.set_chart(ChartSlot::DrilldownPrecipitation, precipitation);
            }
        });
    });

    // Summary only depends on the year range
    let years = use_memo(move || {
        let filter = (state.filter)();
        (filter.start_year, filter.end_year)
    });

    use_effect(move || {
        let (start_year, end_year) = years();
        let Some(client) = (state.client)() else {
            return;
        };
        let filter = FilterState {
            start_year,
            end_year,
            ..FilterState::default()
        };
        let query = match filter.year_range_query() {
            Ok(query) => query,
            Err(e) => {
                log::warn!("skipping summary fetch: {}", e);
                return;
            }
        };
        let request = state.request_slot(ChartSlot::Summary);

        spawn(async move {
            if let Some(result) = request.run(client.dashboard_data(&query)).await {
                let panels = summary_panels(result);
                state.summary.set(panels.tiles);
                state.set_chart(ChartSlot::Summary, panels.indicators);
                state.set_chart(ChartSlot::RollUp, panels.rollup);
            }
        });
    });

    let filter = (state.filter)();
    let subtitle = format!(
        "{} by {}, {}-{}",
        filter.agg_func.label(),
        filter.group_by.display_name(),
        filter.start_year,
        filter.end_year
    );

    rsx! {
        div {
            style: "max-width: 1200px; margin: 0 auto; padding: 16px; font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;",

            ChartHeader {
                title: "Climate Drill-down".to_string(),
                subtitle: "Explore temperature and precipitation by period".to_string(),
            }

            if let Some(err) = (state.error_msg)() {
                ErrorDisplay { message: err }
            }

            div {
                style: "display: flex; flex-wrap: wrap; gap: 24px; align-items: center; padding: 8px 12px; background: #FAFAFA; border: 1px solid #E0E0E0; border-radius: 4px; margin-bottom: 16px;",
                YearRangePicker {}
                AggregationControls {}
                SeriesToggles {}
            }

            if !filter.should_fetch() {
                p {
                    style: "color: #666;",
                    "Select at least one series to display."
                }
            }

            ChartContainer {
                slot: ChartSlot::DrilldownTemperature,
                loading: state.is_loading(ChartSlot::DrilldownTemperature),
                visible: filter.series.temperature,
                subtitle: subtitle.clone(),
            }
            ChartContainer {
                slot: ChartSlot::DrilldownPrecipitation,
                loading: state.is_loading(ChartSlot::DrilldownPrecipitation),
                visible: filter.series.precipitation,
                subtitle: subtitle.clone(),
            }

            KpiTiles {
                tiles: (state.summary)(),
                fields: SUMMARY_FIELDS.to_vec(),
            }

            ChartContainer {
                slot: ChartSlot::Summary,
                loading: state.is_loading(ChartSlot::Summary),
            }
            ChartContainer {
                slot: ChartSlot::RollUp,
                loading: state.is_loading(ChartSlot::RollUp),
                min_height: 320,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_core::filter::{Series, SeriesVisibility};
    use climate_core::payload::DashboardSummary;

    fn payload() -> DrilldownPayload {
        DrilldownPayload {
            labels: vec!["2000".into(), "2001".into()],
            temperatures: vec![Some(14.1), Some(14.4)],
            precipitation: vec![Some(800.0), Some(760.5)],
        }
    }

    fn failure() -> ApiError {
        ApiError::Transport {
            path: "/api/dashboard-drilldown".to_string(),
            reason: "connection reset".to_string(),
        }
    }

    #[test]
    fn test_both_series_render() {
        let (temperature, precipitation) = drilldown_panels(Ok(payload()), &FilterState::default());
        assert!(temperature.is_ready());
        assert!(precipitation.is_ready());
    }

    #[test]
    fn test_hidden_series_stays_hidden() {
        let mut filter = FilterState::default();
        filter.series.set(Series::Precipitation, false);

        let (temperature, precipitation) = drilldown_panels(Ok(payload()), &filter);
        assert!(temperature.is_ready());
        assert_eq!(precipitation, PanelState::Hidden);

        let (temperature, precipitation) = drilldown_panels(Err(failure()), &filter);
        assert_eq!(temperature.message(), Some(LOAD_ERROR));
        assert_eq!(precipitation, PanelState::Hidden);
    }

    #[test]
    fn test_empty_payload_shows_no_data() {
        let filter = FilterState {
            series: SeriesVisibility {
                temperature: true,
                precipitation: false,
            },
            ..FilterState::default()
        };
        let (temperature, _) = drilldown_panels(Ok(DrilldownPayload::default()), &filter);
        assert_eq!(temperature.message(), Some(NO_DATA));
    }

    #[test]
    fn test_summary_panels() {
        let data = DashboardData {
            summary: DashboardSummary {
                avg_temp: Some(14.5),
                total_precip: Some(1560.5),
                avg_co2: Some(370.0),
            },
            years: vec![2000, 2000, 2001],
            temperatures: vec![Some(10.0), Some(20.0), Some(30.0)],
            precipitation: vec![Some(1.0), Some(2.0), Some(3.0)],
            co2_levels: vec![Some(369.0), Some(370.0), Some(371.0)],
        };
        let panels = summary_panels(Ok(data));
        let tiles = panels.tiles.ready().cloned().unwrap_or_default();
        assert_eq!(tiles.len(), 3);
        assert_eq!(tiles[0].text, "14.5 \u{b0}C");
        assert!(panels.indicators.is_ready());
        assert!(panels.rollup.is_ready());
    }

    #[test]
    fn test_summary_failure_fails_every_panel() {
        let panels = summary_panels(Err(failure()));
        assert_eq!(panels.tiles.message(), Some(LOAD_ERROR));
        assert_eq!(panels.indicators.message(), Some(LOAD_ERROR));
        assert_eq!(panels.rollup.message(), Some(LOAD_ERROR));
    }

    #[test]
    fn test_bound_ids() {
        let ids = bound_ids();
        assert!(ids.contains(&"chart-temp"));
        assert!(ids.contains(&"agg-func"));
        assert!(ids.contains(&"summary-co2"));
    }
}
