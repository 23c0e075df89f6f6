//! Typed DOM element ids.
//!
//! The markup rendered by the components and the JS calls made by the
//! renderer both take their ids from here. Pages call [`validate_bindings`]
//! once after mount so a missing element shows up as a page error instead of
//! a chart that silently never draws.

use climate_core::endpoint::Endpoint;
use climate_core::kpi::KpiField;

/// A chart container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartSlot {
    DrilldownTemperature,
    DrilldownPrecipitation,
    Summary,
    RollUp,
    TemperatureTrend,
    PrecipitationTrend,
    ExtremeEvents,
    Boxplot,
    TemperatureMap,
    Predictive,
    CorrelationScatter,
    DescriptiveTrend,
    Histogram,
    Correlations,
}

impl ChartSlot {
    pub const ALL: [ChartSlot; 14] = [
        ChartSlot::DrilldownTemperature,
        ChartSlot::DrilldownPrecipitation,
        ChartSlot::Summary,
        ChartSlot::RollUp,
        ChartSlot::TemperatureTrend,
        ChartSlot::PrecipitationTrend,
        ChartSlot::ExtremeEvents,
        ChartSlot::Boxplot,
        ChartSlot::TemperatureMap,
        ChartSlot::Predictive,
        ChartSlot::CorrelationScatter,
        ChartSlot::DescriptiveTrend,
        ChartSlot::Histogram,
        ChartSlot::Correlations,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            ChartSlot::DrilldownTemperature => "chart-temp",
            ChartSlot::DrilldownPrecipitation => "chart-precip",
            ChartSlot::Summary => "chart-summary",
            ChartSlot::RollUp => "chart-rollup",
            ChartSlot::TemperatureTrend => "temperature-chart",
            ChartSlot::PrecipitationTrend => "precipitation-chart",
            ChartSlot::ExtremeEvents => "extreme-events-chart",
            ChartSlot::Boxplot => "boxplot-chart",
            ChartSlot::TemperatureMap => "temperature-map-chart",
            ChartSlot::Predictive => "predictive-chart",
            ChartSlot::CorrelationScatter => "correlation-chart",
            ChartSlot::DescriptiveTrend => "trend-chart",
            ChartSlot::Histogram => "histogram-chart",
            ChartSlot::Correlations => "correlations-chart",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ChartSlot::DrilldownTemperature => "Temperature",
            ChartSlot::DrilldownPrecipitation => "Precipitation",
            ChartSlot::Summary => "Climate indicators",
            ChartSlot::RollUp => "Aggregation by year",
            ChartSlot::TemperatureTrend => "Average temperature by year",
            ChartSlot::PrecipitationTrend => "Precipitation by year",
            ChartSlot::ExtremeEvents => "Extreme weather events by region",
            ChartSlot::Boxplot => "Temperature distribution",
            ChartSlot::TemperatureMap => "Temperature by country",
            ChartSlot::Predictive => "Temperature forecast",
            ChartSlot::CorrelationScatter => "Temperature vs. CO\u{2082}",
            ChartSlot::DescriptiveTrend => "Temperature trend",
            ChartSlot::Histogram => "Temperature histogram",
            ChartSlot::Correlations => "Correlations",
        }
    }

    /// Container for a server-built figure endpoint.
    pub fn for_figure(endpoint: Endpoint) -> Option<ChartSlot> {
        match endpoint {
            Endpoint::TemperatureTrend => Some(ChartSlot::TemperatureTrend),
            Endpoint::PrecipitationTrend => Some(ChartSlot::PrecipitationTrend),
            Endpoint::ExtremeEventsBar => Some(ChartSlot::ExtremeEvents),
            Endpoint::TemperatureBoxplot => Some(ChartSlot::Boxplot),
            Endpoint::TemperatureMap => Some(ChartSlot::TemperatureMap),
            Endpoint::PredictiveTemp => Some(ChartSlot::Predictive),
            Endpoint::CorrelationScatter => Some(ChartSlot::CorrelationScatter),
            _ => None,
        }
    }
}

/// Element holding one KPI tile's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KpiSlot(pub KpiField);

impl KpiSlot {
    pub fn id(&self) -> &'static str {
        match self.0 {
            KpiField::AvgTemp => "kpi-temp",
            KpiField::TotalPrecipitation => "kpi-precip",
            KpiField::ExtremeEvents => "kpi-events",
            KpiField::Co2Level => "kpi-co2",
            KpiField::TempAnomaly => "kpi-anomaly",
            KpiField::ExtremeDays => "kpi-extreme",
            KpiField::SummaryAvgTemp => "summary-temp",
            KpiField::SummaryTotalPrecip => "summary-precip",
            KpiField::SummaryAvgCo2 => "summary-co2",
        }
    }
}

/// Filter form inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormControl {
    StartYear,
    EndYear,
    GroupBy,
    AggFunc,
    ShowTemperature,
    ShowPrecipitation,
}

impl FormControl {
    pub const ALL: [FormControl; 6] = [
        FormControl::StartYear,
        FormControl::EndYear,
        FormControl::GroupBy,
        FormControl::AggFunc,
        FormControl::ShowTemperature,
        FormControl::ShowPrecipitation,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            FormControl::StartYear => "start-year",
            FormControl::EndYear => "end-year",
            FormControl::GroupBy => "group-by",
            FormControl::AggFunc => "agg-func",
            FormControl::ShowTemperature => "show-temp",
            FormControl::ShowPrecipitation => "show-precip",
        }
    }
}

/// Returns the ids from `ids` that are missing from the document.
pub fn missing_elements(ids: &[&'static str]) -> Vec<&'static str> {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return ids.to_vec();
    };
    ids.iter()
        .copied()
        .filter(|id| document.get_element_by_id(id).is_none())
        .collect()
}

/// Checks that every bound element exists, logging the ones that do not.
pub fn validate_bindings(ids: &[&'static str]) -> Result<(), String> {
    let missing = missing_elements(ids);
    if missing.is_empty() {
        log::info!("{} DOM bindings validated", ids.len());
        return Ok(());
    }
    log::error!("missing DOM elements: {:?}", missing);
    Err(format!("Page elements missing: {}", missing.join(", ")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let mut ids: Vec<&str> = ChartSlot::ALL.iter().map(|s| s.id()).collect();
        ids.extend(FormControl::ALL.iter().map(|c| c.id()));
        ids.extend(
            [
                KpiField::AvgTemp,
                KpiField::TotalPrecipitation,
                KpiField::ExtremeEvents,
                KpiField::Co2Level,
                KpiField::TempAnomaly,
                KpiField::ExtremeDays,
                KpiField::SummaryAvgTemp,
                KpiField::SummaryTotalPrecip,
                KpiField::SummaryAvgCo2,
            ]
            .into_iter()
            .map(|f| KpiSlot(f).id()),
        );
        let unique: HashSet<&str> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_every_figure_has_a_slot() {
        for endpoint in Endpoint::FIGURES {
            assert!(ChartSlot::for_figure(endpoint).is_some(), "{endpoint:?}");
        }
        assert_eq!(ChartSlot::for_figure(Endpoint::Kpi), None);
    }
}
