//! Backend endpoints consumed by the dashboards.

use crate::filter::Query;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    DashboardDrilldown,
    DashboardData,
    Kpi,
    TemperatureTrend,
    PrecipitationTrend,
    ExtremeEventsBar,
    TemperatureBoxplot,
    TemperatureMap,
    PredictiveTemp,
    CorrelationScatter,
    DescriptiveTrend,
    DescriptiveHistogram,
    DiagnosticCorrelations,
    Prescriptive,
}

impl Endpoint {
    /// Endpoints answering with a ready-made `{data, layout}` figure.
    pub const FIGURES: [Endpoint; 7] = [
        Endpoint::TemperatureTrend,
        Endpoint::PrecipitationTrend,
        Endpoint::ExtremeEventsBar,
        Endpoint::TemperatureBoxplot,
        Endpoint::TemperatureMap,
        Endpoint::PredictiveTemp,
        Endpoint::CorrelationScatter,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::DashboardDrilldown => "/api/dashboard-drilldown",
            Endpoint::DashboardData => "/api/dashboard-data",
            Endpoint::Kpi => "/api/kpi",
            Endpoint::TemperatureTrend => "/api/temperature-trend",
            Endpoint::PrecipitationTrend => "/api/precipitation-trend",
            Endpoint::ExtremeEventsBar => "/api/extreme-events-bar",
            Endpoint::TemperatureBoxplot => "/api/temperature-boxplot",
            Endpoint::TemperatureMap => "/api/temperature-map",
            Endpoint::PredictiveTemp => "/api/predictive-temp",
            Endpoint::CorrelationScatter => "/api/correlation-scatter",
            Endpoint::DescriptiveTrend => "/api/descriptive/trend",
            Endpoint::DescriptiveHistogram => "/api/descriptive/histogram",
            Endpoint::DiagnosticCorrelations => "/api/diagnostic/correlations",
            Endpoint::Prescriptive => "/api/prescriptive",
        }
    }

    /// Absolute URL under `base_url` (a trailing slash on the base is ignored).
    pub fn url(&self, base_url: &str, query: &Query) -> String {
        format!(
            "{}{}{}",
            base_url.trim_end_matches('/'),
            self.path(),
            query.to_query_string()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::FilterState;

    #[test]
    fn test_url_joins_base_path_and_query() {
        let query = FilterState::default().drilldown_query().unwrap();
        assert_eq!(
            Endpoint::DashboardDrilldown.url("http://localhost:5000/", &query),
            "http://localhost:5000/api/dashboard-drilldown?start_year=1950&end_year=2023&group_by=year&agg_func=avg"
        );
        assert_eq!(
            Endpoint::Kpi.url("http://localhost:5000", &Query::new()),
            "http://localhost:5000/api/kpi"
        );
    }

    #[test]
    fn test_figure_paths_are_distinct() {
        let mut paths: Vec<&str> = Endpoint::FIGURES.iter().map(|e| e.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), Endpoint::FIGURES.len());
    }
}
