//! `overview` and `analytics`.

use climate_api::{settle_all, ApiClient};
use climate_core::endpoint::Endpoint;
use climate_core::error::ApiError;
use climate_core::panel::{
    PanelState, FORECAST_LOAD_ERROR, FORECAST_NOT_READY, LOAD_ERROR, NO_DATA,
};
use climate_core::payload::{PlotlyFigure, Prescriptive};
use log::info;

/// One status line for a server-built figure.
pub fn figure_status(endpoint: Endpoint, result: Result<PlotlyFigure, ApiError>) -> String {
    let (error_text, empty_text) = match endpoint {
        Endpoint::PredictiveTemp => (FORECAST_LOAD_ERROR, FORECAST_NOT_READY),
        _ => (LOAD_ERROR, NO_DATA),
    };
    let state = PanelState::from_result_or_empty(result, PlotlyFigure::is_empty, error_text, empty_text);
    let status = match &state {
        PanelState::Ready(figure) => format!("ok ({} traces)", figure.data.len()),
        other => other.message().unwrap_or(LOAD_ERROR).to_string(),
    };
    format!("{:<28} {}", endpoint.path(), status)
}

/// Fetches all figures at once; one failing endpoint never hides the rest.
pub async fn run_overview(client: &ApiClient) -> anyhow::Result<()> {
    let tasks = Endpoint::FIGURES
        .iter()
        .map(|endpoint| (*endpoint, client.figure(*endpoint)))
        .collect();
    let outcomes = settle_all(tasks).await;
    let failed = outcomes.iter().filter(|(_, r)| r.is_err()).count();
    for (endpoint, result) in outcomes {
        println!("{}", figure_status(endpoint, result));
    }
    info!("{} of {} figures loaded", Endpoint::FIGURES.len() - failed, Endpoint::FIGURES.len());
    Ok(())
}

pub fn render_prescriptive(prescriptive: &Prescriptive) -> String {
    let mut out = prescriptive.forecast_summary.clone();
    for card in &prescriptive.recs {
        out.push_str(&format!(
            "\n[{}] {} {}: {}\n    {}",
            card.status.css_class(),
            card.icon,
            card.sector,
            card.action,
            card.detail
        ));
    }
    out
}

/// Each section is fetched and reported on its own.
pub async fn run_analytics(client: &ApiClient) -> anyhow::Result<()> {
    let (trend, histogram, correlations, prescriptive) = tokio::join!(
        client.descriptive_trend(),
        client.histogram(),
        client.correlations(),
        client.prescriptive(),
    );

    match trend {
        Ok(trend) => println!("trend: {} years", trend.years.len()),
        Err(e) => println!("trend: {}", failure(&e)),
    }
    match histogram {
        Ok(histogram) => println!("histogram: {} bins", histogram.bins.len()),
        Err(e) => println!("histogram: {}", failure(&e)),
    }
    match correlations {
        Ok(correlations) => {
            println!("correlations:");
            for (name, value) in correlations.names.iter().zip(&correlations.values) {
                println!("  {:<20} {:>6.2}", name, value);
            }
        }
        Err(e) => println!("correlations: {}", failure(&e)),
    }
    match prescriptive {
        Ok(prescriptive) => println!("\n{}", render_prescriptive(&prescriptive)),
        Err(e) => {
            log_failure(&e);
            println!("\nrecommendations: {}", FORECAST_LOAD_ERROR);
        }
    }
    Ok(())
}

fn failure(e: &ApiError) -> &'static str {
    log_failure(e);
    LOAD_ERROR
}

fn log_failure(e: &ApiError) {
    log::error!("Error loading {}: {}", e.path(), e);
}

#[cfg(test)]
mod tests {
    use super::*;
    use climate_core::payload::{RecommendationCard, RecommendationStatus};
    use serde_json::json;

    #[test]
    fn test_figure_status() {
        let figure = PlotlyFigure {
            data: vec![json!({"type": "box"}), json!({"type": "box"})],
            layout: json!({}),
        };
        let line = figure_status(Endpoint::TemperatureBoxplot, Ok(figure));
        assert!(line.starts_with("/api/temperature-boxplot"));
        assert!(line.ends_with("ok (2 traces)"));

        let line = figure_status(Endpoint::PredictiveTemp, Ok(PlotlyFigure::default()));
        assert!(line.ends_with(FORECAST_NOT_READY));

        let err = ApiError::Status {
            path: "/api/predictive-temp".to_string(),
            status: 404,
            message: "Model not trained".to_string(),
        };
        let line = figure_status(Endpoint::PredictiveTemp, Err(err));
        assert!(line.ends_with(FORECAST_LOAD_ERROR));
    }

    #[test]
    fn test_render_prescriptive() {
        let prescriptive = Prescriptive {
            forecast_summary: "Next year: 15.1 \u{b0}C".to_string(),
            recs: vec![RecommendationCard {
                sector: "Water".to_string(),
                action: "Expand storage".to_string(),
                detail: "Drier summers ahead".to_string(),
                icon: "W".to_string(),
                status: RecommendationStatus::Critical,
            }],
        };
        let text = render_prescriptive(&prescriptive);
        assert_eq!(
            text,
            "Next year: 15.1 \u{b0}C\n[rec-critical] W Water: Expand storage\n    Drier summers ahead"
        );
    }
}
