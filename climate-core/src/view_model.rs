//! Payload to Plotly chart configuration.
//!
//! Every builder is a pure function of its inputs. The output is plain JSON
//! (`data`, `layout`, `config`) handed to `Plotly.react` by the UI crate or
//! printed by the CLI.

use crate::filter::{AggFunc, FilterState, GroupBy};
use crate::payload::{Correlations, DashboardData, DescriptiveTrend, DrilldownPayload, Histogram, PlotlyFigure};
use crate::rollup::RollUp;
use serde::Serialize;
use serde_json::{json, Value};

pub const TEMPERATURE_COLOR: &str = "#FF6B6B";
pub const PRECIPITATION_COLOR: &str = "#4ECDC4";
pub const CO2_COLOR: &str = "#95E1D3";
pub const TREND_COLOR: &str = "#FFA07A";
const TEMPLATE: &str = "plotly_white";

/// Used for correlation bars when the payload carries no colors.
const FALLBACK_PALETTE: [&str; 4] = [TEMPERATURE_COLOR, PRECIPITATION_COLOR, CO2_COLOR, TREND_COLOR];

/// Everything Plotly needs to draw one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub data: Vec<Value>,
    pub layout: Value,
    pub config: Value,
}

impl ChartSpec {
    fn new(data: Vec<Value>, layout: Value) -> Self {
        Self {
            data,
            layout,
            config: json!({ "responsive": true }),
        }
    }
}

pub fn x_axis_title(group_by: GroupBy) -> &'static str {
    match group_by {
        GroupBy::Year => "Year",
        GroupBy::Month => "Year-Month",
        GroupBy::Day => "Date",
    }
}

/// Daily data has too many points for markers.
pub fn trace_mode(group_by: GroupBy) -> &'static str {
    match group_by {
        GroupBy::Day => "lines",
        _ => "lines+markers",
    }
}

/// Anything finer than yearly gets a range slider.
pub fn show_range_slider(group_by: GroupBy) -> bool {
    group_by != GroupBy::Year
}

fn margin() -> Value {
    json!({ "t": 50, "l": 50, "r": 20, "b": 50 })
}

fn drilldown_layout(title: String, group_by: GroupBy, y_title: &str) -> Value {
    let x_title = x_axis_title(group_by);
    json!({
        "title": title,
        "xaxis": {
            "title": x_title,
            "rangeslider": { "visible": show_range_slider(group_by) },
        },
        "yaxis": { "title": y_title },
        "template": TEMPLATE,
        "margin": margin(),
    })
}

pub fn temperature_chart(payload: &DrilldownPayload, group_by: GroupBy, agg: AggFunc) -> ChartSpec {
    let agg_label = agg.label();
    let trace = json!({
        "x": payload.labels,
        "y": payload.temperatures,
        "type": "scatter",
        "mode": trace_mode(group_by),
        "name": format!("{agg_label} t\u{b0}C"),
        "line": { "color": TEMPERATURE_COLOR, "width": 2 },
    });
    let title = format!("{agg_label} Temperature ({})", x_axis_title(group_by));
    ChartSpec::new(vec![trace], drilldown_layout(title, group_by, "Temperature (\u{b0}C)"))
}

/// Precipitation follows the user-selected aggregation like temperature does.
pub fn precipitation_chart(payload: &DrilldownPayload, group_by: GroupBy, agg: AggFunc) -> ChartSpec {
    let agg_label = agg.label();
    let trace = json!({
        "x": payload.labels,
        "y": payload.precipitation,
        "type": "bar",
        "name": "Precipitation",
        "marker": { "color": PRECIPITATION_COLOR, "opacity": 0.8 },
    });
    let title = format!("{agg_label} Precipitation ({})", x_axis_title(group_by));
    ChartSpec::new(vec![trace], drilldown_layout(title, group_by, "Precipitation (mm)"))
}

/// Charts for the drill-down page; a hidden series yields `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct DrilldownCharts {
    pub temperature: Option<ChartSpec>,
    pub precipitation: Option<ChartSpec>,
}

pub fn drilldown_charts(payload: &DrilldownPayload, filter: &FilterState) -> DrilldownCharts {
    if !payload.is_aligned() {
        log::warn!(
            "drill-down payload is misaligned: {} labels, {} temperatures, {} precipitation",
            payload.labels.len(),
            payload.temperatures.len(),
            payload.precipitation.len()
        );
    }
    DrilldownCharts {
        temperature: filter
            .series
            .temperature
            .then(|| temperature_chart(payload, filter.group_by, filter.agg_func)),
        precipitation: filter
            .series
            .precipitation
            .then(|| precipitation_chart(payload, filter.group_by, filter.agg_func)),
    }
}

/// Temperature, precipitation and CO2 over the filtered years.
pub fn summary_chart(data: &DashboardData) -> ChartSpec {
    let temperature = json!({
        "x": data.years,
        "y": data.temperatures,
        "type": "scatter",
        "mode": "lines+markers",
        "name": "Temperature (\u{b0}C)",
        "line": { "color": TEMPERATURE_COLOR, "width": 2 },
    });
    let precipitation = json!({
        "x": data.years,
        "y": data.precipitation,
        "type": "bar",
        "name": "Precipitation (mm)",
        "yaxis": "y2",
        "marker": { "color": PRECIPITATION_COLOR, "opacity": 0.6 },
    });
    let co2 = json!({
        "x": data.years,
        "y": data.co2_levels,
        "type": "scatter",
        "mode": "lines",
        "name": "CO\u{2082} (ppm)",
        "yaxis": "y3",
        "line": { "color": CO2_COLOR, "width": 2, "dash": "dot" },
    });
    let layout = json!({
        "title": "Climate indicators by year",
        "xaxis": { "title": "Year", "domain": [0.0, 0.9] },
        "yaxis": { "title": "Temperature (\u{b0}C)" },
        "yaxis2": { "title": "Precipitation (mm)", "overlaying": "y", "side": "right" },
        "yaxis3": { "title": "CO\u{2082} (ppm)", "overlaying": "y", "side": "right", "anchor": "free", "position": 1.0 },
        "template": TEMPLATE,
        "margin": margin(),
        "legend": { "orientation": "h" },
    });
    ChartSpec::new(vec![temperature, precipitation, co2], layout)
}

/// Bar of mean temperature per year.
pub fn rollup_chart(rollup: &RollUp) -> ChartSpec {
    let trace = json!({
        "x": rollup.years(),
        "y": rollup.mean_temperatures(),
        "type": "bar",
        "name": "Mean temperature",
        "marker": { "color": TEMPERATURE_COLOR },
    });
    let layout = json!({
        "title": "Mean temperature by year",
        "xaxis": { "title": "Year" },
        "yaxis": { "title": "Temperature (\u{b0}C)" },
        "template": TEMPLATE,
        "margin": margin(),
    });
    ChartSpec::new(vec![trace], layout)
}

pub fn descriptive_trend_chart(trend: &DescriptiveTrend) -> ChartSpec {
    let observed = json!({
        "x": trend.years,
        "y": trend.avg_temp,
        "type": "scatter",
        "mode": "lines+markers",
        "name": "Average temperature",
        "line": { "color": TEMPERATURE_COLOR, "width": 2 },
    });
    let fitted = json!({
        "x": trend.years,
        "y": trend.trend,
        "type": "scatter",
        "mode": "lines",
        "name": "Trend",
        "line": { "color": TREND_COLOR, "width": 2, "dash": "dash" },
    });
    let layout = json!({
        "title": "Average temperature and trend",
        "xaxis": { "title": "Year" },
        "yaxis": { "title": "Temperature (\u{b0}C)" },
        "hovermode": "x unified",
        "template": TEMPLATE,
        "margin": margin(),
    });
    ChartSpec::new(vec![observed, fitted], layout)
}

pub fn histogram_chart(histogram: &Histogram) -> ChartSpec {
    let trace = json!({
        "x": histogram.bins,
        "y": histogram.freq,
        "type": "bar",
        "name": "Frequency",
        "marker": { "color": PRECIPITATION_COLOR, "opacity": 0.8 },
    });
    let layout = json!({
        "title": "Temperature distribution",
        "xaxis": { "title": "Temperature (\u{b0}C)" },
        "yaxis": { "title": "Frequency" },
        "bargap": 0.05,
        "template": TEMPLATE,
        "margin": margin(),
    });
    ChartSpec::new(vec![trace], layout)
}

pub fn correlation_chart(correlations: &Correlations) -> ChartSpec {
    let colors: Vec<&str> = (0..correlations.names.len())
        .map(|i| {
            correlations
                .colors
                .get(i)
                .map(String::as_str)
                .unwrap_or(FALLBACK_PALETTE[i % FALLBACK_PALETTE.len()])
        })
        .collect();
    let trace = json!({
        "x": correlations.values,
        "y": correlations.names,
        "type": "bar",
        "orientation": "h",
        "marker": { "color": colors },
    });
    let layout = json!({
        "title": "Correlation with temperature",
        "xaxis": { "title": "Correlation coefficient", "range": [-1.0, 1.0] },
        "template": TEMPLATE,
        "margin": { "t": 50, "l": 120, "r": 20, "b": 50 },
    });
    ChartSpec::new(vec![trace], layout)
}

/// Server-built figures are passed through untouched.
pub fn figure_chart(figure: &PlotlyFigure) -> ChartSpec {
    ChartSpec::new(figure.data.clone(), figure.layout.clone())
}
