//! Response models for every backend endpoint.
//!
//! All fields that the backend may leave out default to `None` or an empty
//! vector, so a sparse payload still deserializes. Values that may be `null`
//! in a series are `Option<f64>`.

use chrono::{Datelike, NaiveDate};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Accepts `"2001"`, `2001` or `2001.0` and keeps a string label.
fn labels_as_strings<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    Ok(raw.into_iter().map(|v| label_text(&v)).collect())
}

fn label_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0)
                .map(|f| format!("{}", f as i64))
                .unwrap_or_else(|| n.to_string()),
        },
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Accepts `2000`, `2000.0` or `"2000"` for each year.
fn years_as_ints<'de, D>(deserializer: D) -> Result<Vec<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<Value>::deserialize(deserializer)?;
    raw.iter()
        .map(|v| year_value(v).ok_or_else(|| D::Error::custom(format!("not a year: {v}"))))
        .collect()
}

fn year_value(value: &Value) -> Option<i32> {
    let whole = |f: f64| (f.is_finite() && f.fract() == 0.0).then_some(f as i64);
    let year = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(whole))?,
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))?
        }
        _ => return None,
    };
    i32::try_from(year).ok()
}

/// A single chart point: a bucket label and its (possibly missing) value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    /// `"2001"`, `"2001-05"` or `"2001-05-17"` depending on granularity.
    pub label: String,
    pub value: Option<f64>,
}

impl SeriesPoint {
    /// Calendar year the label falls in, if the label is date-like.
    pub fn year(&self) -> Option<i32> {
        year_of_label(&self.label)
    }
}

/// Year of a `YYYY`, `YYYY-MM` or `YYYY-MM-DD` label.
pub fn year_of_label(label: &str) -> Option<i32> {
    let label = label.trim();
    if let Ok(date) = NaiveDate::parse_from_str(label, "%Y-%m-%d") {
        return Some(date.year());
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d") {
        return Some(date.year());
    }
    label.parse::<i32>().ok()
}

/// `/api/dashboard-drilldown`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DrilldownPayload {
    #[serde(default, deserialize_with = "labels_as_strings")]
    pub labels: Vec<String>,
    #[serde(default)]
    pub temperatures: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
}

impl DrilldownPayload {
    /// Every value sequence has one entry per label.
    pub fn is_aligned(&self) -> bool {
        self.temperatures.len() == self.labels.len()
            && self.precipitation.len() == self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn temperature_points(&self) -> Vec<SeriesPoint> {
        zip_points(&self.labels, &self.temperatures)
    }

    pub fn precipitation_points(&self) -> Vec<SeriesPoint> {
        zip_points(&self.labels, &self.precipitation)
    }
}

fn zip_points(labels: &[String], values: &[Option<f64>]) -> Vec<SeriesPoint> {
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| SeriesPoint {
            label: label.clone(),
            value: values.get(i).copied().flatten(),
        })
        .collect()
}

/// Summary block of `/api/dashboard-data`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    #[serde(default)]
    pub avg_temp: Option<f64>,
    #[serde(default)]
    pub total_precip: Option<f64>,
    #[serde(default)]
    pub avg_co2: Option<f64>,
}

/// `/api/dashboard-data`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    #[serde(default)]
    pub summary: DashboardSummary,
    #[serde(default, deserialize_with = "years_as_ints")]
    pub years: Vec<i32>,
    #[serde(default)]
    pub temperatures: Vec<Option<f64>>,
    #[serde(default)]
    pub precipitation: Vec<Option<f64>>,
    #[serde(default)]
    pub co2_levels: Vec<Option<f64>>,
}

/// `/api/kpi`
///
/// The field set differs between dashboard variants, so every metric is
/// optional and a missing one renders as a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KpiSnapshot {
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub avg_temp: Option<f64>,
    #[serde(default)]
    pub total_precipitation: Option<f64>,
    #[serde(default)]
    pub extreme_events: Option<f64>,
    #[serde(default)]
    pub co2_level: Option<f64>,
    #[serde(default)]
    pub temp_anomaly: Option<f64>,
    #[serde(default)]
    pub extreme_days: Option<f64>,
    #[serde(default)]
    pub extreme_hist_avg: Option<f64>,
}

/// A figure built server-side, handed to Plotly unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlotlyFigure {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub layout: Value,
}

impl PlotlyFigure {
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// `/api/descriptive/trend`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DescriptiveTrend {
    #[serde(default, deserialize_with = "years_as_ints")]
    pub years: Vec<i32>,
    #[serde(default)]
    pub avg_temp: Vec<Option<f64>>,
    #[serde(default)]
    pub trend: Vec<Option<f64>>,
}

/// `/api/descriptive/histogram`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    #[serde(default, deserialize_with = "labels_as_strings")]
    pub bins: Vec<String>,
    #[serde(default)]
    pub freq: Vec<f64>,
}

/// `/api/diagnostic/correlations`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Correlations {
    #[serde(default)]
    pub names: Vec<String>,
    #[serde(default)]
    pub values: Vec<f64>,
    #[serde(default)]
    pub colors: Vec<String>,
}

/// Severity of a recommendation; only used to pick a CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    Critical,
    Warning,
    Ok,
    #[default]
    #[serde(other)]
    Info,
}

impl RecommendationStatus {
    pub fn css_class(&self) -> &'static str {
        match self {
            RecommendationStatus::Critical => "rec-critical",
            RecommendationStatus::Warning => "rec-warning",
            RecommendationStatus::Ok => "rec-ok",
            RecommendationStatus::Info => "rec-info",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationCard {
    #[serde(default)]
    pub sector: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub detail: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub status: RecommendationStatus,
}

/// `/api/prescriptive`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Prescriptive {
    #[serde(default)]
    pub forecast_summary: String,
    #[serde(default)]
    pub recs: Vec<RecommendationCard>,
}
