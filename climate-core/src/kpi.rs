//! Headline metric tiles: display text and badge thresholds.
//!
//! Every function here is a pure mapping from a snapshot to tiles, so the
//! same snapshot always yields the same tiles. Missing metrics render as
//! [`PLACEHOLDER`] instead of failing.

use crate::payload::{DashboardSummary, KpiSnapshot};
use serde::Serialize;

/// Shown for a metric the backend did not send.
pub const PLACEHOLDER: &str = "-";

/// Typographic minus used for negative values.
const MINUS: char = '\u{2212}';

/// Rounds to two decimals and trims trailing zeros (`14.20` -> `14.2`,
/// `-0.3` -> `−0.3`, `0.0` -> `0`).
pub fn format_number(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let text = format!("{:.2}", rounded.abs());
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if rounded < 0.0 {
        format!("{MINUS}{text}")
    } else {
        text.to_string()
    }
}

/// Like [`format_number`] but prefixes `+` when the rounded value is positive.
pub fn format_signed(value: f64) -> String {
    let text = format_number(value);
    if text != "0" && value > 0.0 {
        format!("+{text}")
    } else {
        text
    }
}

/// Formats an optional metric, falling back to the placeholder.
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format_number(v),
        _ => PLACEHOLDER.to_string(),
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) if v.is_finite() && !unit.is_empty() => format!("{} {unit}", format_number(v)),
        _ => format_metric(value),
    }
}

/// Badge category attached to a tile; each maps to one CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Badge {
    AboveNormal,
    BelowNormal,
    Neutral,
    Alert,
    Calm,
}

impl Badge {
    pub fn css_class(&self) -> &'static str {
        match self {
            Badge::AboveNormal => "above-normal",
            Badge::BelowNormal => "below-normal",
            Badge::Neutral => "neutral",
            Badge::Alert => "alert",
            Badge::Calm => "calm",
        }
    }
}

pub fn anomaly_badge(anomaly: f64) -> Badge {
    if anomaly > 0.0 {
        Badge::AboveNormal
    } else if anomaly < 0.0 {
        Badge::BelowNormal
    } else {
        Badge::Neutral
    }
}

/// Difference between this period's extreme days and the historical average.
pub fn extreme_delta(extreme_days: f64, hist_avg: f64) -> f64 {
    extreme_days - hist_avg
}

/// `Alert` for any excess over the historical average, otherwise `Calm`.
pub fn extreme_badge(delta: f64) -> Badge {
    if delta > 0.0 {
        Badge::Alert
    } else {
        Badge::Calm
    }
}

/// Metrics a tile can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum KpiField {
    AvgTemp,
    TotalPrecipitation,
    ExtremeEvents,
    Co2Level,
    TempAnomaly,
    ExtremeDays,
    SummaryAvgTemp,
    SummaryTotalPrecip,
    SummaryAvgCo2,
}

impl KpiField {
    pub fn title(&self) -> &'static str {
        match self {
            KpiField::AvgTemp | KpiField::SummaryAvgTemp => "Average temperature",
            KpiField::TotalPrecipitation | KpiField::SummaryTotalPrecip => "Total precipitation",
            KpiField::ExtremeEvents => "Extreme events",
            KpiField::Co2Level | KpiField::SummaryAvgCo2 => "CO\u{2082} level",
            KpiField::TempAnomaly => "Temperature anomaly",
            KpiField::ExtremeDays => "Extreme days",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            KpiField::AvgTemp | KpiField::SummaryAvgTemp | KpiField::TempAnomaly => "\u{b0}C",
            KpiField::TotalPrecipitation | KpiField::SummaryTotalPrecip => "mm",
            KpiField::Co2Level | KpiField::SummaryAvgCo2 => "ppm",
            KpiField::ExtremeEvents | KpiField::ExtremeDays => "",
        }
    }
}

/// One rendered metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiTile {
    pub field: KpiField,
    pub text: String,
    pub badge: Option<Badge>,
    /// Secondary line under the value (data year, delta vs. history).
    pub caption: Option<String>,
}

impl KpiTile {
    fn plain(field: KpiField, value: Option<f64>) -> Self {
        Self {
            field,
            text: with_unit(value, field.unit()),
            badge: None,
            caption: None,
        }
    }
}

/// Tiles for the overview page.
pub fn overview_tiles(snapshot: &KpiSnapshot) -> Vec<KpiTile> {
    let caption = snapshot.year.map(|y| format!("Data for {y}"));
    let mut tiles = vec![
        KpiTile::plain(KpiField::AvgTemp, snapshot.avg_temp),
        KpiTile::plain(KpiField::TotalPrecipitation, snapshot.total_precipitation),
        KpiTile::plain(KpiField::ExtremeEvents, snapshot.extreme_events),
        KpiTile::plain(KpiField::Co2Level, snapshot.co2_level),
    ];
    for tile in tiles.iter_mut() {
        tile.caption = caption.clone();
    }
    tiles
}

/// Anomaly tile: signed value plus above/below-normal badge.
pub fn anomaly_tile(anomaly: Option<f64>) -> KpiTile {
    match anomaly.filter(|a| a.is_finite()) {
        Some(a) => KpiTile {
            field: KpiField::TempAnomaly,
            text: format!("{} {}", format_signed(a), KpiField::TempAnomaly.unit()),
            badge: Some(anomaly_badge(a)),
            caption: None,
        },
        None => KpiTile::plain(KpiField::TempAnomaly, None),
    }
}

/// Extreme-days tile: count plus rounded delta against the historical average.
pub fn extreme_days_tile(extreme_days: Option<f64>, hist_avg: Option<f64>) -> KpiTile {
    let mut tile = KpiTile::plain(KpiField::ExtremeDays, extreme_days);
    if let (Some(days), Some(avg)) = (extreme_days, hist_avg) {
        let delta = extreme_delta(days, avg);
        if delta.is_finite() {
            tile.badge = Some(extreme_badge(delta));
            tile.caption = Some(format!("{} vs. average", format_signed(delta.round())));
        }
    }
    tile
}

/// Tiles for the analytics page.
pub fn analytics_tiles(snapshot: &KpiSnapshot) -> Vec<KpiTile> {
    let mut avg = KpiTile::plain(KpiField::AvgTemp, snapshot.avg_temp);
    avg.caption = snapshot.year.map(|y| format!("Data for {y}"));
    vec![
        avg,
        anomaly_tile(snapshot.temp_anomaly),
        extreme_days_tile(snapshot.extreme_days, snapshot.extreme_hist_avg),
    ]
}

/// Tiles for the filtered summary on the drill-down page.
pub fn summary_tiles(summary: &DashboardSummary) -> Vec<KpiTile> {
    vec![
        KpiTile::plain(KpiField::SummaryAvgTemp, summary.avg_temp),
        KpiTile::plain(KpiField::SummaryTotalPrecip, summary.total_precip),
        KpiTile::plain(KpiField::SummaryAvgCo2, summary.avg_co2),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(14.2), "14.2");
        assert_eq!(format_number(14.256), "14.26");
        assert_eq!(format_number(800.0), "800");
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(-0.3), "\u{2212}0.3");
    }

    #[test]
    fn test_anomaly_tiles() {
        let positive = anomaly_tile(Some(1.5));
        assert_eq!(positive.text, "+1.5 \u{b0}C");
        assert_eq!(positive.badge, Some(Badge::AboveNormal));

        let negative = anomaly_tile(Some(-0.3));
        assert_eq!(negative.text, "\u{2212}0.3 \u{b0}C");
        assert_eq!(negative.badge, Some(Badge::BelowNormal));

        let zero = anomaly_tile(Some(0.0));
        assert_eq!(zero.text, "0 \u{b0}C");
        assert_eq!(zero.badge, Some(Badge::Neutral));
        assert_eq!(Badge::Neutral.css_class(), "neutral");
    }

    #[test]
    fn test_missing_fields_render_placeholder() {
        let tiles = overview_tiles(&KpiSnapshot::default());
        assert_eq!(tiles.len(), 4);
        assert!(tiles.iter().all(|t| t.text == PLACEHOLDER && t.caption.is_none()));

        let anomaly = anomaly_tile(None);
        assert_eq!(anomaly.text, PLACEHOLDER);
        assert_eq!(anomaly.badge, None);
    }

    #[test]
    fn test_zero_is_not_a_placeholder() {
        let snapshot = KpiSnapshot {
            extreme_events: Some(0.0),
            year: Some(2023),
            ..KpiSnapshot::default()
        };
        let tiles = overview_tiles(&snapshot);
        assert_eq!(tiles[2].text, "0");
        assert_eq!(tiles[2].caption.as_deref(), Some("Data for 2023"));
    }

    #[test]
    fn test_extreme_days_badges() {
        let above = extreme_days_tile(Some(9.0), Some(5.6));
        assert_eq!(above.badge, Some(Badge::Alert));
        assert_eq!(above.caption.as_deref(), Some("+3 vs. average"));

        let below = extreme_days_tile(Some(3.0), Some(5.0));
        assert_eq!(below.badge, Some(Badge::Calm));
        assert_eq!(below.caption.as_deref(), Some("\u{2212}2 vs. average"));

        let equal = extreme_days_tile(Some(5.0), Some(5.0));
        assert_eq!(equal.badge, Some(Badge::Calm));

        let no_history = extreme_days_tile(Some(5.0), None);
        assert_eq!(no_history.badge, None);
        assert_eq!(no_history.text, "5");
    }

    #[test]
    fn test_summary_tiles_units() {
        let tiles = summary_tiles(&DashboardSummary {
            avg_temp: Some(14.123),
            total_precip: Some(1234.5),
            avg_co2: None,
        });
        assert_eq!(tiles[0].text, "14.12 \u{b0}C");
        assert_eq!(tiles[1].text, "1234.5 mm");
        assert_eq!(tiles[2].text, PLACEHOLDER);
    }
}
