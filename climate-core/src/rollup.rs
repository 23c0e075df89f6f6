//! Group-by-year reducer over index-aligned observation arrays.
//!
//! A missing value (null, or an index past the end of a shorter array)
//! contributes 0 to the sum and still counts toward the denominator, so
//! sparse years report a lower mean than their observed values.

use crate::payload::{DashboardData, SeriesPoint};
use serde::Serialize;
use std::collections::BTreeMap;

/// Sums and count for one year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct YearBucket {
    pub temperature_sum: f64,
    pub precipitation_sum: f64,
    pub co2_sum: f64,
    pub count: usize,
}

impl YearBucket {
    fn mean(sum: f64, count: usize) -> f64 {
        if count == 0 {
            0.0
        } else {
            sum / count as f64
        }
    }

    pub fn mean_temperature(&self) -> f64 {
        Self::mean(self.temperature_sum, self.count)
    }

    pub fn mean_precipitation(&self) -> f64 {
        Self::mean(self.precipitation_sum, self.count)
    }

    pub fn mean_co2(&self) -> f64 {
        Self::mean(self.co2_sum, self.count)
    }
}

/// Per-year buckets in ascending year order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RollUp {
    buckets: BTreeMap<i32, YearBucket>,
}

fn value_at(values: &[Option<f64>], index: usize) -> f64 {
    values.get(index).copied().flatten().unwrap_or(0.0)
}

impl RollUp {
    /// Groups parallel arrays by year.
    pub fn by_year(
        years: &[i32],
        temperatures: &[Option<f64>],
        precipitation: &[Option<f64>],
        co2_levels: &[Option<f64>],
    ) -> Self {
        let mut buckets: BTreeMap<i32, YearBucket> = BTreeMap::new();
        for (i, year) in years.iter().enumerate() {
            let bucket = buckets.entry(*year).or_default();
            bucket.temperature_sum += value_at(temperatures, i);
            bucket.precipitation_sum += value_at(precipitation, i);
            bucket.co2_sum += value_at(co2_levels, i);
            bucket.count += 1;
        }
        Self { buckets }
    }

    pub fn from_dashboard_data(data: &DashboardData) -> Self {
        Self::by_year(
            &data.years,
            &data.temperatures,
            &data.precipitation,
            &data.co2_levels,
        )
    }

    /// Rolls month/day points up to their year; points without a
    /// date-like label are skipped.
    pub fn from_points(temperature: &[SeriesPoint], precipitation: &[SeriesPoint]) -> Self {
        let mut years = Vec::with_capacity(temperature.len());
        let mut temps = Vec::with_capacity(temperature.len());
        let mut precip = Vec::with_capacity(temperature.len());
        for (i, point) in temperature.iter().enumerate() {
            let Some(year) = point.year() else {
                log::warn!("skipping point with non-date label {:?}", point.label);
                continue;
            };
            years.push(year);
            temps.push(point.value);
            precip.push(precipitation.get(i).and_then(|p| p.value));
        }
        Self::by_year(&years, &temps, &precip, &[])
    }

    pub fn get(&self, year: i32) -> Option<&YearBucket> {
        self.buckets.get(&year)
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &YearBucket)> {
        self.buckets.iter().map(|(y, b)| (*y, b))
    }

    pub fn years(&self) -> Vec<i32> {
        self.buckets.keys().copied().collect()
    }

    pub fn mean_temperatures(&self) -> Vec<f64> {
        self.buckets.values().map(YearBucket::mean_temperature).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_temperature_by_year() {
        let rollup = RollUp::by_year(
            &[2000, 2000, 2001],
            &[Some(10.0), Some(20.0), Some(30.0)],
            &[],
            &[],
        );
        assert_eq!(rollup.len(), 2);
        assert_eq!(rollup.get(2000).unwrap().mean_temperature(), 15.0);
        assert_eq!(rollup.get(2001).unwrap().mean_temperature(), 30.0);
    }

    #[test]
    fn test_years_sorted_ascending() {
        let rollup = RollUp::by_year(
            &[2003, 2001, 2002, 2001],
            &[Some(1.0), Some(2.0), Some(3.0), Some(4.0)],
            &[],
            &[],
        );
        assert_eq!(rollup.years(), vec![2001, 2002, 2003]);
        assert_eq!(rollup.mean_temperatures(), vec![3.0, 3.0, 1.0]);
    }

    #[test]
    fn test_missing_values_count_as_zero() {
        let rollup = RollUp::by_year(
            &[2000, 2000],
            &[Some(10.0), None],
            &[Some(5.0)],
            &[Some(400.0), Some(410.0)],
        );
        let bucket = rollup.get(2000).unwrap();
        assert_eq!(bucket.count, 2);
        assert_eq!(bucket.mean_temperature(), 5.0);
        assert_eq!(bucket.precipitation_sum, 5.0);
        assert_eq!(bucket.mean_co2(), 405.0);
    }

    #[test]
    fn test_roll_up_monthly_points() {
        let temps = vec![
            SeriesPoint { label: "2000-01".into(), value: Some(2.0) },
            SeriesPoint { label: "2000-02".into(), value: Some(4.0) },
            SeriesPoint { label: "2001-01".into(), value: Some(6.0) },
            SeriesPoint { label: "n/a".into(), value: Some(100.0) },
        ];
        let precip = vec![
            SeriesPoint { label: "2000-01".into(), value: Some(10.0) },
            SeriesPoint { label: "2000-02".into(), value: None },
            SeriesPoint { label: "2001-01".into(), value: Some(1.0) },
        ];
        let rollup = RollUp::from_points(&temps, &precip);
        assert_eq!(rollup.years(), vec![2000, 2001]);
        assert_eq!(rollup.get(2000).unwrap().mean_temperature(), 3.0);
        assert_eq!(rollup.get(2000).unwrap().mean_precipitation(), 5.0);
    }

    #[test]
    fn test_empty_input() {
        let rollup = RollUp::by_year(&[], &[], &[], &[]);
        assert!(rollup.is_empty());
        assert_eq!(YearBucket::default().mean_temperature(), 0.0);
    }
}
