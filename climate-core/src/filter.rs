//! Filter form state, the year range check and query string assembly.

use crate::error::FilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_START_YEAR: i32 = 1950;
pub const DEFAULT_END_YEAR: i32 = 2023;

/// Time bucket the backend groups observations into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Year,
    Month,
    Day,
}

impl GroupBy {
    pub const ALL: [GroupBy; 3] = [GroupBy::Year, GroupBy::Month, GroupBy::Day];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupBy::Year => "year",
            GroupBy::Month => "month",
            GroupBy::Day => "day",
        }
    }

    /// Human label used in selectors.
    pub fn display_name(&self) -> &'static str {
        match self {
            GroupBy::Year => "Year",
            GroupBy::Month => "Month",
            GroupBy::Day => "Day",
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "year" => Ok(GroupBy::Year),
            "month" => Ok(GroupBy::Month),
            "day" => Ok(GroupBy::Day),
            other => Err(format!("unknown group-by granularity: {other}")),
        }
    }
}

/// Aggregation the backend applies inside each time bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggFunc {
    #[default]
    Avg,
    Max,
    Min,
    Sum,
}

impl AggFunc {
    pub const ALL: [AggFunc; 4] = [AggFunc::Avg, AggFunc::Max, AggFunc::Min, AggFunc::Sum];

    pub fn as_str(&self) -> &'static str {
        match self {
            AggFunc::Avg => "avg",
            AggFunc::Max => "max",
            AggFunc::Min => "min",
            AggFunc::Sum => "sum",
        }
    }

    /// Upper-cased name interpolated into chart titles ("AVG", "MAX").
    pub fn label(&self) -> String {
        self.as_str().to_uppercase()
    }
}

impl fmt::Display for AggFunc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AggFunc {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "avg" => Ok(AggFunc::Avg),
            "max" => Ok(AggFunc::Max),
            "min" => Ok(AggFunc::Min),
            "sum" => Ok(AggFunc::Sum),
            other => Err(format!("unknown aggregation function: {other}")),
        }
    }
}

/// A toggleable series on the drill-down page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Series {
    Temperature,
    Precipitation,
}

/// Which series the user wants to see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeriesVisibility {
    pub temperature: bool,
    pub precipitation: bool,
}

impl Default for SeriesVisibility {
    fn default() -> Self {
        Self {
            temperature: true,
            precipitation: true,
        }
    }
}

impl SeriesVisibility {
    pub fn set(&mut self, series: Series, visible: bool) {
        match series {
            Series::Temperature => self.temperature = visible,
            Series::Precipitation => self.precipitation = visible,
        }
    }

    pub fn any(&self) -> bool {
        self.temperature || self.precipitation
    }
}

/// Ordered query parameters. Only explicitly supplied values are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(&'static str, String)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.params.push((key, value.to_string()));
        self
    }

    pub fn param_opt(self, key: &'static str, value: Option<impl ToString>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Year-range query for endpoints that accept optional bounds.
    ///
    /// When both bounds are present they must be ordered.
    pub fn year_range(start: Option<i32>, end: Option<i32>) -> Result<Self, FilterError> {
        if let (Some(start), Some(end)) = (start, end) {
            check_year_order(start, end)?;
        }
        Ok(Query::new()
            .param_opt("start_year", start)
            .param_opt("end_year", end))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Renders `?k=v&k=v`, or an empty string when there are no parameters.
    ///
    /// Values are integers and enum tokens, so no escaping is applied.
    pub fn to_query_string(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        let joined = self
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&");
        format!("?{joined}")
    }
}

fn check_year_order(start: i32, end: i32) -> Result<(), FilterError> {
    if start > end {
        return Err(FilterError::InvalidYearRange { start, end });
    }
    Ok(())
}

/// Current values of the dashboard filter form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    pub start_year: i32,
    pub end_year: i32,
    pub group_by: GroupBy,
    pub agg_func: AggFunc,
    pub series: SeriesVisibility,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            start_year: DEFAULT_START_YEAR,
            end_year: DEFAULT_END_YEAR,
            group_by: GroupBy::default(),
            agg_func: AggFunc::default(),
            series: SeriesVisibility::default(),
        }
    }
}

impl FilterState {
    /// Only the year ordering is checked; out-of-range years are passed through.
    pub fn validate(&self) -> Result<(), FilterError> {
        check_year_order(self.start_year, self.end_year)
    }

    /// Full query for `/api/dashboard-drilldown`.
    pub fn drilldown_query(&self) -> Result<Query, FilterError> {
        self.validate()?;
        Ok(Query::new()
            .param("start_year", self.start_year)
            .param("end_year", self.end_year)
            .param("group_by", self.group_by)
            .param("agg_func", self.agg_func))
    }

    /// Year bounds only, for `/api/dashboard-data`.
    pub fn year_range_query(&self) -> Result<Query, FilterError> {
        Query::year_range(Some(self.start_year), Some(self.end_year))
    }

    /// With every series toggled off there is nothing to fetch.
    pub fn should_fetch(&self) -> bool {
        self.series.any()
    }

    /// Applies raw form input; text that is not an integer keeps the old value.
    pub fn set_start_year_input(&mut self, raw: &str) {
        if let Ok(year) = raw.trim().parse::<i32>() {
            self.start_year = year;
        }
    }

    pub fn set_end_year_input(&mut self, raw: &str) {
        if let Ok(year) = raw.trim().parse::<i32>() {
            self.end_year = year;
        }
    }
}

/// One edit made through the filter form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterChange {
    /// Raw text of both year inputs, validated as a pair
    Years { start: String, end: String },
    GroupBy(GroupBy),
    AggFunc(AggFunc),
    Series(Series, bool),
}

impl FilterState {
    /// Applies a form edit, returning the next state.
    ///
    /// An edit that would leave the year range reversed is rejected and the
    /// current state stays as it was.
    pub fn apply(&self, change: FilterChange) -> Result<FilterState, FilterError> {
        let mut next = *self;
        match change {
            FilterChange::Years { start, end } => {
                next.set_start_year_input(&start);
                next.set_end_year_input(&end);
            }
            FilterChange::GroupBy(group_by) => next.group_by = group_by,
            FilterChange::AggFunc(agg_func) => next.agg_func = agg_func,
            FilterChange::Series(series, visible) => next.series.set(series, visible),
        }
        next.validate()?;
        Ok(next)
    }
}

/// Text of the two year inputs as currently shown in the form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct YearInputs {
    pub start: String,
    pub end: String,
}

impl YearInputs {
    pub fn from_filter(filter: &FilterState) -> Self {
        Self {
            start: filter.start_year.to_string(),
            end: filter.end_year.to_string(),
        }
    }

    /// Applies both inputs to `filter`.
    ///
    /// Either way the inputs end up showing the years of the filter in
    /// effect: the new one on success, `filter` itself on rejection.
    pub fn commit(&mut self, filter: &FilterState) -> Result<FilterState, FilterError> {
        let change = FilterChange::Years {
            start: self.start.clone(),
            end: self.end.clone(),
        };
        match filter.apply(change) {
            Ok(next) => {
                *self = Self::from_filter(&next);
                Ok(next)
            }
            Err(e) => {
                *self = Self::from_filter(filter);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(start: i32, end: i32) -> FilterState {
        FilterState {
            start_year: start,
            end_year: end,
            ..FilterState::default()
        }
    }

    #[test]
    fn test_reversed_years_are_rejected() {
        let state = filter(2010, 2000);
        assert_eq!(
            state.validate(),
            Err(FilterError::InvalidYearRange {
                start: 2010,
                end: 2000
            })
        );
        assert!(state.drilldown_query().is_err());
        assert!(state.year_range_query().is_err());
    }

    #[test]
    fn test_equal_years_are_accepted() {
        assert!(filter(2000, 2000).validate().is_ok());
    }

    #[test]
    fn test_out_of_range_years_pass_through() {
        let query = filter(-5, 99999).drilldown_query().unwrap();
        assert_eq!(
            query.to_query_string(),
            "?start_year=-5&end_year=99999&group_by=year&agg_func=avg"
        );
    }

    #[test]
    fn test_drilldown_query_order() {
        let state = FilterState {
            start_year: 1990,
            end_year: 2020,
            group_by: GroupBy::Month,
            agg_func: AggFunc::Max,
            series: SeriesVisibility::default(),
        };
        assert_eq!(
            state.drilldown_query().unwrap().to_query_string(),
            "?start_year=1990&end_year=2020&group_by=month&agg_func=max"
        );
    }

    #[test]
    fn test_absent_params_are_omitted() {
        assert_eq!(Query::year_range(None, None).unwrap().to_query_string(), "");
        assert_eq!(
            Query::year_range(Some(2001), None).unwrap().to_query_string(),
            "?start_year=2001"
        );
        assert_eq!(
            Query::year_range(None, Some(1999)).unwrap().to_query_string(),
            "?end_year=1999"
        );
    }

    #[test]
    fn test_year_input_parsing_keeps_previous_on_garbage() {
        let mut state = filter(2000, 2010);
        state.set_start_year_input("abc");
        assert_eq!(state.start_year, 2000);
        state.set_start_year_input(" 1995 ");
        assert_eq!(state.start_year, 1995);
        state.set_end_year_input("");
        assert_eq!(state.end_year, 2010);
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!("month".parse::<GroupBy>(), Ok(GroupBy::Month));
        assert!("week".parse::<GroupBy>().is_err());
        assert_eq!("sum".parse::<AggFunc>(), Ok(AggFunc::Sum));
        assert_eq!(AggFunc::Max.label(), "MAX");
    }

    #[test]
    fn test_should_fetch_follows_visibility() {
        let mut state = FilterState::default();
        assert!(state.should_fetch());
        state.series.set(Series::Temperature, false);
        assert!(state.should_fetch());
        state.series.set(Series::Precipitation, false);
        assert!(!state.should_fetch());
    }

    #[test]
    fn test_apply_rejects_reversed_range() {
        let state = filter(2000, 2010);
        let err = state
            .apply(FilterChange::Years {
                start: "2011".into(),
                end: "2010".into(),
            })
            .unwrap_err();
        assert_eq!(err, FilterError::InvalidYearRange { start: 2011, end: 2010 });
        assert_eq!(state.start_year, 2000);

        let next = state
            .apply(FilterChange::Years {
                start: "2000".into(),
                end: "2020".into(),
            })
            .unwrap();
        assert_eq!(next.end_year, 2020);
    }

    #[test]
    fn test_rejected_year_edit_reverts_inputs() {
        let state = filter(2000, 2010);
        let mut inputs = YearInputs::from_filter(&state);

        inputs.start = "2015".into();
        assert!(inputs.commit(&state).is_err());
        assert_eq!(inputs, YearInputs::from_filter(&state));

        // The next edit starts from what the form shows, not from 2015.
        inputs.end = "2020".into();
        let next = inputs.commit(&state).unwrap();
        assert_eq!((next.start_year, next.end_year), (2000, 2020));
        assert_eq!(inputs, YearInputs::from_filter(&next));
        assert_eq!(inputs.start, "2000");
        assert_eq!(inputs.end, "2020");
    }

    #[test]
    fn test_unparseable_year_input_shows_filter_years() {
        let state = filter(2000, 2010);
        let mut inputs = YearInputs {
            start: "abc".into(),
            end: "2012".into(),
        };
        let next = inputs.commit(&state).unwrap();
        assert_eq!((next.start_year, next.end_year), (2000, 2012));
        assert_eq!(inputs.start, "2000");
    }

    #[test]
    fn test_apply_toggles_and_selectors() {
        let state = FilterState::default()
            .apply(FilterChange::GroupBy(GroupBy::Day))
            .and_then(|s| s.apply(FilterChange::AggFunc(AggFunc::Sum)))
            .and_then(|s| s.apply(FilterChange::Series(Series::Temperature, false)))
            .unwrap();
        assert_eq!(state.group_by, GroupBy::Day);
        assert_eq!(state.agg_func, AggFunc::Sum);
        assert!(!state.series.temperature);
        assert!(state.series.precipitation);
    }
}
