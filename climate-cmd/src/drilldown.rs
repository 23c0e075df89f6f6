//! `drilldown` and `summary`.

use climate_api::ApiClient;
use climate_core::filter::{AggFunc, FilterState, GroupBy, Query, SeriesVisibility};
use climate_core::kpi::{format_number, summary_tiles};
use climate_core::payload::DashboardData;
use climate_core::rollup::RollUp;
use climate_core::view_model::{drilldown_charts, DrilldownCharts};
use log::info;
use serde_json::json;

use crate::kpi::render_tiles;

pub fn filter_from_args(
    start_year: i32,
    end_year: i32,
    group_by: GroupBy,
    agg_func: AggFunc,
    no_temp: bool,
    no_precip: bool,
) -> FilterState {
    FilterState {
        start_year,
        end_year,
        group_by,
        agg_func,
        series: SeriesVisibility {
            temperature: !no_temp,
            precipitation: !no_precip,
        },
    }
}

/// Validates the filter, fetches and prints one chart spec per visible series.
pub async fn run_drilldown(client: &ApiClient, filter: FilterState) -> anyhow::Result<()> {
    let query = filter.drilldown_query()?;
    if !filter.should_fetch() {
        info!("both series are disabled; nothing to fetch");
        return Ok(());
    }

    info!("fetching drill-down{}", query.to_query_string());
    let payload = client.drilldown(&query).await?;
    if payload.is_empty() {
        anyhow::bail!("no data for {}-{}", filter.start_year, filter.end_year);
    }
    let years = RollUp::from_points(&payload.temperature_points(), &payload.precipitation_points());
    info!(
        "received {} {} buckets covering {} years",
        payload.labels.len(),
        filter.group_by,
        years.len()
    );

    let charts = drilldown_charts(&payload, &filter);
    println!("{}", serde_json::to_string_pretty(&charts_json(&charts))?);
    Ok(())
}

fn charts_json(charts: &DrilldownCharts) -> serde_json::Value {
    json!({
        "temperature": charts.temperature,
        "precipitation": charts.precipitation,
    })
}

pub async fn run_summary(
    client: &ApiClient,
    start_year: Option<i32>,
    end_year: Option<i32>,
) -> anyhow::Result<()> {
    let query = Query::year_range(start_year, end_year)?;
    let data = client.dashboard_data(&query).await?;
    println!("{}", render_summary(&data));
    Ok(())
}

/// Summary tiles followed by a year / temperature / precipitation / CO2 table.
pub fn render_summary(data: &DashboardData) -> String {
    let mut out = render_tiles(&summary_tiles(&data.summary));
    let rollup = RollUp::from_dashboard_data(data);
    if rollup.is_empty() {
        out.push_str("\n\nno yearly data");
        return out;
    }
    out.push_str(&format!(
        "\n\n{:<6} {:>10} {:>10} {:>10} {:>6}",
        "year", "temp", "precip", "co2", "n"
    ));
    for (year, bucket) in rollup.iter() {
        out.push_str(&format!(
            "\n{:<6} {:>10} {:>10} {:>10} {:>6}",
            year,
            format_number(bucket.mean_temperature()),
            format_number(bucket.mean_precipitation()),
            format_number(bucket.mean_co2()),
            bucket.count
        ));
    }
    out
}
