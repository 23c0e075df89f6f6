//! Command implementations for the climate CLI.
//!
//! Each subcommand drives the same fetch / validate / map pipeline the
//! browser dashboards use and prints the result to stdout.

use clap::Subcommand;
use climate_api::{ApiClient, ApiConfig};
use climate_core::filter::{AggFunc, GroupBy, DEFAULT_END_YEAR, DEFAULT_START_YEAR};
use std::time::Duration;

pub mod drilldown;
pub mod figures;
pub mod kpi;

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Print the latest KPI tiles with their badges
    Kpi,

    /// Fetch the drill-down series and print the chart configuration JSON
    Drilldown {
        #[arg(long, default_value_t = DEFAULT_START_YEAR)]
        start_year: i32,

        #[arg(long, default_value_t = DEFAULT_END_YEAR)]
        end_year: i32,

        /// Time bucket: year, month or day
        #[arg(long, default_value_t = GroupBy::Year)]
        group_by: GroupBy,

        /// Aggregation inside each bucket: avg, max, min or sum
        #[arg(long, default_value_t = AggFunc::Avg)]
        agg_func: AggFunc,

        /// Leave out the temperature chart
        #[arg(long)]
        no_temp: bool,

        /// Leave out the precipitation chart
        #[arg(long)]
        no_precip: bool,
    },

    /// Print summary values and the yearly roll-up for a year range
    Summary {
        #[arg(long)]
        start_year: Option<i32>,

        #[arg(long)]
        end_year: Option<i32>,
    },

    /// Fetch every server-built figure concurrently and report each one
    Overview,

    /// Print the descriptive, diagnostic and prescriptive analytics
    Analytics,

    /// Refresh KPIs on a fixed interval until interrupted
    WatchKpi {
        /// Seconds between refreshes (defaults to five minutes)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
}

pub async fn run(command: Command, config: &ApiConfig) -> anyhow::Result<()> {
    let client = ApiClient::new(config)?;
    log::info!("using API at {}", client.base_url());

    match command {
        Command::Kpi => kpi::run_kpi(&client).await,
        Command::Drilldown {
            start_year,
            end_year,
            group_by,
            agg_func,
            no_temp,
            no_precip,
        } => {
            let filter = drilldown::filter_from_args(
                start_year, end_year, group_by, agg_func, no_temp, no_precip,
            );
            drilldown::run_drilldown(&client, filter).await
        }
        Command::Summary {
            start_year,
            end_year,
        } => drilldown::run_summary(&client, start_year, end_year).await,
        Command::Overview => figures::run_overview(&client).await,
        Command::Analytics => figures::run_analytics(&client).await,
        Command::WatchKpi { interval_secs } => {
            let config = match interval_secs {
                Some(secs) => config.clone().with_kpi_refresh(Duration::from_secs(secs)),
                None => config.clone(),
            };
            kpi::run_watch_kpi(&client, config.kpi_refresh).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Result<Command, clap::Error> {
        let mut argv = vec!["climate-cli"];
        argv.extend_from_slice(args);
        TestCli::try_parse_from(argv).map(|cli| cli.command)
    }

    #[test]
    fn test_drilldown_defaults() {
        let command = parse(&["drilldown"]).unwrap();
        assert_eq!(
            command,
            Command::Drilldown {
                start_year: 1950,
                end_year: 2023,
                group_by: GroupBy::Year,
                agg_func: AggFunc::Avg,
                no_temp: false,
                no_precip: false,
            }
        );
    }

    #[test]
    fn test_drilldown_options() {
        let command = parse(&[
            "drilldown",
            "--start-year",
            "2000",
            "--end-year",
            "2010",
            "--group-by",
            "month",
            "--agg-func",
            "max",
            "--no-precip",
        ])
        .unwrap();
        assert_eq!(
            command,
            Command::Drilldown {
                start_year: 2000,
                end_year: 2010,
                group_by: GroupBy::Month,
                agg_func: AggFunc::Max,
                no_temp: false,
                no_precip: true,
            }
        );
    }

    #[test]
    fn test_unknown_aggregation_is_rejected() {
        assert!(parse(&["drilldown", "--agg-func", "median"]).is_err());
    }

    #[test]
    fn test_summary_and_watch() {
        assert_eq!(
            parse(&["summary", "--start-year", "1990"]).unwrap(),
            Command::Summary {
                start_year: Some(1990),
                end_year: None,
            }
        );
        assert_eq!(
            parse(&["watch-kpi", "--interval-secs", "60"]).unwrap(),
            Command::WatchKpi {
                interval_secs: Some(60),
            }
        );
    }
}
