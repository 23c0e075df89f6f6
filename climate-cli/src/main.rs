//! Climate CLI - command line front end to the climate analytics backend.

use clap::Parser;
use climate_api::config::DEFAULT_BASE_URL;
use climate_api::ApiConfig;

#[derive(Parser)]
#[command(
    name = "climate-cli",
    version,
    about = "Climate data analytics toolkit"
)]
struct Cli {
    /// Backend address, e.g. http://localhost:5000
    #[arg(long, global = true, env = "CLIMATE_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: climate_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();
    let cli = Cli::parse();
    let config = ApiConfig::new(cli.base_url);
    climate_cmd::run(cli.command, &config).await
}
