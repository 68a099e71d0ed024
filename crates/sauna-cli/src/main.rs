mod collect;
mod export;

use std::path::PathBuf;

use clap::Parser;
use sauna_places::{PlacesClient, RecordShape};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOCATION: &str = "Berlin, Germany";
const DEFAULT_OUTPUT: &str = "berlin_saunas_thermes.csv";
const DEFAULT_DETAILED_OUTPUT: &str = "berlin_saunas_thermes_detailed.csv";

#[derive(Debug, Parser)]
#[command(name = "sauna-cli")]
#[command(about = "Collect sauna and therme venues from Google Places into a CSV file")]
struct Cli {
    /// Search term; repeat the flag for several terms
    #[arg(long = "query", value_name = "TERM", default_values = ["sauna", "therme"])]
    queries: Vec<String>,
    /// Location appended to every search term
    #[arg(long, default_value = DEFAULT_LOCATION)]
    location: String,
    /// Output CSV path (defaults to berlin_saunas_thermes[_detailed].csv)
    #[arg(long)]
    output: Option<PathBuf>,
    /// Skip the per-place details lookup
    #[arg(long)]
    no_details: bool,
    /// Omit the `type` column derived from the search term
    #[arg(long)]
    no_type: bool,
}

impl Cli {
    fn shape(&self) -> RecordShape {
        RecordShape {
            enrich: !self.no_details,
            derive_type: !self.no_type,
        }
    }

    fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| {
            if self.no_details {
                PathBuf::from(DEFAULT_OUTPUT)
            } else {
                PathBuf::from(DEFAULT_DETAILED_OUTPUT)
            }
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = sauna_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(?config, "configuration loaded");

    let client = PlacesClient::from_config(&config)
        .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?;

    let summary = collect::run(
        &client,
        &cli.queries,
        &cli.location,
        cli.shape(),
        config.query_delay(),
        &cli.output_path(),
    )
    .await?;

    println!(
        "wrote {} places to {} ({} of {} queries incomplete)",
        summary.records,
        summary.output.display(),
        summary.failed_queries,
        cli.queries.len()
    );

    Ok(())
}
