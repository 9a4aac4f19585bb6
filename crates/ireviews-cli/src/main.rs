mod harvest;

use clap::{Parser, Subcommand};
use ireviews_core::FeedFormat;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "ireviews-cli")]
#[command(about = "Harvest customer reviews from the app store review feed")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Harvest every review page for one store id across the given countries.
    Harvest {
        /// Store identifier of the application.
        #[arg(long)]
        store_id: String,
        /// Two-letter country code; repeat for several countries. Harvested in
        /// the order given.
        #[arg(long = "country", required = true)]
        countries: Vec<String>,
        /// Feed format to request.
        #[arg(long, default_value = "json")]
        format: FeedFormat,
        /// Minimum delay between feed requests, in milliseconds.
        #[arg(long, default_value_t = 0)]
        delay_ms: u64,
        /// Print each review as a JSON line as soon as it is harvested.
        #[arg(long)]
        stream: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ireviews_core::load_harvester_config()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Harvest {
            store_id,
            countries,
            format,
            delay_ms,
            stream,
        } => {
            let params = ireviews_core::HarvestParameters::new(store_id, countries)
                .with_format(format)
                .with_delay_ms(delay_ms);
            if stream {
                harvest::run_stream(&config, params).await?;
            } else {
                harvest::run_batch(&config, params).await?;
            }
        }
    }

    Ok(())
}
