//! Harvest command handlers. Results go to stdout as JSON; logs go to stderr.

use std::io::Write;

use ireviews_core::{HarvestParameters, HarvesterConfig};
use ireviews_harvester::{HarvestEvent, Harvester};

/// Runs a batch harvest and prints the full result as pretty JSON.
///
/// # Errors
///
/// Returns an error if the harvester cannot be built, the harvest fails, or
/// stdout cannot be written.
pub(crate) async fn run_batch(
    config: &HarvesterConfig,
    params: HarvestParameters,
) -> anyhow::Result<()> {
    let harvester = Harvester::new(config)?;
    let result = harvester.harvest(params).await?;

    let mut stdout = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &result)?;
    writeln!(stdout)?;
    Ok(())
}

/// Runs a streaming harvest, printing one JSON line per review followed by a
/// per-country summary line.
///
/// # Errors
///
/// Returns the harvest error if the stream terminates with one.
pub(crate) async fn run_stream(
    config: &HarvesterConfig,
    params: HarvestParameters,
) -> anyhow::Result<()> {
    let harvester = Harvester::new(config)?;
    let mut stream = harvester.stream(params);

    while let Some(event) = stream.next_event().await {
        match event {
            HarvestEvent::Review(review) => {
                println!("{}", serde_json::to_string(&review)?);
            }
            HarvestEvent::End(result) => {
                let counts: serde_json::Map<String, serde_json::Value> = result
                    .iter()
                    .map(|country| (country.country_code().to_owned(), country.count().into()))
                    .collect();
                println!("{}", serde_json::json!({ "end": counts }));
                tracing::info!(reviews = result.total_reviews(), "stream finished");
                return Ok(());
            }
            HarvestEvent::Error(err) => return Err(err.into()),
        }
    }

    anyhow::bail!("harvest stream ended without a result")
}
