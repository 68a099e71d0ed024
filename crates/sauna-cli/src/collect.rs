//! Collection orchestration: run every query term against one location,
//! concatenate the results, and write them out once.
//!
//! Queries run strictly one after another with a fixed wait between them.
//! A query whose pagination fails keeps whatever it collected and the run
//! moves on; only a structural error (an item without coordinates) or a
//! failed export aborts the run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use sauna_places::{fetch_places, PlaceRecord, PlacesClient, PlacesError, RecordShape};

use crate::export::write_csv;

/// Result set for one run plus how many queries ended early.
pub(crate) struct Collection {
    pub records: Vec<PlaceRecord>,
    pub failed_queries: usize,
}

/// What a completed run produced.
pub(crate) struct RunSummary {
    pub records: usize,
    pub failed_queries: usize,
    pub output: PathBuf,
}

/// Fetches every query in order and appends its records to one result set.
///
/// `query_delay` is awaited between consecutive queries, independent of the
/// client's page delay. There is no wait after the last query.
///
/// # Errors
///
/// Returns the first fatal [`PlacesError`]; remaining queries are not run.
pub(crate) async fn collect(
    client: &PlacesClient,
    queries: &[String],
    location: &str,
    shape: RecordShape,
    query_delay: Duration,
) -> Result<Collection, PlacesError> {
    let mut records = Vec::new();
    let mut failed_queries = 0usize;

    for (i, query) in queries.iter().enumerate() {
        if i > 0 && !query_delay.is_zero() {
            tokio::time::sleep(query_delay).await;
        }

        tracing::info!(query = %query, location, "starting search");
        let outcome = fetch_places(client, query, location, shape).await?;

        if let Some(err) = &outcome.error {
            failed_queries += 1;
            tracing::warn!(
                query = %query,
                kept = outcome.records.len(),
                error = %err,
                "query ended early; keeping partial results"
            );
        }
        tracing::info!(
            query = %query,
            pages = outcome.pages,
            places = outcome.records.len(),
            "finished search"
        );
        records.extend(outcome.records);
    }

    Ok(Collection {
        records,
        failed_queries,
    })
}

/// Collects all queries, then writes the whole result set to `output`.
///
/// # Errors
///
/// Returns an error if collection hits a fatal [`PlacesError`] (nothing is
/// written) or if the export fails.
pub(crate) async fn run(
    client: &PlacesClient,
    queries: &[String],
    location: &str,
    shape: RecordShape,
    query_delay: Duration,
    output: &Path,
) -> anyhow::Result<RunSummary> {
    let collection = collect(client, queries, location, shape, query_delay).await?;

    write_csv(&collection.records, shape, output)?;
    tracing::info!(
        path = %output.display(),
        records = collection.records.len(),
        "data saved"
    );

    if collection.failed_queries > 0 {
        tracing::warn!(
            failed_queries = collection.failed_queries,
            total_queries = queries.len(),
            "some queries returned partial results"
        );
    }
    tracing::info!("data collection complete");

    Ok(RunSummary {
        records: collection.records.len(),
        failed_queries: collection.failed_queries,
        output: output.to_path_buf(),
    })
}

#[cfg(test)]
#[path = "collect_test.rs"]
mod tests;
