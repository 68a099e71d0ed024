//! Per-query fetch: drive the pager, enrich, normalize.

use crate::client::PlacesClient;
use crate::error::PlacesError;
use crate::normalize::normalize_place;
use crate::record::{PlaceRecord, RecordShape};
use crate::types::PlaceDetails;

/// Everything one query produced.
///
/// `error` is set when pagination stopped early. `records` then holds what
/// the pages before the failure yielded; they are kept, not discarded.
#[derive(Debug)]
pub struct QueryOutcome {
    pub records: Vec<PlaceRecord>,
    pub pages: usize,
    pub error: Option<PlacesError>,
}

/// Fetches every page for `"{query} in {location}"` and normalizes each item
/// into a record of `shape`, looking up details per item when
/// `shape.enrich` is set.
///
/// Pagination failures (HTTP status, API error, undecodable body, page cap)
/// are logged and returned in [`QueryOutcome::error`]. Details failures are
/// absorbed by [`fetch_details`].
///
/// # Errors
///
/// Returns [`PlacesError::MissingCoordinates`] if any item lacks
/// coordinates; this is a broken upstream contract and aborts the run.
pub async fn fetch_places(
    client: &PlacesClient,
    query: &str,
    location: &str,
    shape: RecordShape,
) -> Result<QueryOutcome, PlacesError> {
    let mut pager = client.search(query, location);
    let mut records = Vec::new();
    let mut error = None;

    while let Some(page) = pager.next_page().await {
        let items = match page {
            Ok(items) => items,
            Err(e) => {
                if matches!(e, PlacesError::PaginationLimit { .. }) {
                    tracing::warn!(search = %pager.search_text(), error = %e, "stopping pagination");
                } else {
                    tracing::error!(
                        search = %pager.search_text(),
                        collected = records.len(),
                        error = %e,
                        "Text Search request failed"
                    );
                }
                error = Some(e);
                break;
            }
        };

        tracing::debug!(
            search = %pager.search_text(),
            page = pager.pages_fetched(),
            items = items.len(),
            "received search page"
        );

        for summary in &items {
            let details = if shape.enrich {
                Some(fetch_details(client, summary.place_id.as_deref()).await)
            } else {
                None
            };

            let record = normalize_place(summary, details.as_ref(), query, shape)?;
            if shape.enrich {
                tracing::info!(name = %summary.label(), "found and detailed place");
            } else {
                tracing::info!(name = %summary.label(), "found place");
            }
            records.push(record);
        }
    }

    Ok(QueryOutcome {
        records,
        pages: pager.pages_fetched(),
        error,
    })
}

/// Looks up details for one place, returning empty details on any failure.
///
/// Never fails: a single bad lookup must not cost the rest of the page.
/// Items with no `place_id` skip the request entirely.
pub async fn fetch_details(client: &PlacesClient, place_id: Option<&str>) -> PlaceDetails {
    let Some(place_id) = place_id else {
        tracing::warn!("search item has no place_id; skipping details lookup");
        return PlaceDetails::default();
    };

    match client.place_details(place_id).await {
        Ok(details) => details,
        Err(e) => {
            tracing::error!(place_id, error = %e, "Place Details request failed");
            PlaceDetails::default()
        }
    }
}
