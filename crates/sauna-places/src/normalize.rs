//! Normalization of Places API items into [`PlaceRecord`]s.

use crate::error::PlacesError;
use crate::record::{BaseFields, DetailFields, PlaceRecord, RecordShape, VenueType};
use crate::types::{PlaceDetails, PlaceSummary};

/// Converts a search item (and its details, if looked up) into a record of
/// the requested shape.
///
/// `query` is the bare search term, used only to derive the `type` column.
/// When `shape.enrich` is set but `details` is `None`, every details-sourced
/// column is left absent. Details are ignored when `shape.enrich` is off.
///
/// # Errors
///
/// Returns [`PlacesError::MissingCoordinates`] if the item has no
/// `geometry.location.lat`/`lng`.
pub fn normalize_place(
    summary: &PlaceSummary,
    details: Option<&PlaceDetails>,
    query: &str,
    shape: RecordShape,
) -> Result<PlaceRecord, PlacesError> {
    let (latitude, longitude) =
        summary
            .coordinates()
            .ok_or_else(|| PlacesError::MissingCoordinates {
                place: summary.label().to_owned(),
            })?;

    let base = BaseFields {
        name: summary.name.clone(),
        address: summary.formatted_address.clone(),
        rating: summary.rating,
        review_count: summary.user_ratings_total,
        latitude,
        longitude,
    };

    let venue_type = shape.derive_type.then(|| VenueType::from_query(query));

    let details = shape
        .enrich
        .then(|| normalize_details(summary.place_id.clone(), details));

    Ok(PlaceRecord {
        base,
        venue_type,
        details,
    })
}

/// Flattens details one level deep: `weekday_text` out of
/// `current_opening_hours`, `overview` out of `editorial_summary`.
fn normalize_details(place_id: Option<String>, details: Option<&PlaceDetails>) -> DetailFields {
    let Some(d) = details else {
        return DetailFields {
            place_id,
            ..DetailFields::default()
        };
    };

    DetailFields {
        place_id,
        business_status: d.business_status.clone(),
        opening_hours: d
            .current_opening_hours
            .as_ref()
            .and_then(|h| h.weekday_text.clone()),
        editorial_summary: d
            .editorial_summary
            .as_ref()
            .and_then(|s| s.overview.clone()),
        international_phone_number: d.international_phone_number.clone(),
        price_level: d.price_level,
        reservable: d.reservable,
        secondary_opening_hours: d.secondary_opening_hours.clone(),
        url: d.url.clone(),
        website: d.website.clone(),
    }
}
