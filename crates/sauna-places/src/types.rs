//! Google Places response types for the Text Search and Place Details
//! endpoints.
//!
//! Only the fields the collector uses are modelled. Everything optional is
//! `Option` with `#[serde(default)]` so sparse upstream payloads still decode;
//! the one field the pipeline cannot live without (coordinates) is still
//! optional here and enforced in [`crate::normalize`] so its absence surfaces
//! as a dedicated error rather than a failed page decode.

use serde::Deserialize;

/// Top-level response from `GET textsearch/json`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    /// Continuation token; absent on the last page.
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// A single item from a search page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub formatted_address: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user_ratings_total: Option<u64>,
    #[serde(default)]
    pub geometry: Option<Geometry>,
    #[serde(default)]
    pub place_id: Option<String>,
}

impl PlaceSummary {
    /// `(lat, lng)` when both are present.
    #[must_use]
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let location = self.geometry.as_ref()?.location.as_ref()?;
        Some((location.lat?, location.lng?))
    }

    /// Best available label for log lines and error messages.
    #[must_use]
    pub fn label(&self) -> &str {
        self.name
            .as_deref()
            .or(self.place_id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub location: Option<LatLng>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LatLng {
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lng: Option<f64>,
}

/// Top-level response from `GET details/json`.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub result: Option<PlaceDetails>,
    #[serde(default)]
    pub error_message: Option<String>,
}

/// Enrichment attributes from the details lookup.
///
/// `Default` is the empty enrichment used whenever the lookup fails.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PlaceDetails {
    #[serde(default)]
    pub business_status: Option<String>,
    #[serde(default)]
    pub current_opening_hours: Option<OpeningHours>,
    #[serde(default)]
    pub editorial_summary: Option<EditorialSummary>,
    #[serde(default)]
    pub international_phone_number: Option<String>,
    /// 0 (free) through 4 (very expensive).
    #[serde(default)]
    pub price_level: Option<i64>,
    #[serde(default)]
    pub reservable: Option<bool>,
    /// Passed through untouched; the collector renders it as JSON.
    #[serde(default)]
    pub secondary_opening_hours: Option<serde_json::Value>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EditorialSummary {
    #[serde(default)]
    pub overview: Option<String>,
}
