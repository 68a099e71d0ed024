//! The flattened output record and the column layout it is written with.
//!
//! A record is tagged rather than fixed: the base columns are always there,
//! the derived `type` column and the enrichment block only when the
//! corresponding [`RecordShape`] flag is on. [`RecordShape::header`] and
//! [`PlaceRecord::values`] always agree on order.

use std::fmt::{self, Display};

/// Written in place of any absent value.
pub const SENTINEL: &str = "N/A";

const BASE_COLUMNS: [&str; 6] = [
    "name",
    "address",
    "rating",
    "review_count",
    "latitude",
    "longitude",
];

const TYPE_COLUMN: &str = "type";

const DETAIL_COLUMNS: [&str; 10] = [
    "place_id",
    "business_status",
    "current_opening_hours",
    "editorial_summary",
    "international_phone_number",
    "price_level",
    "reservable",
    "secondary_opening_hours",
    "url",
    "website",
];

/// Which optional column groups a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordShape {
    /// Look up place details for every item and emit the enrichment columns.
    pub enrich: bool,
    /// Emit the `type` column derived from the query term.
    pub derive_type: bool,
}

impl RecordShape {
    /// Everything on: the detailed export.
    pub const FULL: Self = Self {
        enrich: true,
        derive_type: true,
    };

    /// Column names in output order.
    #[must_use]
    pub fn header(self) -> Vec<&'static str> {
        let mut header = BASE_COLUMNS.to_vec();
        if self.derive_type {
            header.push(TYPE_COLUMN);
        }
        if self.enrich {
            header.extend(DETAIL_COLUMNS);
        }
        header
    }
}

impl Default for RecordShape {
    fn default() -> Self {
        Self::FULL
    }
}

/// Venue category derived from the query term that found a place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VenueType {
    Sauna,
    Therme,
}

impl VenueType {
    /// `Sauna` if `query` contains "sauna" in any case, otherwise `Therme`.
    #[must_use]
    pub fn from_query(query: &str) -> Self {
        if query.to_lowercase().contains("sauna") {
            VenueType::Sauna
        } else {
            VenueType::Therme
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            VenueType::Sauna => "sauna",
            VenueType::Therme => "therme",
        }
    }
}

impl Display for VenueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Columns sourced from the search item.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseFields {
    pub name: Option<String>,
    pub address: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u64>,
    pub latitude: f64,
    pub longitude: f64,
}

/// Columns sourced from the details lookup (plus the `place_id` used for it).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailFields {
    pub place_id: Option<String>,
    pub business_status: Option<String>,
    /// `weekday_text` lines from `current_opening_hours`.
    pub opening_hours: Option<Vec<String>>,
    /// `overview` from `editorial_summary`.
    pub editorial_summary: Option<String>,
    pub international_phone_number: Option<String>,
    pub price_level: Option<i64>,
    pub reservable: Option<bool>,
    pub secondary_opening_hours: Option<serde_json::Value>,
    pub url: Option<String>,
    pub website: Option<String>,
}

/// One output row.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaceRecord {
    pub base: BaseFields,
    pub venue_type: Option<VenueType>,
    pub details: Option<DetailFields>,
}

impl PlaceRecord {
    /// The shape this record was built for.
    #[must_use]
    pub fn shape(&self) -> RecordShape {
        RecordShape {
            enrich: self.details.is_some(),
            derive_type: self.venue_type.is_some(),
        }
    }

    /// Rendered cell values, positionally matching `self.shape().header()`.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        let base = &self.base;
        let mut values = vec![
            or_sentinel(base.name.as_ref()),
            or_sentinel(base.address.as_ref()),
            base.rating.map_or_else(|| SENTINEL.to_owned(), render_float),
            or_sentinel(base.review_count.as_ref()),
            render_float(base.latitude),
            render_float(base.longitude),
        ];

        if let Some(venue_type) = self.venue_type {
            values.push(venue_type.to_string());
        }

        if let Some(d) = &self.details {
            values.extend([
                or_sentinel(d.place_id.as_ref()),
                or_sentinel(d.business_status.as_ref()),
                d.opening_hours
                    .as_ref()
                    .map_or_else(|| SENTINEL.to_owned(), |lines| lines.join("; ")),
                or_sentinel(d.editorial_summary.as_ref()),
                or_sentinel(d.international_phone_number.as_ref()),
                or_sentinel(d.price_level.as_ref()),
                or_sentinel(d.reservable.as_ref()),
                or_sentinel(d.secondary_opening_hours.as_ref()),
                or_sentinel(d.url.as_ref()),
                or_sentinel(d.website.as_ref()),
            ]);
        }

        values
    }
}

/// Whole numbers keep one decimal place (`4.0`, `52.0`) so float columns
/// never read as integers.
fn render_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{value:.1}")
    } else {
        value.to_string()
    }
}

fn or_sentinel<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(|| SENTINEL.to_owned(), ToString::to_string)
}
