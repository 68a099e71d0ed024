pub mod client;
pub mod error;
pub mod fetch;
pub mod normalize;
pub mod pager;
pub mod record;
pub mod types;

pub use client::PlacesClient;
pub use error::PlacesError;
pub use fetch::{fetch_details, fetch_places, QueryOutcome};
pub use normalize::normalize_place;
pub use pager::SearchPager;
pub use record::{PlaceRecord, RecordShape, VenueType, SENTINEL};
pub use types::{PlaceDetails, PlaceSummary, SearchResponse};
