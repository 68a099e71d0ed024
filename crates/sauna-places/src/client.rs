//! HTTP client for the Google Places Text Search and Place Details endpoints.
//!
//! Wraps `reqwest` with Places-specific error handling, API key management,
//! and typed response deserialization. Both endpoints check the `status` and
//! `error_message` fields in the JSON body and surface API-level errors as
//! [`PlacesError::Api`].

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::PlacesError;
use crate::pager::SearchPager;
use crate::types::{DetailsResponse, PlaceDetails, SearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";

/// Fields requested from the details endpoint, in the order Google documents them.
pub const DETAILS_FIELDS: &str = "business_status,current_opening_hours,editorial_summary,international_phone_number,price_level,reservable,secondary_opening_hours,url,website";

/// Continuation tokens are not valid immediately after they are issued.
pub const DEFAULT_PAGE_DELAY: Duration = Duration::from_secs(2);

/// Upper bound on pages followed for a single query.
pub const DEFAULT_MAX_PAGES: usize = 10;

/// `status` values that indicate a usable body.
const OK_STATUSES: [&str; 2] = ["OK", "ZERO_RESULTS"];

/// Client for the Google Places web service.
///
/// Owns the credential and pagination policy so callers never pass the API
/// key around. Use [`PlacesClient::new`] for production or
/// [`PlacesClient::with_base_url`] to point at a mock server in tests.
pub struct PlacesClient {
    client: Client,
    api_key: String,
    search_url: Url,
    details_url: Url,
    page_delay: Duration,
    max_pages: usize,
}

impl PlacesClient {
    /// Creates a new client pointed at the production Places API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, user_agent, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, otherwise `join` would replace the last
        // path segment instead of appending to it.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let invalid = |reason: String| PlacesError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason,
        };
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        let search_url = base
            .join("textsearch/json")
            .map_err(|e| invalid(e.to_string()))?;
        let details_url = base
            .join("details/json")
            .map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            search_url,
            details_url,
            page_delay: DEFAULT_PAGE_DELAY,
            max_pages: DEFAULT_MAX_PAGES,
        })
    }

    /// Builds a client from the loaded application config.
    ///
    /// # Errors
    ///
    /// Same as [`PlacesClient::with_base_url`].
    pub fn from_config(config: &sauna_core::AppConfig) -> Result<Self, PlacesError> {
        Ok(Self::with_base_url(
            &config.places_api_key,
            config.request_timeout_secs,
            &config.user_agent,
            &config.places_base_url,
        )?
        .with_page_delay(config.page_delay())
        .with_max_pages(config.max_pages))
    }

    /// Overrides the wait before each continuation request.
    #[must_use]
    pub fn with_page_delay(mut self, page_delay: Duration) -> Self {
        self.page_delay = page_delay;
        self
    }

    /// Overrides the per-query page cap. Values below 1 are clamped to 1.
    #[must_use]
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages.max(1);
        self
    }

    #[must_use]
    pub fn page_delay(&self) -> Duration {
        self.page_delay
    }

    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    /// Starts a paged search for `"{query} in {location}"`.
    ///
    /// Nothing is requested until [`SearchPager::next_page`] is awaited.
    #[must_use]
    pub fn search(&self, query: &str, location: &str) -> SearchPager<'_> {
        SearchPager::new(self, format!("{query} in {location}"))
    }

    /// Fetches a single Text Search page.
    ///
    /// # Errors
    ///
    /// - [`PlacesError::UnexpectedStatus`] on a non-2xx HTTP status.
    /// - [`PlacesError::Api`] if the body carries an `error_message` or a
    ///   non-OK `status`.
    /// - [`PlacesError::Http`] on network failure.
    /// - [`PlacesError::Deserialize`] if the body does not match the
    ///   expected shape.
    pub async fn search_page(
        &self,
        search: &str,
        page_token: Option<&str>,
    ) -> Result<SearchResponse, PlacesError> {
        let mut params = vec![("query", search)];
        if let Some(token) = page_token {
            params.push(("pagetoken", token));
        }

        let url = self.build_url(&self.search_url, &params);
        let body = self.request_json(url, "textsearch").await?;
        Self::check_api_error(&body)?;

        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: format!("textsearch(query={search})"),
            source: e,
        })
    }

    /// Fetches the enrichment attributes for one place.
    ///
    /// A body without a `result` object decodes to empty details.
    ///
    /// # Errors
    ///
    /// Same classes as [`PlacesClient::search_page`].
    pub async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let url = self.build_url(
            &self.details_url,
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        );
        let body = self.request_json(url, "details").await?;
        Self::check_api_error(&body)?;

        let envelope: DetailsResponse =
            serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
                context: format!("details(place_id={place_id})"),
                source: e,
            })?;

        Ok(envelope.result.unwrap_or_default())
    }

    /// Appends `params` and the API key as percent-encoded query pairs.
    fn build_url(&self, endpoint: &Url, params: &[(&str, &str)]) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
            pairs.append_pair("key", &self.api_key);
        }
        url
    }

    /// Sends a GET request and parses the body as JSON.
    ///
    /// Non-2xx responses become [`PlacesError::UnexpectedStatus`], carrying
    /// the body's `error_message` when one can be read. The URL is never put
    /// into error messages since it contains the API key.
    async fn request_json(
        &self,
        url: Url,
        endpoint: &'static str,
    ) -> Result<serde_json::Value, PlacesError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .as_ref()
                .and_then(|v| v.get("error_message"))
                .and_then(serde_json::Value::as_str)
                .unwrap_or("Unknown error")
                .to_owned();
            return Err(PlacesError::UnexpectedStatus {
                status: status.as_u16(),
                endpoint,
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: endpoint.to_owned(),
            source: e,
        })
    }

    /// Checks `error_message` and `status` in a 2xx body.
    fn check_api_error(body: &serde_json::Value) -> Result<(), PlacesError> {
        let status = body.get("status").and_then(serde_json::Value::as_str);
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str);

        let bad_status = status.filter(|s| !OK_STATUSES.contains(s));
        if message.is_some() || bad_status.is_some() {
            return Err(PlacesError::Api {
                status: status.unwrap_or("UNKNOWN").to_owned(),
                message: message.unwrap_or("no error_message in response").to_owned(),
            });
        }
        Ok(())
    }
}
