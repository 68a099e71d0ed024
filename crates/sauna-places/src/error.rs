use thiserror::Error;

/// Errors returned by the Places client and the fetch pipeline.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-2xx status.
    #[error("unexpected HTTP status {status} from {endpoint}: {message}")]
    UnexpectedStatus {
        status: u16,
        endpoint: &'static str,
        message: String,
    },

    /// The body carried an `error_message` or a non-OK `status`.
    #[error("Places API error ({status}): {message}")]
    Api { status: String, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },

    #[error("pagination limit reached for \"{query}\": exceeded {max_pages} pages")]
    PaginationLimit { query: String, max_pages: usize },

    /// A search item had no `geometry.location.lat`/`lng`.
    #[error("place \"{place}\" has no coordinates")]
    MissingCoordinates { place: String },
}

impl PlacesError {
    /// Returns `true` for errors that must abort the whole run.
    ///
    /// Only a broken upstream contract (missing coordinates) is fatal; every
    /// other error ends the current query's pagination and the run moves on.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, PlacesError::MissingCoordinates { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_coordinates_is_fatal() {
        let err = PlacesError::MissingCoordinates {
            place: "Vabali Spa".to_owned(),
        };
        assert!(err.is_fatal());
    }

    #[test]
    fn api_and_status_errors_are_not_fatal() {
        let api = PlacesError::Api {
            status: "INVALID_REQUEST".to_owned(),
            message: "bad token".to_owned(),
        };
        let status = PlacesError::UnexpectedStatus {
            status: 500,
            endpoint: "textsearch",
            message: "Unknown error".to_owned(),
        };
        let limit = PlacesError::PaginationLimit {
            query: "sauna in Berlin, Germany".to_owned(),
            max_pages: 3,
        };
        assert!(!api.is_fatal());
        assert!(!status.is_fatal());
        assert!(!limit.is_fatal());
    }

    #[test]
    fn deserialize_error_is_not_fatal() {
        let source = serde_json::from_str::<()>("invalid").unwrap_err();
        let err = PlacesError::Deserialize {
            context: "textsearch".to_owned(),
            source,
        };
        assert!(!err.is_fatal());
    }
}
