use std::time::Duration;

/// Runtime configuration for a collection run.
///
/// Built once at startup by [`crate::load_app_config`] and passed by
/// reference to whatever needs it; nothing reads the environment after that.
#[derive(Clone)]
pub struct AppConfig {
    pub places_api_key: String,
    pub places_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub page_delay_ms: u64,
    pub query_delay_ms: u64,
    pub max_pages: usize,
}

impl AppConfig {
    /// Wait applied before every continuation-page request.
    #[must_use]
    pub fn page_delay(&self) -> Duration {
        Duration::from_millis(self.page_delay_ms)
    }

    /// Wait applied between successive query terms.
    #[must_use]
    pub fn query_delay(&self) -> Duration {
        Duration::from_millis(self.query_delay_ms)
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("places_api_key", &"[redacted]")
            .field("places_base_url", &self.places_base_url)
            .field("log_level", &self.log_level)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("page_delay_ms", &self.page_delay_ms)
            .field("query_delay_ms", &self.query_delay_ms)
            .field("max_pages", &self.max_pages)
            .finish()
    }
}
