use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place/";
pub const DEFAULT_USER_AGENT: &str = "sauna-collector/0.1 (places-export)";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let require = |var: &str| -> Result<String, ConfigError> {
        match lookup(var) {
            Ok(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(ConfigError::MissingEnvVar(var.to_string())),
        }
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let places_api_key = require("GOOGLE_PLACES_API_KEY")?;
    let places_base_url = or_default("SAUNA_PLACES_BASE_URL", DEFAULT_PLACES_BASE_URL);
    let log_level = or_default("SAUNA_LOG_LEVEL", "info");
    let request_timeout_secs = parse_u64("SAUNA_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SAUNA_USER_AGENT", DEFAULT_USER_AGENT);
    let page_delay_ms = parse_u64("SAUNA_PAGE_DELAY_MS", "2000")?;
    let query_delay_ms = parse_u64("SAUNA_QUERY_DELAY_MS", "2000")?;
    let max_pages = parse_usize("SAUNA_MAX_PAGES", "10")?;

    if max_pages == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SAUNA_MAX_PAGES".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        places_api_key,
        places_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        page_delay_ms,
        query_delay_ms,
        max_pages,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
