use crate::app_config::HarvesterConfig;
use crate::ConfigError;

/// Load harvester configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_harvester_config() -> Result<HarvesterConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_harvester_config_from_env()
}

/// Load harvester configuration from environment variables already in the process.
///
/// Unlike [`load_harvester_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_harvester_config_from_env() -> Result<HarvesterConfig, ConfigError> {
    build_harvester_config(|key| std::env::var(key))
}

/// Build harvester configuration using the provided env-var lookup function.
///
/// Every variable is optional; absent ones fall back to
/// [`HarvesterConfig::default`].
fn build_harvester_config<F>(lookup: F) -> Result<HarvesterConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let defaults = HarvesterConfig::default();

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: u64| -> Result<u64, ConfigError> {
        match lookup(var) {
            Ok(raw) => raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Ok(default),
        }
    };

    let feed_base_url = or_default("IREVIEWS_FEED_BASE_URL", &defaults.feed_base_url)
        .trim_end_matches('/')
        .to_string();
    if !feed_base_url.starts_with("http://") && !feed_base_url.starts_with("https://") {
        return Err(ConfigError::InvalidEnvVar {
            var: "IREVIEWS_FEED_BASE_URL".to_string(),
            reason: format!("\"{feed_base_url}\" is not an http(s) URL"),
        });
    }

    let request_timeout_secs =
        parse_u64("IREVIEWS_REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?;
    let user_agent = or_default("IREVIEWS_USER_AGENT", &defaults.user_agent);

    let max_pages = match lookup("IREVIEWS_MAX_PAGES") {
        Ok(raw) => {
            let parsed = raw
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "IREVIEWS_MAX_PAGES".to_string(),
                    reason: e.to_string(),
                })?;
            if parsed == 0 {
                return Err(ConfigError::InvalidEnvVar {
                    var: "IREVIEWS_MAX_PAGES".to_string(),
                    reason: "must be at least 1".to_string(),
                });
            }
            parsed
        }
        Err(_) => defaults.max_pages,
    };

    let log_level = or_default("IREVIEWS_LOG_LEVEL", &defaults.log_level);

    Ok(HarvesterConfig {
        feed_base_url,
        request_timeout_secs,
        user_agent,
        max_pages,
        log_level,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
