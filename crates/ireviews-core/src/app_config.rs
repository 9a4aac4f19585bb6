/// Process-wide harvester settings. Read-only once loaded and safe to share
/// across independent harvest invocations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HarvesterConfig {
    /// Scheme + host of the review feed service, without a trailing slash.
    pub feed_base_url: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Upper bound on pages fetched for a single country.
    pub max_pages: usize,
    pub log_level: String,
}

impl Default for HarvesterConfig {
    fn default() -> Self {
        Self {
            feed_base_url: "https://itunes.apple.com".to_owned(),
            request_timeout_secs: 30,
            user_agent: "ireviews/0.1 (review-harvester)".to_owned(),
            max_pages: 100,
            log_level: "info".to_owned(),
        }
    }
}
