use ireviews_core::InvalidParameters;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarvestError {
    #[error(transparent)]
    InvalidParameters(#[from] InvalidParameters),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("malformed feed in {context}: {reason}")]
    MalformedFeed { context: String, reason: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("normalization error for review {review_id}: {reason}")]
    Normalization { review_id: String, reason: String },

    #[error("pagination limit reached for {country_code}: exceeded {max_pages} pages")]
    PaginationLimit {
        country_code: String,
        max_pages: usize,
    },

    #[error("harvest stream was dropped by its consumer")]
    StreamClosed,

    #[error("invalid feed base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

impl HarvestError {
    /// `true` when the harvest was rejected before any request was made.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, HarvestError::InvalidParameters(_))
    }
}
