//! Page parsers for the two feed formats.
//!
//! Both parsers share one contract: a page body goes in, the raw review
//! entries (self entry already removed) and the next-page link come out.

mod markup;
mod object;

use ireviews_core::FeedFormat;

use crate::error::HarvestError;
use crate::types::MarkupEntry;

pub use markup::parse_markup_page;
pub use object::parse_object_page;

/// One feed-level `<link>` / `"link"` item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedLink {
    pub rel: Option<String>,
    pub href: Option<String>,
}

/// A review entry as decoded from the wire, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawEntry {
    Markup(MarkupEntry),
    Object(serde_json::Value),
}

/// Result of parsing one page.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedPage {
    /// Next page to fetch. `Some("")` when the feed advertises an empty link.
    pub next_link: Option<String>,
    pub entries: Vec<RawEntry>,
}

/// Parses one page body in the given format.
///
/// `url` is only used to give errors some context.
///
/// # Errors
///
/// - [`HarvestError::Xml`] / [`HarvestError::MalformedFeed`] for an unreadable
///   XML page.
/// - [`HarvestError::Deserialize`] for an unreadable JSON page.
pub fn parse_page(format: FeedFormat, body: &str, url: &str) -> Result<FeedPage, HarvestError> {
    match format {
        FeedFormat::Xml => parse_markup_page(body, url),
        FeedFormat::Json => parse_object_page(body, url),
    }
}

/// Drops the leading self entry. A list holding nothing but the self entry
/// yields no entries at all.
fn without_self_entry<T>(mut entries: Vec<T>) -> Vec<T> {
    if entries.len() <= 1 {
        return Vec::new();
    }
    entries.remove(0);
    entries
}
