//! Next-page link discovery for the customer-review feed.
//!
//! The feed service does not label its pagination links in a way that is
//! consistent across formats, so pages are chained by position instead of by
//! `rel`. A complete feed-level link list has six entries:
//!
//! ```text
//! 0 alternate  1 self  2 first  3 last  4 previous  5 next
//! ```
//!
//! Any other length (including no list at all) means there is no next page.

use ireviews_core::FeedFormat;

use crate::feed::FeedLink;

/// Number of feed-level links present on a page that has a successor.
pub const EXPECTED_LINK_COUNT: usize = 6;

/// Zero-based position of the next-page link within a complete link list.
pub const NEXT_LINK_POSITION: usize = 5;

/// Returns the raw next-page href, or `None` when the link list does not
/// have exactly [`EXPECTED_LINK_COUNT`] entries or the link has no `href`.
///
/// An empty href is returned as `Some("")`; callers treat it as end of data.
#[must_use]
pub fn extract_next_link(links: &[FeedLink]) -> Option<String> {
    if links.len() != EXPECTED_LINK_COUNT {
        return None;
    }
    links[NEXT_LINK_POSITION].href.clone()
}

/// Rewrites the trailing format segment of a feed URL to `target`.
///
/// The JSON feed hands back next-page links still phrased for XML
/// (`.../sortby=mostrecent/xml`), so following them verbatim would switch
/// formats mid-harvest. Only the last path segment is touched; any query
/// string or fragment is preserved. Applying the rewrite twice yields the same
/// URL as applying it once.
#[must_use]
pub fn rewrite_format_suffix(url: &str, target: FeedFormat) -> String {
    let split_at = url.find(['?', '#']).unwrap_or(url.len());
    let (path, rest) = url.split_at(split_at);

    let Some((head, last)) = path.rsplit_once('/') else {
        return url.to_owned();
    };

    let is_format_segment = last
        .parse::<FeedFormat>()
        .is_ok_and(|format| format != target);
    if !is_format_segment {
        return url.to_owned();
    }

    format!("{head}/{}{rest}", target.suffix())
}

/// Builds the first-page URL for one country.
///
/// Country codes are lower-cased: the feed service serves storefronts under
/// `/gb/`, `/fr/`, and so on.
#[must_use]
pub fn first_page_url(
    base_url: &str,
    country_code: &str,
    store_id: &str,
    format: FeedFormat,
) -> String {
    format!(
        "{base}/{country}/rss/customerreviews/page=1/id={store_id}/sortby=mostrecent/{suffix}",
        base = base_url.trim_end_matches('/'),
        country = country_code.to_ascii_lowercase(),
        suffix = format.suffix(),
    )
}
