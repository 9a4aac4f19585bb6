//! JSON page parser.

use ireviews_core::FeedFormat;

use super::{without_self_entry, FeedLink, FeedPage, RawEntry};
use crate::error::HarvestError;
use crate::pagination::{extract_next_link, rewrite_format_suffix};
use crate::types::{ObjectDocument, ObjectLink};

/// Parses a JSON feed page into raw entries and the next-page link.
///
/// The next-page link handed back by the JSON feed still points at the XML
/// feed; it is rewritten to the JSON suffix before being returned.
///
/// # Errors
///
/// Returns [`HarvestError::Deserialize`] when the body is not JSON or has no
/// `feed` object.
pub fn parse_object_page(body: &str, url: &str) -> Result<FeedPage, HarvestError> {
    let document: ObjectDocument =
        serde_json::from_str(body).map_err(|e| HarvestError::Deserialize {
            context: format!("review page {url}"),
            source: e,
        })?;

    let links: Vec<FeedLink> = document
        .feed
        .link
        .map(|links| links.into_vec().into_iter().map(feed_link).collect())
        .unwrap_or_default();

    let next_link = extract_next_link(&links).map(|href| {
        if href.is_empty() {
            href
        } else {
            rewrite_format_suffix(&href, FeedFormat::Json)
        }
    });

    let entries = document
        .feed
        .entry
        .map(|entries| without_self_entry(entries.into_vec()))
        .unwrap_or_default()
        .into_iter()
        .map(RawEntry::Object)
        .collect();

    Ok(FeedPage { next_link, entries })
}

fn feed_link(link: ObjectLink) -> FeedLink {
    match link.attributes {
        Some(attributes) => FeedLink {
            rel: attributes.rel,
            href: attributes.href,
        },
        None => FeedLink::default(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;

    fn link(rel: &str, href: &str) -> Value {
        json!({ "attributes": { "rel": rel, "type": "text/html", "href": href } })
    }

    fn six_links(next_href: &str) -> Value {
        json!([
            link("alternate", "https://itunes.apple.com/gb/app/id493081063"),
            link("self", "https://itunes.apple.com/gb/rss/customerreviews/id=493081063/sortby=mostrecent/json"),
            link("first", "https://itunes.apple.com/gb/rss/customerreviews/page=1/id=493081063/sortby=mostrecent/xml"),
            link("last", "https://itunes.apple.com/gb/rss/customerreviews/page=10/id=493081063/sortby=mostrecent/xml"),
            link("previous", "https://itunes.apple.com/gb/rss/customerreviews/page=1/id=493081063/sortby=mostrecent/xml"),
            link("next", next_href),
        ])
    }

    fn self_entry() -> Value {
        json!({
            "im:name": { "label": "Beat Blaster" },
            "id": { "label": "https://itunes.apple.com/gb/app/id493081063", "attributes": { "im:id": "493081063" } },
            "title": { "label": "Beat Blaster - Example Inc." }
        })
    }

    fn review(id: &str) -> Value {
        json!({
            "author": { "name": { "label": "someone" }, "uri": { "label": "https://itunes.apple.com/gb/reviews/id1" } },
            "im:version": { "label": "2.1" },
            "im:rating": { "label": "5" },
            "id": { "label": id },
            "title": { "label": "Great" },
            "content": { "label": "Works well", "attributes": { "type": "text" } },
            "im:voteSum": { "label": "0" },
            "im:voteCount": { "label": "1" }
        })
    }

    fn parse(document: &Value) -> FeedPage {
        parse_object_page(&document.to_string(), "test").unwrap()
    }

    #[test]
    fn drops_self_entry_and_rewrites_next_link() {
        let page = parse(&json!({
            "feed": {
                "entry": [self_entry(), review("1"), review("2")],
                "link": six_links("https://itunes.apple.com/gb/rss/customerreviews/page=2/id=493081063/sortby=mostrecent/xml")
            }
        }));
        assert_eq!(page.entries.len(), 2);
        assert_eq!(
            page.next_link.as_deref(),
            Some("https://itunes.apple.com/gb/rss/customerreviews/page=2/id=493081063/sortby=mostrecent/json")
        );
        let RawEntry::Object(first) = &page.entries[0] else {
            panic!("expected object entry");
        };
        assert_eq!(first["id"]["label"], "1");
    }

    #[test]
    fn single_object_entry_is_the_self_entry() {
        let page = parse(&json!({
            "feed": { "entry": self_entry(), "link": six_links("https://x/xml") }
        }));
        assert!(page.entries.is_empty());
    }

    #[test]
    fn missing_entry_key_yields_no_entries() {
        let page = parse(&json!({ "feed": { "link": six_links("https://x/xml") } }));
        assert!(page.entries.is_empty());
    }

    #[test]
    fn single_link_object_means_no_next_page() {
        let page = parse(&json!({
            "feed": {
                "entry": [self_entry(), review("1")],
                "link": link("alternate", "https://itunes.apple.com/gb/app/id493081063")
            }
        }));
        assert_eq!(page.entries.len(), 1);
        assert!(page.next_link.is_none());
    }

    #[test]
    fn empty_next_href_is_left_empty() {
        let page = parse(&json!({
            "feed": { "entry": [self_entry(), review("1")], "link": six_links("") }
        }));
        assert_eq!(page.next_link.as_deref(), Some(""));
    }

    #[test]
    fn invalid_json_is_a_deserialize_error() {
        let err = parse_object_page("<feed/>", "test").unwrap_err();
        assert!(
            matches!(err, HarvestError::Deserialize { .. }),
            "expected Deserialize, got: {err:?}"
        );
    }

    #[test]
    fn document_without_feed_is_a_deserialize_error() {
        let err = parse_object_page(r#"{"items": []}"#, "test").unwrap_err();
        assert!(
            matches!(err, HarvestError::Deserialize { .. }),
            "expected Deserialize, got: {err:?}"
        );
    }
}
