//! Feed fixtures shared by the harvester integration tests.

#![allow(dead_code)]

use ireviews_core::HarvesterConfig;
use ireviews_harvester::Harvester;
use serde_json::{json, Value};

pub const STORE_ID: &str = "493081063";

/// Harvester pointed at a mock server: 5-second timeout, small page budget.
pub fn test_harvester(base_url: &str) -> Harvester {
    test_harvester_with_max_pages(base_url, 20)
}

pub fn test_harvester_with_max_pages(base_url: &str, max_pages: usize) -> Harvester {
    let config = HarvesterConfig {
        feed_base_url: base_url.to_owned(),
        request_timeout_secs: 5,
        user_agent: "ireviews-test/0.1".to_owned(),
        max_pages,
        log_level: "debug".to_owned(),
    };
    Harvester::new(&config).expect("failed to build test Harvester")
}

/// Path of a feed page as the harvester requests it.
pub fn page_path(country: &str, page: u32, suffix: &str) -> String {
    format!("/{country}/rss/customerreviews/page={page}/id={STORE_ID}/sortby=mostrecent/{suffix}")
}

/// Absolute next-page href, phrased for XML the way the feed service does
/// for both formats.
pub fn next_href(base: &str, country: &str, page: u32) -> String {
    format!("{base}{}", page_path(country, page, "xml"))
}

// ---------------------------------------------------------------------------
// JSON feed
// ---------------------------------------------------------------------------

fn json_link(rel: &str, href: &str) -> Value {
    json!({ "attributes": { "rel": rel, "type": "text/html", "href": href } })
}

/// Six feed-level links whose last element is `next`.
pub fn json_links_with_next(next: &str) -> Value {
    json!([
        json_link("alternate", "https://itunes.apple.com/gb/app/id493081063"),
        json_link("self", "https://itunes.apple.com/gb/rss/customerreviews/id=493081063/sortby=mostrecent/json"),
        json_link("first", "https://itunes.apple.com/gb/rss/customerreviews/page=1/id=493081063/sortby=mostrecent/xml"),
        json_link("last", "https://itunes.apple.com/gb/rss/customerreviews/page=10/id=493081063/sortby=mostrecent/xml"),
        json_link("previous", "https://itunes.apple.com/gb/rss/customerreviews/page=1/id=493081063/sortby=mostrecent/xml"),
        json_link("next", next),
    ])
}

/// A single feed-level link: the shape of a last page.
pub fn json_links_last_page() -> Value {
    json_link("alternate", "https://itunes.apple.com/gb/app/id493081063")
}

pub fn json_review(id: &str) -> Value {
    json!({
        "author": { "name": { "label": format!("author-{id}") }, "uri": { "label": "https://itunes.apple.com/reviews/id1" } },
        "im:version": { "label": "3.0" },
        "im:rating": { "label": "4" },
        "id": { "label": id },
        "title": { "label": format!("title-{id}") },
        "content": { "label": format!("content-{id}"), "attributes": { "type": "text" } },
        "im:voteSum": { "label": "1" },
        "im:voteCount": { "label": "2" }
    })
}

/// JSON page with the self entry followed by one review per id.
pub fn json_page(review_ids: &[&str], links: Value) -> Value {
    let mut entries = vec![json!({
        "im:name": { "label": "Beat Blaster" },
        "id": { "label": "https://itunes.apple.com/gb/app/id493081063" },
        "title": { "label": "Beat Blaster - Example Inc." }
    })];
    entries.extend(review_ids.iter().map(|id| json_review(id)));
    json!({ "feed": { "entry": entries, "link": links } })
}

// ---------------------------------------------------------------------------
// XML feed
// ---------------------------------------------------------------------------

pub fn xml_review(id: &str) -> String {
    format!(
        r#"<entry>
    <updated>2014-05-19T04:12:00-07:00</updated>
    <id>{id}</id>
    <title>title-{id}</title>
    <content type="text">content-{id}</content>
    <im:voteSum>1</im:voteSum>
    <im:voteCount>2</im:voteCount>
    <im:rating>5</im:rating>
    <im:version>3.0</im:version>
    <author><name>author-{id}</name><uri>https://itunes.apple.com/reviews/id1</uri></author>
    <content type="html">&lt;p&gt;content-{id}&lt;/p&gt;</content>
  </entry>"#
    )
}

/// XML page with the self entry followed by one review per id. When `next`
/// is `Some`, six feed-level links are written with it in last position;
/// otherwise only one.
pub fn xml_page(review_ids: &[&str], next: Option<&str>) -> String {
    let links = match next {
        Some(next) => format!(
            r#"<link rel="alternate" type="text/html" href="https://itunes.apple.com/gb/app/id493081063"/>
  <link rel="self" href="https://itunes.apple.com/gb/rss/customerreviews/id=493081063/sortby=mostrecent/xml"/>
  <link rel="first" href="https://itunes.apple.com/gb/rss/customerreviews/page=1/id=493081063/sortby=mostrecent/xml"/>
  <link rel="last" href="https://itunes.apple.com/gb/rss/customerreviews/page=10/id=493081063/sortby=mostrecent/xml"/>
  <link rel="previous" href="https://itunes.apple.com/gb/rss/customerreviews/page=1/id=493081063/sortby=mostrecent/xml"/>
  <link rel="next" href="{next}"/>"#
        ),
        None => r#"<link rel="alternate" type="text/html" href="https://itunes.apple.com/gb/app/id493081063"/>"#
            .to_owned(),
    };
    let reviews: String = review_ids.iter().map(|id| xml_review(id)).collect();
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns:im="http://itunes.apple.com/rss" xmlns="http://www.w3.org/2005/Atom" xml:lang="en">
  <id>https://itunes.apple.com/gb/rss/customerreviews/id=493081063/sortby=mostrecent/xml</id>
  <title>iTunes Store: Customer Reviews</title>
  {links}
  <entry>
    <updated>2014-05-20T09:14:03-07:00</updated>
    <id>https://itunes.apple.com/gb/app/id493081063</id>
    <title>Beat Blaster - Example Inc.</title>
    <im:name>Beat Blaster</im:name>
  </entry>
  {reviews}
</feed>"#
    )
}
