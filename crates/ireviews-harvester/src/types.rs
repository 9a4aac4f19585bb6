//! Raw entry shapes for the two customer-review feed formats.
//!
//! ## XML (Atom) feed
//!
//! Each review is an `<entry>` carrying Atom elements plus `im:`-prefixed
//! iTunes extensions:
//!
//! ```xml
//! <entry>
//!   <updated>2014-05-19T04:12:00-07:00</updated>
//!   <id>1032338071</id>
//!   <title>Great app</title>
//!   <content type="text">Works well</content>
//!   <im:voteSum>3</im:voteSum>
//!   <im:voteCount>4</im:voteCount>
//!   <im:rating>5</im:rating>
//!   <im:version>2.1</im:version>
//!   <author><name>someone</name><uri>...</uri></author>
//!   <content type="html">&lt;table&gt;...</content>
//! </entry>
//! ```
//!
//! Entries carry two `<content>` elements; only the first (plain text) one is
//! kept.
//!
//! ## JSON feed
//!
//! The same data with every scalar wrapped in a `{"label": ...}` object and
//! the namespace prefix kept in the key (`"im:rating"`). There is no per-entry
//! timestamp. Both `entry` and `link` collapse to a bare object instead of a
//! one-element array when only one item is present.
//!
//! In both formats the first entry describes the application itself, not a
//! review, and is dropped before normalization.

use serde::Deserialize;

/// Text content of one XML `<entry>`, exactly as found in the document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupEntry {
    pub id: String,
    pub title: String,
    /// Text of `<author><name>`.
    pub author: String,
    /// Text of the first `<content>` element.
    pub content: String,
    /// RFC 3339 timestamp, e.g. `2014-05-19T04:12:00-07:00`.
    pub updated: String,
    /// `<im:rating>`.
    pub rating: String,
    /// `<im:voteSum>`: helpful votes.
    pub vote_sum: String,
    /// `<im:voteCount>`: total votes.
    pub vote_count: String,
    /// `<im:version>`.
    pub version: String,
}

/// Top-level JSON feed document.
#[derive(Debug, Deserialize)]
pub struct ObjectDocument {
    pub feed: ObjectFeed,
}

#[derive(Debug, Deserialize)]
pub struct ObjectFeed {
    /// Kept untyped: the leading self entry has a different shape from reviews.
    #[serde(default)]
    pub entry: Option<OneOrMany<serde_json::Value>>,

    #[serde(default)]
    pub link: Option<OneOrMany<ObjectLink>>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectLink {
    #[serde(default)]
    pub attributes: Option<ObjectLinkAttributes>,
}

#[derive(Debug, Deserialize)]
pub struct ObjectLinkAttributes {
    #[serde(default)]
    pub rel: Option<String>,
    #[serde(default)]
    pub href: Option<String>,
}

/// A JSON value that is either a list or a single bare item.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    #[must_use]
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// One review entry from the JSON feed.
#[derive(Debug, Deserialize)]
pub struct ObjectEntry {
    pub id: Label,
    pub title: Label,
    pub author: ObjectAuthor,
    pub content: Label,
    #[serde(rename = "im:rating")]
    pub rating: Label,
    #[serde(rename = "im:voteSum")]
    pub vote_sum: Label,
    #[serde(rename = "im:voteCount")]
    pub vote_count: Label,
    #[serde(rename = "im:version")]
    pub version: Label,
}

#[derive(Debug, Deserialize)]
pub struct ObjectAuthor {
    pub name: Label,
}

/// `{"label": "..."}` wrapper used for every scalar in the JSON feed.
#[derive(Debug, Deserialize)]
pub struct Label {
    pub label: String,
}
