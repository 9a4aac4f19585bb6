//! Atom XML page parser built on the `quick-xml` event reader.

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use super::{without_self_entry, FeedLink, FeedPage, RawEntry};
use crate::error::HarvestError;
use crate::pagination::extract_next_link;
use crate::types::MarkupEntry;

/// Parses an XML feed page into raw entries and the next-page link.
///
/// Only direct children of `<feed>` count as feed-level links; entries carry
/// their own `<link>` elements which are ignored.
///
/// # Errors
///
/// Returns [`HarvestError::Xml`] when the document is not well-formed and
/// [`HarvestError::MalformedFeed`] when it has no `<feed>` root.
pub fn parse_markup_page(body: &str, url: &str) -> Result<FeedPage, HarvestError> {
    let mut reader = Reader::from_str(body);

    // Local names of the currently open elements, root first.
    let mut path: Vec<String> = Vec::new();
    let mut saw_root = false;
    let mut links = Vec::new();
    let mut entries = Vec::new();
    let mut current: Option<MarkupEntry> = None;
    let mut content_seen = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                let name = local_name(&e);
                if path.is_empty() {
                    check_root(&name, url)?;
                    saw_root = true;
                } else if path.len() == 1 {
                    match name.as_str() {
                        "entry" => {
                            current = Some(MarkupEntry::default());
                            content_seen = 0;
                        }
                        "link" => links.push(read_link(&e, url)?),
                        _ => {}
                    }
                } else if path.len() == 2 && path[1] == "entry" && name == "content" {
                    content_seen += 1;
                }
                path.push(name);
            }
            Event::Empty(e) => {
                let name = local_name(&e);
                if path.is_empty() {
                    check_root(&name, url)?;
                    saw_root = true;
                } else if path.len() == 1 && name == "link" {
                    links.push(read_link(&e, url)?);
                } else if path.len() == 2 && path[1] == "entry" && name == "content" {
                    content_seen += 1;
                }
            }
            Event::End(_) => {
                let closed = path.pop();
                if path.len() == 1 && closed.as_deref() == Some("entry") {
                    if let Some(entry) = current.take() {
                        entries.push(trimmed(entry));
                    }
                }
            }
            Event::Text(e) => {
                let text = e.unescape().map_err(|err| HarvestError::MalformedFeed {
                    context: url.to_owned(),
                    reason: err.to_string(),
                })?;
                if let Some(entry) = current.as_mut() {
                    append_field(entry, &path, content_seen, &text);
                }
            }
            Event::CData(e) => {
                let text = String::from_utf8_lossy(&e).into_owned();
                if let Some(entry) = current.as_mut() {
                    append_field(entry, &path, content_seen, &text);
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !saw_root {
        return Err(HarvestError::MalformedFeed {
            context: url.to_owned(),
            reason: "document has no <feed> element".to_owned(),
        });
    }
    if !path.is_empty() {
        return Err(HarvestError::MalformedFeed {
            context: url.to_owned(),
            reason: format!("document ended inside <{}>", path.join("><")),
        });
    }

    let entries = without_self_entry(entries)
        .into_iter()
        .map(RawEntry::Markup)
        .collect();

    Ok(FeedPage {
        next_link: extract_next_link(&links),
        entries,
    })
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).into_owned()
}

fn check_root(name: &str, url: &str) -> Result<(), HarvestError> {
    if name == "feed" {
        Ok(())
    } else {
        Err(HarvestError::MalformedFeed {
            context: url.to_owned(),
            reason: format!("root element is <{name}>, expected <feed>"),
        })
    }
}

fn read_link(e: &BytesStart<'_>, url: &str) -> Result<FeedLink, HarvestError> {
    let mut link = FeedLink::default();
    for attr in e.attributes() {
        let attr = attr.map_err(|err| HarvestError::MalformedFeed {
            context: url.to_owned(),
            reason: format!("bad <link> attribute: {err}"),
        })?;
        let value = attr
            .unescape_value()
            .map_err(|err| HarvestError::MalformedFeed {
                context: url.to_owned(),
                reason: format!("bad <link> attribute value: {err}"),
            })?
            .into_owned();
        match attr.key.local_name().as_ref() {
            b"rel" => link.rel = Some(value),
            b"href" => link.href = Some(value),
            _ => {}
        }
    }
    Ok(link)
}

/// Trims each assembled field once. Text and CDATA pieces are appended
/// untrimmed so whitespace between them survives.
fn trimmed(mut entry: MarkupEntry) -> MarkupEntry {
    for field in [
        &mut entry.id,
        &mut entry.title,
        &mut entry.author,
        &mut entry.content,
        &mut entry.updated,
        &mut entry.rating,
        &mut entry.vote_sum,
        &mut entry.vote_count,
        &mut entry.version,
    ] {
        let value = field.trim();
        if value.len() != field.len() {
            *field = value.to_owned();
        }
    }
    entry
}

/// Appends `text` to the entry field addressed by `path`
/// (`["feed", "entry", <field>, ...]`).
fn append_field(entry: &mut MarkupEntry, path: &[String], content_seen: usize, text: &str) {
    let field = match path {
        [_, _, field] => match field.as_str() {
            "id" => &mut entry.id,
            "title" => &mut entry.title,
            "content" if content_seen == 1 => &mut entry.content,
            "updated" => &mut entry.updated,
            "rating" => &mut entry.rating,
            "voteSum" => &mut entry.vote_sum,
            "voteCount" => &mut entry.vote_count,
            "version" => &mut entry.version,
            _ => return,
        },
        [_, _, author, name] if author == "author" && name == "name" => &mut entry.author,
        _ => return,
    };
    field.push_str(text);
}

#[cfg(test)]
#[path = "markup_test.rs"]
mod tests;
